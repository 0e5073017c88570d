use core::fmt;

static X25: ::crc::Crc<u16> = ::crc::Crc::<u16>::new(&::crc::CRC_16_IBM_SDLC);
static ISO_HDLC: ::crc::Crc<u32> = ::crc::Crc::<u32>::new(&::crc::CRC_32_ISO_HDLC);

macro_rules! impl_accumulator {
    ($(#[$meta:meta])* $name:ident, $width:ty, $crc:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            digest: ::crc::Digest<'static, $width>,
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    digest: $crc.digest(),
                }
            }

            pub fn reset(&mut self) {
                self.digest = $crc.digest();
            }

            pub fn update(&mut self, data: &[u8]) {
                self.digest.update(data);
            }

            /// The checksum of everything fed since the last reset.
            pub fn finish(&self) -> $width {
                self.digest.clone().finalize()
            }

            /// The checksum in the little-endian order it is sent on the wire.
            pub fn finish_bytes(&self) -> [u8; core::mem::size_of::<$width>()] {
                self.finish().to_le_bytes()
            }

            /// True if the data fed so far ends with its own correct checksum.
            pub fn verify(&self) -> bool {
                self.finish() == $crc.algorithm.residue ^ $crc.algorithm.xorout
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:#x})", stringify!($name), self.finish())
            }
        }
    };
}

impl_accumulator!(
    /// CRC-16/X-25, as used by HDLC framing.
    Crc16,
    u16,
    X25
);

impl_accumulator!(
    /// The zlib CRC-32.
    Crc32,
    u32,
    ISO_HDLC
);
