use super::FrameEncoder;

// Block length prefix of a full block, which carries no implied zero
const FULL_BLOCK: usize = 0xFF;

/// A streaming COBS encoder.
///
/// At most one block (254 bytes plus its length prefix) is held back; everything
/// else is passed to the sink as soon as it is encoded.
#[derive(Debug)]
pub struct Encoder {
    buffer: [u8; 256],

    // Next free byte of `buffer`, or 0 when no block has been started
    index: usize,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            buffer: [0; 256],
            index: 0,
        }
    }

    fn flush_block<F>(&mut self, sink: &mut F)
    where
        F: FnMut(&[u8]),
    {
        self.buffer[0] = self.index as u8;
        sink(&self.buffer[..self.index]);
    }
}

impl FrameEncoder for Encoder {
    fn encode_data<F>(&mut self, data: &[u8], mut sink: F)
    where
        F: FnMut(&[u8]),
    {
        for &b in data {
            if self.index == 0 {
                self.index = 1;
            }

            if b != 0 {
                self.buffer[self.index] = b;
                self.index += 1;
            }

            if b == 0 || self.index == FULL_BLOCK {
                self.flush_block(&mut sink);
                self.index = if self.index == FULL_BLOCK { 0 } else { 1 };
            }
        }
    }

    fn encode_delimiter<F>(&mut self, mut sink: F)
    where
        F: FnMut(&[u8]),
    {
        if self.index > 0 {
            self.buffer[0] = self.index as u8;
        }
        self.buffer[self.index] = 0;
        sink(&self.buffer[..=self.index]);
        self.index = 0;
    }

    fn reset(&mut self) {
        self.index = 0;
    }
}
