#![no_std]
extern crate alloc;

pub mod decode;
pub mod encode;

mod value;

pub use value::Value;


#[cfg(test)]
mod encode_tests;
