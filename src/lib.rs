
use std::fmt;

pub mod bits;
pub mod corruption;
pub mod crc;
pub mod gf2;

pub use crc::Crc;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CrcErr {
	InvalidBit{ idx:usize, val:u8 },
	DivisorDegenerate,
	IndexOutOfRange{ idx:usize, len:usize },
	Other(&'static str),
}

impl fmt::Display for CrcErr {
	fn fmt(&self, f:&mut fmt::Formatter) -> fmt::Result {
		match self {
			CrcErr::InvalidBit{ idx, val } => write!(f, "invalid bit value {} at index {}, expected 0 or 1", val, idx),
			CrcErr::DivisorDegenerate      => write!(f, "generator polynomial must have at least two bits and a leading 1"),
			CrcErr::IndexOutOfRange{ idx, len } => write!(f, "bit index {} out of range for sequence of length {}", idx, len),
			CrcErr::Other(msg)             => write!(f, "{}", msg),
		}
	}
}

impl std::error::Error for CrcErr {}
