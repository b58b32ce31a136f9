
use std::str::FromStr;

use crate::{bits, gf2, CrcErr};

#[cfg(test)]
mod tests;

/// Cyclic redundancy check over a single caller-specified generator polynomial.  The polynomial is
/// fixed at construction, so one instance can encode and check any number of sequences, including
/// from several threads at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crc {
	polynomial: Vec<bool>,
}

impl Crc {

	pub fn new(polynomial:&[bool]) -> Result<Self, CrcErr> {
		// A degree-zero generator would leave no room for check bits
		if polynomial.len() < 2 || !polynomial[0] { return Err(CrcErr::DivisorDegenerate); }
		Ok(Self{ polynomial: polynomial.to_vec() })
	}

	pub fn from_digits(polynomial:&[u8]) -> Result<Self, CrcErr> {
		Self::new(&bits::from_digits(polynomial)?)
	}

	pub fn polynomial(&self) -> &[bool] { &self.polynomial }
	pub fn degree(&self) -> usize { self.polynomial.len() - 1 }

	/// Number of check bits appended to each message
	pub fn check_len(&self) -> usize { self.degree() }

	/// Remainder of `data` followed by `check_len()` zeros, always exactly `check_len()` bits wide
	pub fn check_bits(&self, data:&[bool]) -> Vec<bool> {
		let mut padded:Vec<bool> = data.to_vec();
		padded.resize(data.len() + self.check_len(), false);

		let remainder = gf2::reduce_remainder(&padded, &self.polynomial);
		bits::pad_left(&remainder, self.check_len())
	}

	pub fn encode(&self, data:&[bool]) -> Vec<bool> {
		let mut ans:Vec<bool> = data.to_vec();
		ans.extend(self.check_bits(data));
		ans
	}

	/// Returns true if an error is detected, i.e. the received sequence isn't a multiple of the
	/// generator polynomial
	pub fn decode(&self, received:&[bool]) -> bool {
		gf2::reduce_remainder(received, &self.polynomial).iter().any(|b| *b)
	}

	pub fn encode_digits(&self, data:&[u8]) -> Result<Vec<u8>, CrcErr> {
		let data = bits::from_digits(data)?;
		Ok(bits::to_digits(&self.encode(&data)))
	}

	pub fn decode_digits(&self, received:&[u8]) -> Result<bool, CrcErr> {
		let received = bits::from_digits(received)?;
		Ok(self.decode(&received))
	}

	/// Splits an encoded sequence into its data and check bits
	pub fn split_codeword<'a>(&self, codeword:&'a [bool]) -> Result<(&'a [bool], &'a [bool]), CrcErr> {
		if codeword.len() < self.check_len() {
			Err(CrcErr::Other("codeword shorter than the check length"))
		} else {
			Ok(codeword.split_at(codeword.len() - self.check_len()))
		}
	}

}

impl FromStr for Crc {
	type Err = CrcErr;

	fn from_str(s:&str) -> Result<Self, CrcErr> {
		Self::new(&bits::parse(s)?)
	}
}
