
use crate::CrcErr;

pub fn from_digits(digits:&[u8]) -> Result<Vec<bool>, CrcErr> {
	digits.iter().enumerate().map(|(idx, d)| match *d {
		0   => Ok(false),
		1   => Ok(true),
		val => Err(CrcErr::InvalidBit{ idx, val }),
	}).collect()
}

/// Parses a string of '0' and '1' characters, most significant bit first.  Whitespace around the
/// digits is ignored, but not between them.
pub fn parse(s:&str) -> Result<Vec<bool>, CrcErr> {
	s.trim().bytes().enumerate().map(|(idx, c)| match c {
		b'0' => Ok(false),
		b'1' => Ok(true),
		val  => Err(CrcErr::InvalidBit{ idx, val }),
	}).collect()
}

/// Unpacks bytes into bits, most significant bit of each byte first
pub fn from_bytes(bytes:&[u8]) -> Vec<bool> {
	bytes.iter().flat_map(|byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1)).collect()
}

pub fn to_digits(x:&[bool]) -> Vec<u8> { x.iter().map(|b| *b as u8).collect() }

pub fn to_string(x:&[bool]) -> String { x.iter().map(|b| if *b { '1' } else { '0' }).collect() }

pub fn strip_leading_zeros(x:&[bool]) -> &[bool] {
	let n_zeros = x.iter().take_while(|b| !**b).count();
	&x[n_zeros..]
}

/// Left-pads with zeros up to `width` bits.  Sequences that are already at least `width` long are
/// returned unchanged.
pub fn pad_left(x:&[bool], width:usize) -> Vec<bool> {
	let mut ans:Vec<bool> = vec![false; width.saturating_sub(x.len())];
	ans.extend_from_slice(x);
	ans
}

pub fn to_u64(bools:&[bool]) -> Result<u64, CrcErr> {
	let n = bools.len();
	if n <= 64 {
		Ok((0..n).filter(|i| bools[*i]).map(|i| 1u64 << (n-i-1)).fold(0u64, |acc, x| acc | x))
	} else {
		Err(CrcErr::Other("x.len() > 64 in bits::to_u64"))
	}
}
