
use crate::{bits, CrcErr};

/// Result of GF(2) long division.  Both polynomials are stored most significant coefficient first
/// with leading zeros stripped, so the zero polynomial is an empty vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
	pub quotient: Vec<bool>,
	pub remainder: Vec<bool>,
}

fn check_divisor(divisor:&[bool]) -> Result<(), CrcErr> {
	match divisor.first() {
		Some(true) => Ok(()),
		_ => Err(CrcErr::DivisorDegenerate),
	}
}

fn skip_zeros(work:&[bool], from:usize) -> usize {
	from + work[from..].iter().take_while(|b| !**b).count()
}

// Reduces `work` modulo `divisor` in place and returns the index where the remainder starts.  Each
// XOR step is aligned under the current leading 1; `on_step` receives the exponent of the quotient
// term that step contributes.  The divisor must start with a 1.
fn reduce<F: FnMut(usize)>(work:&mut [bool], divisor:&[bool], mut on_step:F) -> usize {
	let n = divisor.len();
	let mut start = skip_zeros(work, 0);
	while work.len() - start >= n {
		on_step(work.len() - start - n);
		for (w, d) in work[start..start+n].iter_mut().zip(divisor.iter()) {
			*w ^= *d;
		}
		start = skip_zeros(work, start);
	}
	start
}

/// Remainder of `dividend` modulo a divisor that is already known to start with a 1
pub(crate) fn reduce_remainder(dividend:&[bool], divisor:&[bool]) -> Vec<bool> {
	let mut work = dividend.to_vec();
	let start = reduce(&mut work, divisor, |_| ());
	work.split_off(start)
}

pub fn divide(dividend:&[bool], divisor:&[bool]) -> Result<Division, CrcErr> {
	check_divisor(divisor)?;

	let mut work = dividend.to_vec();
	let mut quotient:Vec<bool> = vec![];
	let start = reduce(&mut work, divisor, |exp| {
		// The first step always has the highest exponent
		if quotient.is_empty() { quotient = vec![false; exp + 1]; }
		let n = quotient.len();
		quotient[n - 1 - exp] = true;
	});

	Ok(Division{ quotient, remainder: work.split_off(start) })
}

pub fn remainder(dividend:&[bool], divisor:&[bool]) -> Result<Vec<bool>, CrcErr> {
	check_divisor(divisor)?;
	Ok(reduce_remainder(dividend, divisor))
}

pub fn multiply(a:&[bool], b:&[bool]) -> Vec<bool> {
	let a = bits::strip_leading_zeros(a);
	let b = bits::strip_leading_zeros(b);
	if a.is_empty() || b.is_empty() { return vec![]; }

	let mut ans:Vec<bool> = vec![false; a.len() + b.len() - 1];
	for (i, _) in a.iter().enumerate().filter(|(_, x)| **x) {
		for (j, _) in b.iter().enumerate().filter(|(_, y)| **y) {
			ans[i+j] ^= true;
		}
	}
	ans
}

/// Sum (XOR) of two polynomials, aligned at the constant term
pub fn add(a:&[bool], b:&[bool]) -> Vec<bool> {
	let n = a.len().max(b.len());
	let mut ans = bits::pad_left(a, n);
	for (x, y) in ans[n - b.len()..].iter_mut().zip(b.iter()) {
		*x ^= *y;
	}
	bits::strip_leading_zeros(&ans).to_vec()
}
