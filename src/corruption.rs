
use rand::Rng;
use rand::distributions::Bernoulli;
use rand::seq::index;

use crate::CrcErr;

/// Flips the bits at `idxs`.  Every index is checked before anything is flipped, so on error the
/// sequence is left untouched.  An index listed twice is flipped twice.
pub fn flip_bits(data:&mut [bool], idxs:&[usize]) -> Result<(), CrcErr> {
	let len = data.len();
	if let Some(idx) = idxs.iter().cloned().find(|idx| *idx >= len) {
		return Err(CrcErr::IndexOutOfRange{ idx, len });
	}

	for idx in idxs { data[*idx] ^= true; }
	Ok(())
}

// Requires n <= data.len()
fn flip_sampled<R: Rng + ?Sized>(rng:&mut R, data:&mut [bool], n:usize) -> Vec<usize> {
	let mut idxs:Vec<usize> = index::sample(rng, data.len(), n).into_vec();
	idxs.sort_unstable();
	for idx in &idxs { data[*idx] ^= true; }
	idxs
}

/// Flips `n` distinct positions chosen uniformly at random and returns them in ascending order
pub fn flip_random<R: Rng + ?Sized>(rng:&mut R, data:&mut [bool], n:usize) -> Result<Vec<usize>, CrcErr> {
	if n > data.len() {
		Err(CrcErr::Other("more bit flips requested than bits in the sequence"))
	} else {
		Ok(flip_sampled(rng, data, n))
	}
}

/// Demonstration corruption: picks an error count uniformly from [0, len) and flips that many
/// distinct positions.  Returns the flipped positions in ascending order.
pub fn simulate_errors<R: Rng + ?Sized>(rng:&mut R, data:&mut [bool]) -> Vec<usize> {
	if data.is_empty() { return vec![]; }

	let n:usize = rng.gen_range(0, data.len());
	flip_sampled(rng, data, n)
}

/// Flips each bit independently with probability `error_rate`
pub fn binary_symmetric_channel<R: Rng + ?Sized>(rng:&mut R, data:&mut [bool], error_rate:f64) -> Result<Vec<usize>, CrcErr> {
	if !(0.0..=1.0).contains(&error_rate) {
		return Err(CrcErr::Other("error rate must be between 0 and 1"));
	}
	let dist = Bernoulli::new(error_rate).map_err(|_| CrcErr::Other("error rate must be between 0 and 1"))?;

	let idxs:Vec<usize> = (0..data.len()).filter(|_| rng.sample(dist)).collect();
	for idx in &idxs { data[*idx] ^= true; }
	Ok(idxs)
}
