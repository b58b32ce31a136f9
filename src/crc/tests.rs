use std::sync::Arc;
use std::thread;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::{bits, corruption, CrcErr};
use super::Crc;

fn crc(polynomial:&str) -> Crc { polynomial.parse().unwrap() }

fn random_bits(rng:&mut StdRng, n:usize) -> Vec<bool> { (0..n).map(|_| rng.gen()).collect() }

// Leading 1 plus at least one other nonzero term
fn random_generator(rng:&mut StdRng) -> Crc {
	loop {
		let degree:usize = rng.gen_range(1, 17);
		let mut polynomial = random_bits(rng, degree);
		polynomial.insert(0, true);
		if polynomial.iter().filter(|b| **b).count() >= 2 {
			return Crc::new(&polynomial).unwrap();
		}
	}
}

#[test]
fn worked_example() {
	let c = crc("101");
	let data = bits::parse("1101").unwrap();

	// 110100 -> 11100 -> 1000 -> 10
	assert_eq!(c.check_bits(&data), vec![true, false]);

	let encoded = c.encode(&data);
	assert_eq!(bits::to_string(&encoded), "110110");
	assert!(!c.decode(&encoded));

	assert_eq!(c.encode_digits(&[1, 1, 0, 1]), Ok(vec![1, 1, 0, 1, 1, 0]));
	assert_eq!(c.decode_digits(&[1, 1, 0, 1, 1, 0]), Ok(false));
	assert_eq!(c.decode_digits(&[1, 1, 0, 1, 1, 1]), Ok(true));
}

#[test]
fn short_remainders_are_padded_to_check_length() {
	let c = crc("10011");
	// x^4 mod (x^4+x+1) = x+1, only two bits before padding
	let data = bits::parse("1").unwrap();
	let check = c.check_bits(&data);
	assert_eq!(check.len(), 4);
	assert_eq!(bits::to_string(&check), "0011");
	assert_eq!(c.encode(&data).len(), 5);

	// All-zero data produces all-zero check bits rather than an empty remainder
	let zeros = vec![false; 6];
	assert_eq!(c.encode(&zeros), vec![false; 10]);
	assert!(!c.decode(&c.encode(&zeros)));
}

#[test]
fn data_with_leading_zeros_round_trips() {
	let c = crc("1011");
	for s in &["0", "01", "0011", "000101101", "0000000001"] {
		let data = bits::parse(s).unwrap();
		let encoded = c.encode(&data);
		assert_eq!(encoded.len(), data.len() + 3);
		assert!(!c.decode(&encoded), "false positive for {}", s);
	}
}

#[test]
fn empty_data() {
	let c = crc("1011");
	assert_eq!(c.encode(&[]), vec![false; 3]);
	assert!(!c.decode(&[]));
	assert!(!c.decode(&c.encode(&[])));
}

#[test]
fn received_shorter_than_polynomial() {
	let c = crc("10011");
	assert!(c.decode(&[true]));
	assert!(c.decode(&[false, false, true, false]));
	assert!(!c.decode(&[false, false]));
}

#[test]
fn round_trip_random() {
	let mut rng = StdRng::seed_from_u64(1);
	for _ in 0..500 {
		let c = random_generator(&mut rng);
		let n:usize = rng.gen_range(0, 64);
		let data = random_bits(&mut rng, n);

		let encoded = c.encode(&data);
		assert_eq!(encoded.len(), data.len() + c.check_len());
		assert_eq!(c.split_codeword(&encoded).unwrap(), (&data[..], &c.check_bits(&data)[..]));
		assert!(!c.decode(&encoded));
	}
}

#[test]
fn single_bit_flips_are_detected() {
	let mut rng = StdRng::seed_from_u64(2);
	for _ in 0..200 {
		let c = random_generator(&mut rng);
		let n:usize = rng.gen_range(0, 40);
		let encoded = c.encode(&random_bits(&mut rng, n));

		for idx in 0..encoded.len() {
			let mut received = encoded.clone();
			corruption::flip_bits(&mut received, &[idx]).unwrap();
			assert!(c.decode(&received), "missed flip at {} with generator {}", idx, bits::to_string(c.polynomial()));
		}
	}
}

#[test]
fn odd_error_counts_are_detected_with_x_plus_1_factor() {
	// x^3 + 1 = (x + 1)(x^2 + x + 1)
	let c = crc("1001");
	let mut rng = StdRng::seed_from_u64(3);
	for _ in 0..200 {
		let n:usize = rng.gen_range(1, 32);
		let mut received = c.encode(&random_bits(&mut rng, n));
		let n_flips = 2*rng.gen_range(0, received.len()/2) + 1;
		corruption::flip_random(&mut rng, &mut received, n_flips).unwrap();
		assert!(c.decode(&received));
	}
}

#[test]
fn burst_errors_up_to_degree_are_detected() {
	let c = crc("11000011");
	let data = bits::parse("1011001110001111000010100110").unwrap();
	let encoded = c.encode(&data);

	for start in 0..encoded.len() {
		for len in 1..=c.degree().min(encoded.len() - start) {
			let mut received = encoded.clone();
			let mut idxs:Vec<usize> = vec![start];
			if len > 1 { idxs.push(start + len - 1); }
			if len > 2 { idxs.push(start + 1); }
			corruption::flip_bits(&mut received, &idxs).unwrap();
			assert!(c.decode(&received), "missed burst at {} of length {}", start, len);
		}
	}
}

#[test]
fn multiples_of_the_generator_go_undetected() {
	// Adding the generator itself to a codeword leaves the remainder unchanged
	let c = crc("1011");
	let mut received = c.encode(&bits::parse("110010").unwrap());
	let n = received.len();
	corruption::flip_bits(&mut received, &[n-4, n-2, n-1]).unwrap();
	assert!(!c.decode(&received));
}

#[test]
fn standard_check_values() {
	let message = bits::from_bytes(b"123456789");

	// CRC-8/SMBUS
	let mut poly8 = vec![true];
	poly8.extend(bits::from_bytes(&[0x07]));
	assert_eq!(bits::to_u64(&Crc::new(&poly8).unwrap().check_bits(&message)), Ok(0xF4));

	// CRC-16/XMODEM
	let mut poly16 = vec![true];
	poly16.extend(bits::from_bytes(&[0x10, 0x21]));
	assert_eq!(bits::to_u64(&Crc::new(&poly16).unwrap().check_bits(&message)), Ok(0x31C3));

	// CRC-24Q as used by the GPS L2C navigation message
	let crc24q = crc("1100001100100110011111011");
	assert_eq!(crc24q.check_len(), 24);
	assert_eq!(bits::to_u64(&crc24q.check_bits(&message)), Ok(0xCDE703));
	assert!(!crc24q.decode(&crc24q.encode(&message)));
}

#[test]
fn reuse_is_idempotent() {
	let c = crc("110101");
	let data = bits::parse("1110010110").unwrap();
	let first = c.encode(&data);
	assert_eq!(c.encode(&data), first);

	let mut corrupted = first.clone();
	corrupted[3] ^= true;
	assert_eq!(c.decode(&corrupted), c.decode(&corrupted));
	assert_eq!(c.decode(&first), c.decode(&first));
	assert_eq!(c.polynomial(), &bits::parse("110101").unwrap()[..]);
}

#[test]
fn shared_across_threads() {
	let c = Arc::new(crc("1100001100100110011111011"));
	let handles:Vec<thread::JoinHandle<bool>> = (0..4u8).map(|i| {
		let c = Arc::clone(&c);
		thread::spawn(move || {
			let data = bits::from_bytes(&[i; 16]);
			!c.decode(&c.encode(&data))
		})
	}).collect();

	for h in handles {
		assert!(h.join().unwrap());
	}
}

#[test]
fn degenerate_polynomials_are_rejected() {
	assert_eq!(Crc::new(&[]), Err(CrcErr::DivisorDegenerate));
	assert_eq!(Crc::new(&[false]), Err(CrcErr::DivisorDegenerate));
	assert_eq!(Crc::new(&[true]), Err(CrcErr::DivisorDegenerate));
	assert_eq!(Crc::from_digits(&[0, 1, 1]), Err(CrcErr::DivisorDegenerate));
	assert_eq!("".parse::<Crc>(), Err(CrcErr::DivisorDegenerate));
	assert_eq!(Crc::from_digits(&[0]), Err(CrcErr::DivisorDegenerate));
}

#[test]
fn invalid_bits_are_rejected() {
	let c = crc("101");
	assert_eq!(c.encode_digits(&[0, 2, 1]), Err(CrcErr::InvalidBit{ idx: 1, val: 2 }));
	assert_eq!(c.decode_digits(&[1, 1, 0, 7]), Err(CrcErr::InvalidBit{ idx: 3, val: 7 }));
	assert_eq!(Crc::from_digits(&[1, 3]), Err(CrcErr::InvalidBit{ idx: 1, val: 3 }));
	assert_eq!("1a1".parse::<Crc>(), Err(CrcErr::InvalidBit{ idx: 1, val: b'a' }));
}

#[test]
fn split_rejects_short_codewords() {
	let c = crc("10011");
	assert!(c.split_codeword(&[true, false]).is_err());
	let empty:&[bool] = &[];
	assert_eq!(c.split_codeword(&[false; 4]).unwrap(), (empty, &[false; 4][..]));
}
