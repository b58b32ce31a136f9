
extern crate clap;
extern crate colored;
extern crate crc_codec;
extern crate rand;
extern crate serde;

use std::fs::File;
use std::io::BufReader;

use clap::{Arg, App};
use colored::*;
use crc_codec::{bits, corruption, Crc, CrcErr};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};

const INVALID_INPUT:&str = "Invalid input. Please enter binary digits (0 or 1).";

#[derive(Debug, Serialize, Deserialize)]
struct CodecSpec {
	polynomial: String,
	seed: Option<u64>,
	error_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
struct Report {
	mode: String,
	polynomial: String,
	input: String,
	output: Option<String>,
	check_value: Option<u64>,
	flipped: Vec<usize>,
	error_detected: Option<bool>,
}

fn parse_bits(s:&str, what:&str) -> Result<Vec<bool>, &'static str> {
	bits::parse(s).map_err(|e| {
		eprintln!("{}", format!("Unable to parse {}: {}", what, e).red());
		INVALID_INPUT
	})
}

fn main() -> Result<(), &'static str> {

	let matches = App::new("CRC Encoder/Decoder")
		.version("0.1.0")
		.about("Appends CRC check bits to a bit string, or checks a received bit string for errors")
		.arg(Arg::with_name("mode")
			.help("Whether to encode data or check received data")
			.required(true).index(1)
			.possible_values(&["encode", "decode"]))
		.arg(Arg::with_name("polynomial")
			.short("p").long("polynomial")
			.help("Generator polynomial as binary digits, e.g. 101 for x^2 + 1")
			.takes_value(true))
		.arg(Arg::with_name("data")
			.short("d").long("data")
			.help("Data (encode) or received bits (decode) as binary digits")
			.required(true).takes_value(true))
		.arg(Arg::with_name("simulate_errors")
			.long("simulate_errors")
			.help("Flip randomly chosen bits of the encoded (encode) or received (decode) sequence"))
		.arg(Arg::with_name("error_rate")
			.long("error_rate")
			.help("Flip each bit independently with this probability instead of choosing a random error count")
			.takes_value(true))
		.arg(Arg::with_name("seed")
			.long("seed")
			.help("Seed for error simulation")
			.takes_value(true))
		.arg(Arg::with_name("json_spec")
			.short("j").long("json_spec")
			.help("JSON file with a polynomial and optional seed and error_rate")
			.takes_value(true))
		.arg(Arg::with_name("json")
			.long("json")
			.help("Write a JSON report to stdout"))
		.get_matches();

	// Optional specification file; command line arguments take precedence over it
	let opt_spec:Option<CodecSpec> = match matches.value_of("json_spec") {
		Some(fname) => {
			let file = File::open(fname).map_err(|_| "Unable to open JSON specification file")?;
			let reader = BufReader::new(file);
			Some(serde_json::from_reader(reader).map_err(|_| "Unable to parse JSON specification")?)
		},
		None => None
	};

	let poly_str:String = match (matches.value_of("polynomial"), &opt_spec) {
		(Some(p), _)          => p.to_string(),
		(None, Some(spec))    => spec.polynomial.clone(),
		(None, None)          => return Err("No polynomial provided; use --polynomial or --json_spec"),
	};
	let opt_seed:Option<u64> = match matches.value_of("seed") {
		Some(s) => Some(s.parse().map_err(|_| "Unable to parse seed as a u64")?),
		None    => opt_spec.as_ref().and_then(|spec| spec.seed),
	};
	let opt_error_rate:Option<f64> = match matches.value_of("error_rate") {
		Some(s) => Some(s.parse().map_err(|_| "Unable to parse error rate as an f64")?),
		None    => opt_spec.as_ref().and_then(|spec| spec.error_rate),
	};

	let mode:&str = matches.value_of("mode").ok_or("No mode provided")?;
	let data_str:&str = matches.value_of("data").ok_or("No data provided")?;
	let simulate:bool = matches.is_present("simulate_errors") || matches.is_present("error_rate");
	let json:bool = matches.is_present("json");

	let polynomial:Vec<bool> = parse_bits(&poly_str, "polynomial")?;
	let data:Vec<bool> = parse_bits(data_str, "data")?;
	let crc = Crc::new(&polynomial).map_err(|e| {
		eprintln!("{}", format!("{}", e).red());
		match e {
			CrcErr::DivisorDegenerate => "Polynomial must start with 1 and have at least two digits",
			_ => INVALID_INPUT,
		}
	})?;

	eprintln!("Polynomial {} (degree {}), {} {} bits", bits::to_string(crc.polynomial()), crc.degree(), mode, data.len());

	let mut rng:StdRng = match opt_seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None       => StdRng::from_entropy(),
	};
	let mut corrupt = |x:&mut Vec<bool>| -> Result<Vec<usize>, &'static str> {
		if !simulate { return Ok(vec![]); }
		let flipped = match opt_error_rate {
			Some(p) => corruption::binary_symmetric_channel(&mut rng, x, p).map_err(|_| "Error rate must be between 0 and 1")?,
			None    => corruption::simulate_errors(&mut rng, x),
		};
		eprintln!("{}", format!("Simulated errors at indices: {:?}", flipped).yellow());
		Ok(flipped)
	};

	let report = match mode {
		"encode" => {
			let check = crc.check_bits(&data);
			let mut encoded = crc.encode(&data);
			let flipped = corrupt(&mut encoded)?;

			if !json {
				println!("Encoded data: {}", bits::to_string(&encoded));
			}
			if let Ok(x) = bits::to_u64(&check) {
				eprintln!("{}", format!("Check value: {:#x}", x).green());
			}

			Report{ mode: mode.to_string(), polynomial: bits::to_string(crc.polynomial()), input: bits::to_string(&data),
				output: Some(bits::to_string(&encoded)), check_value: bits::to_u64(&check).ok(), flipped, error_detected: None }
		},
		_ => {
			let mut received = data.clone();
			let flipped = corrupt(&mut received)?;
			let error_detected = crc.decode(&received);

			if !json {
				if error_detected { println!("{}", "Errors detected. Data corrupted.".red()); }
				else              { println!("{}", "No errors detected. Data intact.".green()); }
			}

			Report{ mode: mode.to_string(), polynomial: bits::to_string(crc.polynomial()), input: bits::to_string(&received),
				output: None, check_value: None, flipped, error_detected: Some(error_detected) }
		}
	};

	if json {
		println!("{}", serde_json::to_string_pretty(&report).map_err(|_| "Unable to serialize report")?);
	}

	Ok(())

}
