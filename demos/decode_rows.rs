//! Decode captures given in `{bits}hex` notation
//!
//! ```text
//! RUST_LOG=debug cargo run --example decode_rows -- '{224}aaaa2dd4ee937f...'
//! ```
//!
//! Each argument is one capture; rows within a capture are separated by `/`.

use bresser5in1::{BitBuffer, Bresser5in1, Decoder};
use clap::Parser;

#[derive(Parser)]
#[command(name = "decode_rows")]
#[command(about = "Decode Bresser 5-in-1 captures given in {bits}hex notation")]
struct Args {
    /// Captures to decode, rows separated by `/`
    #[arg(required = true)]
    captures: Vec<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let decoder = Bresser5in1;
    let mut failures = 0;
    for text in &args.captures {
        let result = text
            .parse::<BitBuffer>()
            .and_then(|capture| decoder.decode(&capture));

        match result {
            Ok(record) => println!("{}", record),
            Err(e) => {
                failures += 1;
                eprintln!("{}: {} (status {})", decoder.name(), e, e.status());
            }
        }
    }

    if failures == args.captures.len() {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_captures_required() {
        assert!(Args::try_parse_from(["decode_rows"]).is_err());

        let args = Args::try_parse_from(["decode_rows", "{8}ff", "{4}a0/{8}ff"]).unwrap();
        assert_eq!(args.captures, ["{8}ff", "{4}a0/{8}ff"]);
    }
}
