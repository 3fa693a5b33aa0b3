//! `bson-dump`: decode one BSON document (file or stdin) and print it.
//!
//! Usage:
//!   bson-dump [--repr ordered|unordered|raw] [--max-depth N] [FILE]
//!
//! Built only with the `cli` feature: `cargo run -p mgobson --features cli --bin bson-dump`.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use mgobson::{BsonDocument, DecodeOptions, OrderedDocument, RawDocument, UnorderedDocument};

/// Decode a BSON document and print it in the chosen representation.
#[derive(Parser, Debug)]
#[command(name = "bson-dump")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Document representation to decode into
    #[arg(short, long, value_enum, default_value = "ordered")]
    repr: Repr,

    /// Maximum nesting depth accepted while decoding
    #[arg(long, default_value_t = mgobson::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Input file; stdin when omitted
    file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Repr {
    /// Ordered document, element order preserved
    Ordered,
    /// Unordered document (map)
    Unordered,
    /// Raw elements: type tag and payload bytes
    Raw,
}

fn read_input(file: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    match file {
        Some(path) => std::fs::read(path),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(" ")
}

fn dump(bytes: &[u8], repr: Repr, options: &DecodeOptions) -> mgobson::Result<String> {
    Ok(match repr {
        Repr::Ordered => {
            let mut doc = OrderedDocument::new();
            doc.from_bytes_with_options(bytes, options)?;
            format!("{doc:#?}")
        }
        Repr::Unordered => {
            let mut doc = UnorderedDocument::new();
            doc.from_bytes_with_options(bytes, options)?;
            format!("{doc:#?}")
        }
        Repr::Raw => {
            let mut doc = RawDocument::new();
            doc.from_bytes_with_options(bytes, options)?;
            doc.iter()
                .map(|e| format!("{} 0x{:02x} [{}]", e.name, e.value.kind, hex(&e.value.data)))
                .collect::<Vec<_>>()
                .join("\n")
        }
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let bytes = match read_input(cli.file.as_ref()) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match dump(&bytes, cli.repr, &DecodeOptions::with_max_depth(cli.max_depth)) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("invalid BSON: {e}");
            ExitCode::FAILURE
        }
    }
}
