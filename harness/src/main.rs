//! Runs the struct-field conformance check once and prints its outcome.
//!
//! ```text
//! struct-field-harness [I L [EXPECTED_I EXPECTED_L]]
//! ```
//!
//! Values are decimal or `0x`-prefixed hexadecimal bit patterns.

use std::process::ExitCode;

use colored::Colorize;
use struct_field_conformance::{DiagnosticSink, HarnessConfig, Simple, TestResult, UnitTest};

const USAGE: &str = "usage: struct-field-harness [I L [EXPECTED_I EXPECTED_L]]";

/// Prints diagnostics to stderr the way the device debug channel shows them.
struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn emit(&mut self, label: &str, value: u32) {
        eprintln!("{} {label} {value} {value:#010x}", "rsDebug".dimmed());
    }
}

#[allow(clippy::cast_possible_wrap)]
fn parse_i32(arg: &str) -> Result<i32, String> {
    match arg.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16).map(|bits| bits as i32),
        None => arg.parse(),
    }
    .map_err(|err| format!("invalid 32-bit value '{arg}': {err}"))
}

#[allow(clippy::cast_possible_wrap)]
fn parse_i64(arg: &str) -> Result<i64, String> {
    match arg.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16).map(|bits| bits as i64),
        None => arg.parse(),
    }
    .map_err(|err| format!("invalid 64-bit value '{arg}': {err}"))
}

fn parse_config(args: &[String]) -> Result<HarnessConfig, String> {
    match args {
        [] => Ok(HarnessConfig::default()),
        [i, l] => Ok(HarnessConfig::matching(Simple::new(
            parse_i32(i)?,
            parse_i64(l)?,
        ))),
        [i, l, expected_i, expected_l] => Ok(HarnessConfig::matching(Simple::new(
            parse_i32(i)?,
            parse_i64(l)?,
        ))
        .with_expected(parse_i32(expected_i)?, parse_i64(expected_l)?)),
        _ => Err(String::from("expected zero, two, or four values")),
    }
}

fn main() -> ExitCode {
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    let config = match parse_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}: {err}\n{USAGE}", "error".red().bold());
            return ExitCode::from(2);
        },
    };

    println!(
        "Running {} with {} ...",
        config.name.bold(),
        config.written.to_string().underline()
    );

    let mut test = UnitTest::new(config, ConsoleSink);

    match test.run() {
        Ok(TestResult::Passed) => {
            println!("{}", TestResult::Passed.to_string().green().bold());
            ExitCode::SUCCESS
        },
        Ok(result) => {
            println!("{}", result.to_string().red().bold());
            ExitCode::FAILURE
        },
        Err(err) => {
            eprintln!("{}: {err}", "error".red().bold());
            ExitCode::FAILURE
        },
    }
}

#[test]
fn should_parse_hex_bit_patterns() {
    assert_eq!(parse_i32("0xFFFFFFFF"), Ok(-1));
    assert_eq!(parse_i64("0x8000000000000000"), Ok(i64::MIN));
    assert_eq!(parse_i64("-5"), Ok(-5));
    assert!(parse_i32("0x1FFFFFFFF").is_err());
}

#[test]
fn should_build_configs_from_positional_values() {
    let args = ["7", "0x10", "7", "0x11"].map(String::from);
    let config = parse_config(&args).unwrap();

    assert_eq!(config.written, Simple::new(7, 16));
    assert_eq!((config.expected_i, config.expected_l), (7, 17));

    assert_eq!(
        parse_config(&[]).unwrap().written,
        HarnessConfig::default().written
    );
    assert!(parse_config(&[String::from("1")]).is_err());
}
