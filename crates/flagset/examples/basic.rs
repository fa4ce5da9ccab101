//! A small file-fetcher command line built on `flagset`.
//!
//! Try it with:
//!
//! ```text
//! cargo run --example basic -- -v --jobs 8 --timeout 2m30s --header k=v a.txt b.txt
//! cargo run --example basic -- --help
//! ```

use std::process::ExitCode;
use std::time::Duration;

use flagset::{ErrorHandling, Flag, FlagSet, ParseOutcome};
use flagset::values::{BoolValue, StringValue};
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn build_flags() -> FlagSet {
    let mut flags = FlagSet::new("basic", ErrorHandling::Continue);
    flags
        .add_flag(
            Flag::new("verbose", "explain what is being done", BoolValue::new(false))
                .shorthand('v')
                .negatable(),
        )
        .unwrap();
    flags
        .add_flag(
            Flag::new("output", "write results to this file", StringValue::new("-"))
                .shorthand('o'),
        )
        .unwrap();
    flags.i64("jobs", 4, "number of parallel downloads").unwrap();
    flags
        .duration("timeout", Duration::from_secs(30), "per-request timeout")
        .unwrap();
    flags
        .string_slice("header", &[], "extra key=value request header (repeatable)")
        .unwrap();
    flags.count("debug", "increase debug detail").unwrap();
    flags
}

fn main() -> ExitCode {
    init_tracing();

    let mut flags = build_flags();
    match flags.parse_env() {
        Ok(ParseOutcome::Help) => return ExitCode::SUCCESS,
        Ok(ParseOutcome::Parsed) => {}
        // Usage and the message were already printed to the sink.
        Err(_) => return ExitCode::from(2),
    }

    tracing::info!(files = flags.args().len(), "starting fetch");
    println!("verbose: {}", flags.get_bool("verbose").unwrap());
    println!("output:  {}", flags.get_string("output").unwrap());
    println!("jobs:    {}", flags.get_i64("jobs").unwrap());
    println!("timeout: {:?}", flags.get_duration("timeout").unwrap());
    println!("headers: {:?}", flags.get_string_slice("header").unwrap());
    println!("debug:   {}", flags.get_count("debug").unwrap());
    println!("files:   {:?}", flags.args());
    ExitCode::SUCCESS
}
