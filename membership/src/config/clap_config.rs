use clap::{crate_version, Arg, Command};

use super::{LogFormat, LogLevel};

/// Low-level `clap` object which provides with `value_source` which
/// indicates whether an option was set by the user (cli/env) or by the
/// default value.
///
/// This also encapsulates the configuration that is supported for the cli, env,
/// and TOML (file-based) configuration.
pub(super) fn command() -> Command {
    Command::new("membership")
        .about("Build membership Merkle trees and circuit inputs from a member list")
        .version(crate_version!()) // pick the version from `Cargo.toml`
        .propagate_version(true)
        .subcommand(
            Command::new("hash-leaves")
                .about("Hash data/addresses.json into data/hashedLeaves.json"),
        )
        .subcommand(
            Command::new("prove")
                .about("Write inputs/membership_input.json from the fixed-depth tree"),
        )
        .subcommand(
            Command::new("prove-incremental")
                .about("Write inputs/membership_input_LIMT.json from the incremental tree"),
        )
        .subcommand(Command::new("verify").about("Check a circuit input file against the tree"))
        .subcommand(
            Command::new("calldata")
                .about("Format exported verifier calldata, with tampered negative fixtures"),
        )
        .arg(
            Arg::new("root-dir")
                .help("Root directory that the data, inputs and build directories live in")
                .short('r')
                .long("root-dir")
                .value_name("ROOT_DIR")
                .env("ROOT_DIR")
                .value_parser(clap::value_parser!(String))
                .default_value("."),
        )
        .arg(
            Arg::new("log-level")
                .help("Log level")
                .long("log-level")
                .value_name("LOG_LEVEL")
                .env("LOG_LEVEL")
                .value_parser(clap::builder::EnumValueParser::<LogLevel>::new())
                .default_value("INFO"),
        )
        .arg(
            Arg::new("log-format")
                .help("Log format")
                .long("log-format")
                .value_name("LOG_FORMAT")
                .env("LOG_FORMAT")
                .value_parser(clap::builder::EnumValueParser::<LogFormat>::new())
                .default_value("PRETTY"),
        )
        .arg(
            Arg::new("depth")
                .help("Number of levels between the leaves and the root")
                .long("depth")
                .value_name("TREE_DEPTH")
                .env("TREE_DEPTH")
                .value_parser(clap::value_parser!(usize))
                .default_value("5"),
        )
        .arg(
            Arg::new("arity")
                .help("Number of children of each node")
                .long("arity")
                .value_name("TREE_ARITY")
                .env("TREE_ARITY")
                .value_parser(clap::value_parser!(usize))
                .default_value("2"),
        )
        .arg(
            Arg::new("zero")
                .help("Value of an empty leaf slot, as a decimal string")
                .long("zero")
                .value_name("TREE_ZERO")
                .env("TREE_ZERO")
                .value_parser(clap::value_parser!(String))
                .default_value("0"),
        )
        .arg(
            Arg::new("index")
                .help("Index of the leaf to generate a proof for")
                .short('i')
                .long("index")
                .value_name("LEAF_INDEX")
                .env("LEAF_INDEX")
                .value_parser(clap::value_parser!(usize))
                .default_value("0"),
        )
        .arg(
            Arg::new("proof-file")
                .help("Circuit input file to verify, relative to the root directory")
                .long("proof-file")
                .value_name("PROOF_FILE")
                .env("PROOF_FILE")
                .value_parser(clap::value_parser!(String))
                .default_value("inputs/membership_input.json"),
        )
}
