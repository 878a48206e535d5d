//! # repometrics
//!
//! A CLI tool for measuring repository scale per file extension.
//!
//! ## Overview
//!
//! repometrics is built on top of repometricslib. It counts files, lines,
//! characters and bytes for every extension in a repository, skipping what
//! Git ignores, and breaks selected extensions down into blank, comment and
//! code lines.
//!
//! ## Usage
//!
//! ```bash
//! # Measure the repository containing the current directory
//! repometrics
//!
//! # Group compound suffixes (.tar.gz) and write machine-readable copies
//! repometrics . --suffix-mode all --csv metrics.csv --json metrics.json
//!
//! # Walk the filesystem instead of asking Git
//! repometrics --mode walk --binary bytes
//!
//! # Break Python files down using '#' comments
//! repometrics --loc-exts py --comment-prefix '#'
//!
//! # Dump directories into single text files
//! repometrics concat --pair src tmp/src.txt --pair tests tmp/tests.txt
//! ```

use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use console::Style;
use repometricslib::options::{DEFAULT_COMMENT_PREFIX, DEFAULT_LOC_EXTS, DEFAULT_MAX_BYTES};
use repometricslib::{
    concat_directory, count_repository, render_skipped, render_table, write_csv, write_json,
    BinaryPolicy, CountOptions, EnumerationMode, FilterConfig, RepoMetricsError, SuffixMode,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Add the counting arguments shared by the root command and `count`.
fn count_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("path")
            .help("Path to the repository root or any subdirectory")
            .default_value("."),
    )
    .arg(
        Arg::new("root")
            .long("root")
            .conflicts_with("path")
            .help("Same as PATH"),
    )
    .arg(
        Arg::new("mode")
            .long("mode")
            .value_parser(["auto", "git", "walk"])
            .default_value("auto")
            .help("auto: git if available, else walk. git: require Git. walk: filesystem walk + root .gitignore only"),
    )
    .arg(
        Arg::new("suffix-mode")
            .long("suffix-mode")
            .value_parser(["last", "all"])
            .default_value("last")
            .help("Group by last suffix (.tar.gz -> .gz) or all suffixes (.tar.gz)"),
    )
    .arg(
        Arg::new("max-bytes")
            .long("max-bytes")
            .value_parser(value_parser!(u64))
            .value_name("BYTES")
            .help("Skip text counting for files larger than this many bytes (0 disables) [default: 5000000]"),
    )
    .arg(
        Arg::new("binary")
            .long("binary")
            .value_parser(["skip", "bytes"])
            .default_value("skip")
            .help("Binary handling: skip, or count bytes as chars with zero lines"),
    )
    .arg(
        Arg::new("csv")
            .long("csv")
            .value_name("PATH")
            .help("Write results to a CSV file"),
    )
    .arg(
        Arg::new("json")
            .long("json")
            .value_name("PATH")
            .help("Write results to a JSON file"),
    )
    .arg(
        Arg::new("loc-exts")
            .long("loc-exts")
            .default_value(DEFAULT_LOC_EXTS)
            .help("Extensions to compute blank/comment/code for (comma-separated)"),
    )
    .arg(
        Arg::new("comment-prefix")
            .long("comment-prefix")
            .default_value(DEFAULT_COMMENT_PREFIX)
            .allow_hyphen_values(true)
            .help("Comment prefix for the blank/comment/code breakdown"),
    )
    .arg(
        Arg::new("no-loc")
            .long("no-loc")
            .action(ArgAction::SetTrue)
            .help("Disable blank/comment/code columns"),
    )
    .arg(
        Arg::new("include")
            .short('i')
            .long("include")
            .action(ArgAction::Append)
            .help("Include only files matching glob pattern"),
    )
    .arg(
        Arg::new("exclude")
            .short('e')
            .long("exclude")
            .action(ArgAction::Append)
            .help("Exclude files matching glob pattern"),
    )
    .arg(verbose_arg())
}

fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue)
        .help("Log progress to stderr")
}

/// Build the clap Command structure
fn build_command() -> Command {
    count_args(
        Command::new("repometrics")
            .version(env!("CARGO_PKG_VERSION"))
            .author("Arthur Debert")
            .about("Count files, lines, chars and bytes per extension for files not ignored by Git"),
    )
    .subcommand(count_args(
        Command::new("count").about("Count per-extension metrics (default command)"),
    ))
    .subcommand(
        Command::new("concat")
            .about("Concatenate every file under a directory into one text file")
            .arg(
                Arg::new("pair")
                    .short('p')
                    .long("pair")
                    .num_args(2)
                    .value_names(["SRC", "OUT"])
                    .action(ArgAction::Append)
                    .required(true)
                    .help("Source directory and output file (can be specified multiple times)"),
            )
            .arg(verbose_arg()),
    )
}

fn patterns<'a>(matches: &'a ArgMatches, id: &str) -> Vec<&'a str> {
    matches
        .get_many::<String>(id)
        .map(|v| v.map(|s| s.as_str()).collect())
        .unwrap_or_default()
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> Result<FilterConfig, anyhow::Error> {
    let filter = FilterConfig::new()
        .include_many(&patterns(matches, "include"))?
        .exclude_many(&patterns(matches, "exclude"))?;

    Ok(filter)
}

/// Fetch a string argument, parsed through its `FromStr`.
fn parsed<T>(matches: &ArgMatches, id: &str) -> Result<T, anyhow::Error>
where
    T: std::str::FromStr<Err = String>,
{
    let raw = matches
        .get_one::<String>(id)
        .with_context(|| format!("missing --{}", id))?;
    raw.parse::<T>().map_err(anyhow::Error::msg)
}

/// Build count options from matches
fn count_options(matches: &ArgMatches) -> Result<CountOptions, anyhow::Error> {
    let options = CountOptions::new()
        .mode(parsed::<EnumerationMode>(matches, "mode")?)
        .suffix_mode(parsed::<SuffixMode>(matches, "suffix-mode")?)
        .binary(parsed::<BinaryPolicy>(matches, "binary")?)
        .max_bytes(
            matches
                .get_one::<u64>("max-bytes")
                .copied()
                .unwrap_or(DEFAULT_MAX_BYTES),
        )
        .loc_exts(
            matches
                .get_one::<String>("loc-exts")
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_LOC_EXTS),
        )
        .comment_prefix(
            matches
                .get_one::<String>("comment-prefix")
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_COMMENT_PREFIX),
        )
        .show_loc(!matches.get_flag("no-loc"))
        .filter(build_filter(matches)?);
    Ok(options)
}

/// Bold the header and totals rows when stdout is a terminal.
fn style_table(table: &str) -> String {
    let bold = Style::new().bold();
    let last = table.lines().count().saturating_sub(1);
    table
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || i == last {
                format!("{}\n", bold.apply_to(line))
            } else {
                format!("{}\n", line)
            }
        })
        .collect()
}

/// Handler for count command
fn count_handler(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let path = matches
        .get_one::<String>("root")
        .or_else(|| matches.get_one::<String>("path"))
        .map(|s| s.as_str())
        .unwrap_or(".");
    let options = count_options(matches)?;
    debug!(path, mode = %options.mode, "counting");

    let result = count_repository(path, &options)?;

    print!("{}", style_table(&render_table(&result.stats, options.show_loc)));

    let skipped = render_skipped(&result.skipped);
    if !skipped.is_empty() {
        println!();
        print!("{}", skipped);
    }

    if let Some(csv) = matches.get_one::<String>("csv") {
        write_csv(csv, &result.stats, options.show_loc)
            .with_context(|| format!("failed to write CSV to '{}'", csv))?;
    }
    if let Some(json) = matches.get_one::<String>("json") {
        write_json(json, &result.stats, options.show_loc)
            .with_context(|| format!("failed to write JSON to '{}'", json))?;
    }

    Ok(())
}

/// Handler for concat command
///
/// A pair that fails is reported on stderr; the remaining pairs still run.
fn concat_handler(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let values: Vec<&String> = matches
        .get_many::<String>("pair")
        .map(|v| v.collect())
        .unwrap_or_default();

    debug!(pairs = values.len() / 2, "concatenating");
    for pair in values.chunks(2) {
        let [source, output] = pair else {
            continue;
        };
        match concat_directory(source.as_str(), output.as_str()) {
            Ok(summary) => println!(
                "Wrote {} files from '{}' to '{}'",
                summary.files,
                summary.source.display(),
                summary.output.display()
            ),
            Err(RepoMetricsError::NotADirectory(dir)) => {
                eprintln!("Error: directory '{}' not found, skipping", dir.display());
            }
            Err(e) => {
                eprintln!("Error: could not write '{}': {}", output, e);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Configuration problems exit with 2, everything else with 1.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<RepoMetricsError>() {
        Some(e) if e.is_configuration() => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();

    let (handler, sub): (fn(&ArgMatches) -> Result<(), anyhow::Error>, &ArgMatches) =
        match matches.subcommand() {
            Some(("count", sub)) => (count_handler, sub),
            Some(("concat", sub)) => (concat_handler, sub),
            _ => (count_handler, &matches),
        };

    init_tracing(sub.get_flag("verbose"));

    match handler(sub) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code_for(&e)
        }
    }
}
