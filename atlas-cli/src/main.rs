// Command-line interface for atlas
//
// Converts a document read from stdin between Markdown, the Atlassian Document Format
// and Jira wiki markup, and writes the result to stdout. The conversion itself lives in
// atlas-babel; this binary only resolves arguments, reads input and reports errors.
//
// Usage:
//  atlas <from> <to> < input        - Convert stdin from one format to another
//  atlas --list-formats             - List supported formats
//
// Configuration is read from the built-in defaults, then ./atlas.toml if present, then
// the file given with --config. RUST_LOG overrides the configured log level.

mod logging;

use anyhow::{Context, Result};
use atlas_babel::common::text::normalize_input;
use atlas_babel::{convert, ConvertOptions, FormatId};
use atlas_config::{AtlasConfig, Loader, LOCAL_CONFIG_FILE};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::io::{self, Read, Write};
use std::process::ExitCode;

fn build_cli() -> Command {
    Command::new("atlas")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert documents between Markdown, ADF and Jira wiki markup")
        .long_about(
            "atlas reads a document on stdin and writes it to stdout in another format.\n\n\
            Formats:\n  \
            - md:   CommonMark Markdown with GFM tables\n  \
            - adf:  Atlassian Document Format (JSON)\n  \
            - wiki: Jira / Confluence wiki markup\n\n\
            Examples:\n  \
            atlas md adf < README.md           # Markdown to ADF JSON\n  \
            atlas adf wiki < issue.json        # ADF to wiki markup\n  \
            atlas --list-formats               # Show supported formats",
        )
        .arg(
            Arg::new("from")
                .help("Format of the document on stdin (md, adf, wiki)")
                .required_unless_present("list-formats")
                .index(1)
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("to")
                .help("Format to write to stdout (md, adf, wiki)")
                .required_unless_present("list-formats")
                .index(2)
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an atlas.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List supported formats")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> ExitCode {
    // Usage errors (missing arguments) exit here with clap's status
    let matches = build_cli().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = load_cli_config(matches.get_one::<String>("config").map(String::as_str))?;
    logging::init(&config.logging.level);
    tracing::debug!(
        max_output_chars = config.convert.max_output_chars,
        pretty = config.convert.adf.pretty,
        "configuration loaded"
    );

    if matches.get_flag("list-formats") {
        return handle_list_formats_command();
    }

    // Resolve both formats before touching stdin
    let from = resolve_format(matches, "from")?;
    let to = resolve_format(matches, "to")?;
    tracing::debug!(%from, %to, "formats resolved");

    let source = read_stdin()?;
    tracing::debug!(bytes = source.len(), "read stdin");
    let options = ConvertOptions::from(&config.convert);
    let output = convert(&source, from, to, &options)
        .with_context(|| format!("converting {from} to {to}"))?;

    writeln!(io::stdout().lock(), "{output}").context("writing the converted document")?;
    Ok(())
}

fn resolve_format(matches: &ArgMatches, arg: &str) -> Result<FormatId> {
    let name = matches
        .get_one::<String>(arg)
        .with_context(|| format!("missing <{arg}> format"))?;
    Ok(name.parse::<FormatId>()?)
}

/// Drain stdin to end-of-stream; the lock is released when this returns
fn read_stdin() -> Result<String> {
    let mut raw = String::new();
    io::stdin()
        .lock()
        .read_to_string(&mut raw)
        .context("reading the document from stdin")?;
    Ok(normalize_input(&raw))
}

fn handle_list_formats_command() -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Available formats:\n")?;
    for id in FormatId::ALL {
        writeln!(stdout, "  {:<6} {}", id.name(), id.format().description())?;
    }
    Ok(())
}

fn load_cli_config(explicit_path: Option<&str>) -> Result<AtlasConfig> {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().context("failed to load configuration")
}
