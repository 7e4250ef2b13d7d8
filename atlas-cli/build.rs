use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of atlas_babel::FormatId::ALL
// We need to duplicate this here since build scripts can't access the library crates
const FORMATS: &[&str] = &["md", "adf", "wiki"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("atlas")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert documents between Markdown, ADF and Jira wiki markup")
        .arg(
            Arg::new("from")
                .help("Format of the document on stdin")
                .required_unless_present("list-formats")
                .value_parser(clap::builder::PossibleValuesParser::new(FORMATS))
                .index(1)
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("to")
                .help("Format to write to stdout")
                .required_unless_present("list-formats")
                .value_parser(clap::builder::PossibleValuesParser::new(FORMATS))
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
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "atlas", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "atlas", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "atlas", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
