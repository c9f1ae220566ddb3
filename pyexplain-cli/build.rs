use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the format names registered by pyexplain-render
// We need to duplicate this here since build scripts can't access the library
const FORMATS: &[&str] = &["html", "json", "markdown", "tag", "treeviz"];

fn format_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS))
        .value_hint(ValueHint::Other)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("pyexplain")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render beginner-friendly explanations of Python errors")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a pyexplain.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(format_arg("from", "Source format"))
                .arg(format_arg("to", "Target format"))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("explain")
                .about("Render the explanation for a Python error message")
                .arg(Arg::new("error").required(true).index(1))
                .arg(
                    Arg::new("response")
                        .long("response")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(format_arg("to", "Target format"))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("request")
                .about("Print the API request body asking for an explanation")
                .arg(Arg::new("error").required(true).index(1))
                .arg(
                    Arg::new("code")
                        .long("code")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available formats"))
        .subcommand(
            Command::new("generate-css").about("Output the default CSS used for HTML export"),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "pyexplain", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "pyexplain", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "pyexplain", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
