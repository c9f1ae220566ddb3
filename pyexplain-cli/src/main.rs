// Command-line interface for pyexplain
//
// This binary renders Python error explanations: Markdown (from a model answer, the canned
// fallback table or a file) is turned into display blocks and written out in one of the
// registered formats.
//
// The core capabilities use the pyexplain-render crate. This crate only wires that library to
// files, stdin/stdout, configuration and logging.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension, while being overwrittable by an explicit --from flag.
// Usage:
//  pyexplain <input> --to <format> [--from <format>] [--output <file>]          - Convert between formats (default)
//  pyexplain convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  pyexplain explain <error> [--response <file.json>] [--to <format>]           - Render the explanation for an error
//  pyexplain request <error> [--code <file.py>]                                 - Print the API request body
//  pyexplain list-formats                                                       - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  pyexplain notes.md --to html --extra-standalone --extra-title "Oops"

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use pyexplain_config::{Loader, PyexplainConfig};
use pyexplain_render::explain::{build_request, resolve, PromptTemplate};
use pyexplain_render::{Document, FormatRegistry};
use std::collections::HashMap;
use std::fs;
use std::io::{self, IsTerminal};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &[
    "convert",
    "explain",
    "request",
    "list-formats",
    "generate-css",
    "help",
];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            // A following token that is not a flag is the value
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("pyexplain")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render beginner-friendly explanations of Python errors")
        .long_about(
            "pyexplain renders the Markdown explanation of a Python error into display blocks\n\
            and writes them as HTML, JSON, Markdown or a debugging view.\n\n\
            Commands:\n  \
            - convert: Render a Markdown file into another format (default command)\n  \
            - explain: Render the explanation for an error message\n  \
            - request: Print the generative-language API request for an error message\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            pyexplain notes.md --to html                          # Markdown file to HTML (stdout)\n  \
            pyexplain explain \"NameError: name 'x' is not defined\" # Canned explanation as HTML\n  \
            pyexplain explain \"$ERR\" --response answer.json -o out.html\n  \
            pyexplain request \"ZeroDivisionError: division by zero\"",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a pyexplain.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more to stderr (repeat for more detail; RUST_LOG takes precedence)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Render a Markdown document (or re-read a JSON block dump) and write it in\n\
                    another format.\n\n\
                    Supported formats:\n  \
                    - markdown: Markdown (.md), input and output\n  \
                    - json:     Block list as JSON (.json), input and output\n  \
                    - html:     HTML fragment or standalone page (.html)\n  \
                    - tag:      XML-like tag dump\n  \
                    - treeviz:  Tree visualization\n\n\
                    The source format is auto-detected from the file extension. Use '-' to read\n\
                    Markdown from stdin. Output goes to stdout by default, or use -o.\n\n\
                    Examples:\n  \
                    pyexplain convert notes.md --to html -o notes.html\n  \
                    cat notes.md | pyexplain convert - --to treeviz\n  \
                    pyexplain notes.md --to json                 # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or '-' for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("explain")
                .about("Render the explanation for a Python error message")
                .long_about(
                    "Resolve the explanation for an error message and render it.\n\n\
                    With --response, the explanation text is read from a generative-language API\n\
                    response body (candidates[0].content.parts[0].text). Without it, or when the\n\
                    response holds an error or no text, the built-in explanation for the error\n\
                    kind is used (ZeroDivisionError, NameError, or a generic analysis).\n\n\
                    Examples:\n  \
                    pyexplain explain \"ZeroDivisionError: division by zero\"\n  \
                    pyexplain explain \"$ERR\" --response answer.json --to treeviz",
                )
                .arg(
                    Arg::new("error")
                        .help("The error message, e.g. \"NameError: name 'x' is not defined\"")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("response")
                        .long("response")
                        .value_name("FILE")
                        .help("API response body to take the explanation from")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (defaults to explain.default_format)")
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("request")
                .about("Print the API request body asking for an explanation")
                .arg(
                    Arg::new("error")
                        .help("The error message to explain")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("code")
                        .long("code")
                        .value_name("FILE")
                        .help("Python source to send along with the error")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available formats"))
        .subcommand(
            Command::new("generate-css")
                .about("Output the default CSS used for HTML export")
                .long_about(
                    "Outputs the baseline CSS embedded in standalone HTML pages.\n\n\
                    Use this as a starting point for custom styling. Save it, edit it, then point\n\
                    convert.html.custom_css (or --extra-css-path) at the file to extend the\n\
                    default styles.",
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A first argument that is not a subcommand is taken as the convert input
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_count("verbose"));

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    let target = target_format(&matches, &config);
    apply_config_overrides(&mut config, &mut extra_params, target.as_deref());

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let to = required(sub_matches, "to");
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => detect_source_format(input),
            };
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("explain", sub_matches)) => {
            let error = required(sub_matches, "error");
            let response = sub_matches
                .get_one::<String>("response")
                .map(|s| s.as_str());
            let to = target.unwrap_or_else(|| config.explain.default_format.clone());
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_explain_command(error, response, &to, output, &extra_params, &config);
        }
        Some(("request", sub_matches)) => {
            let error = required(sub_matches, "error");
            let code = sub_matches.get_one::<String>("code").map(|s| s.as_str());
            handle_request_command(error, code, &config);
        }
        Some(("list-formats", _)) => handle_list_formats_command(),
        Some(("generate-css", _)) => handle_generate_css_command(),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value,
        None => {
            eprintln!("Error: missing required argument '{name}'");
            std::process::exit(1);
        }
    }
}

fn default_log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn detect_source_format(input: &str) -> String {
    if input == "-" {
        return "markdown".to_string();
    }
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) => {
            debug!(format = %detected, "detected source format");
            detected
        }
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn read_input(input: &str) -> String {
    let result = if input == "-" {
        io::read_to_string(io::stdin())
    } else {
        fs::read_to_string(input)
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    })
}

fn write_output(output: Option<&str>, text: &str) {
    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
            info!(path, bytes = text.len(), "wrote output");
        }
        None => print!("{text}"),
    }
}

/// Serialize with config-derived options for `to`, overridden by --extra-* parameters.
fn serialize_document(
    registry: &FormatRegistry,
    doc: &Document,
    to: &str,
    extra_params: &HashMap<String, String>,
    config: &PyexplainConfig,
) -> String {
    let mut format_options = format_params_from_config(config, to);
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }
    registry
        .serialize_with_options(doc, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        })
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &PyexplainConfig,
) {
    let registry = FormatRegistry::default();

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_input(input);

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });
    info!(from, to, blocks = doc.len(), "converting");

    let result = serialize_document(&registry, &doc, to, extra_params, config);
    write_output(output, &result);
}

/// Handle the explain command
fn handle_explain_command(
    error_message: &str,
    response: Option<&str>,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &PyexplainConfig,
) {
    let registry = FormatRegistry::default();
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let body = response.map(read_input);
    let explanation = resolve(error_message, body.as_deref());
    info!(source = ?explanation.source, "resolved explanation");

    let result = serialize_document(&registry, &explanation.document(), to, extra_params, config);
    write_output(output, &result);
}

/// Handle the request command
fn handle_request_command(error_message: &str, code: Option<&str>, config: &PyexplainConfig) {
    let code = code.map(read_input);
    let template = PromptTemplate::from(&config.explain);
    let request = build_request(error_message, code.as_deref(), &template);

    let json = serde_json::to_string_pretty(&request).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    println!("{json}");
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let direction = match (format.supports_parsing(), format.supports_serialization()) {
            (true, true) => "in/out",
            (true, false) => "in",
            (false, true) => "out",
            (false, false) => "-",
        };
        println!("  {name:<10} {direction:<7} {}", format.description());
    }
}

/// Handle the generate-css command
fn handle_generate_css_command() {
    print!("{}", pyexplain_render::formats::get_default_css());
}

fn load_cli_config(explicit_path: Option<&str>) -> PyexplainConfig {
    let loader = Loader::new().with_optional_file("pyexplain.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Format the subcommand serializes to, if any.
fn target_format(matches: &ArgMatches, config: &PyexplainConfig) -> Option<String> {
    match matches.subcommand() {
        Some(("convert", sub)) => sub.get_one::<String>("to").cloned(),
        Some(("explain", sub)) => Some(
            sub.get_one::<String>("to")
                .cloned()
                .unwrap_or_else(|| config.explain.default_format.clone()),
        ),
        _ => None,
    }
}

/// Move --extra-* parameters that have a config key for the target format into the config.
///
/// What remains in `extra_params` is handed to the format untouched, so a config-backed
/// parameter aimed at another format is rejected by the target like any unknown one.
fn apply_config_overrides(
    config: &mut PyexplainConfig,
    extra_params: &mut HashMap<String, String>,
    to: Option<&str>,
) {
    match to {
        Some("html") => {
            if let Some(raw) = extra_params.remove("standalone") {
                config.convert.html.standalone = parse_bool_arg("standalone", &raw);
            }
            if let Some(title) = extra_params.remove("title") {
                config.convert.html.title = title;
            }
            if let Some(path) = take_override(extra_params, &["css", "css-path"]) {
                config.convert.html.custom_css = Some(path);
            }
        }
        Some("json") => {
            if let Some(raw) = extra_params.remove("pretty") {
                config.convert.json.pretty = parse_bool_arg("pretty", &raw);
            }
        }
        Some("treeviz") => {
            if let Some(raw) = take_override(extra_params, &["label-width", "width"]) {
                config.convert.treeviz.label_width = raw.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid number '{raw}' for --extra-label-width");
                    std::process::exit(1);
                });
            }
        }
        _ => {}
    }
}

/// Format options the configuration implies for the target format.
fn format_params_from_config(config: &PyexplainConfig, to: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    match to {
        "html" => {
            let html = &config.convert.html;
            params.insert("standalone".to_string(), html.standalone.to_string());
            params.insert("title".to_string(), html.title.clone());
            if let Some(css_path) = &html.custom_css {
                let css = fs::read_to_string(css_path).unwrap_or_else(|e| {
                    eprintln!("Error reading CSS file '{css_path}': {e}");
                    std::process::exit(1);
                });
                params.insert("custom-css".to_string(), css);
            }
        }
        "json" => {
            params.insert("pretty".to_string(), config.convert.json.pretty.to_string());
        }
        "treeviz" => {
            params.insert(
                "label-width".to_string(),
                config.convert.treeviz.label_width.to_string(),
            );
        }
        _ => {}
    }
    params
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_extra_args_empty() {
        let input = args(&["pyexplain", "convert", "notes.md"]);
        let (cleaned, extra) = parse_extra_args(&input);

        assert_eq!(cleaned, input);
        assert!(extra.is_empty());
    }

    #[test]
    fn test_parse_extra_args_mixed_with_regular_args() {
        let input = args(&[
            "pyexplain",
            "convert",
            "notes.md",
            "--to",
            "html",
            "--extra-title",
            "Oops",
            "--from",
            "markdown",
        ]);
        let (cleaned, extra) = parse_extra_args(&input);

        assert_eq!(
            cleaned,
            args(&[
                "pyexplain",
                "convert",
                "notes.md",
                "--to",
                "html",
                "--from",
                "markdown",
            ])
        );
        assert_eq!(extra.len(), 1);
        assert_eq!(extra.get("title"), Some(&"Oops".to_string()));
    }

    #[test]
    fn test_parse_extra_args_boolean_flags() {
        let input = args(&[
            "pyexplain",
            "notes.md",
            "--extra-standalone",
            "--extra-label-width",
            "12",
            "--extra-pretty",
        ]);
        let (cleaned, extra) = parse_extra_args(&input);

        assert_eq!(cleaned, args(&["pyexplain", "notes.md"]));
        assert_eq!(extra.len(), 3);
        assert_eq!(extra.get("standalone"), Some(&"true".to_string()));
        assert_eq!(extra.get("label-width"), Some(&"12".to_string()));
        assert_eq!(extra.get("pretty"), Some(&"true".to_string()));
    }

    #[test]
    fn test_parse_extra_args_allows_extras_alias() {
        let input = args(&[
            "pyexplain",
            "convert",
            "notes.md",
            "--extras-css-path",
            "site.css",
        ]);
        let (cleaned, extra) = parse_extra_args(&input);

        assert_eq!(cleaned, args(&["pyexplain", "convert", "notes.md"]));
        assert_eq!(extra.get("css-path"), Some(&"site.css".to_string()));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_explain_to_is_optional() {
        let matches = build_cli()
            .try_get_matches_from(["pyexplain", "explain", "NameError: x"])
            .expect("explain without --to to parse");
        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, "explain");
        assert_eq!(sub.get_one::<String>("to"), None);
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(default_log_level(0), "warn");
        assert_eq!(default_log_level(1), "info");
        assert_eq!(default_log_level(2), "debug");
        assert_eq!(default_log_level(7), "trace");
    }

    #[test]
    fn apply_config_overrides_updates_known_flags() {
        let mut config = load_cli_config(None);
        let mut extras = HashMap::new();
        extras.insert("standalone".to_string(), "yes".to_string());
        extras.insert("css-path".to_string(), "custom.css".to_string());
        apply_config_overrides(&mut config, &mut extras, Some("html"));
        assert!(config.convert.html.standalone);
        assert_eq!(config.convert.html.custom_css.as_deref(), Some("custom.css"));
        assert!(extras.is_empty());

        extras.insert("pretty".to_string(), "false".to_string());
        apply_config_overrides(&mut config, &mut extras, Some("json"));
        assert!(!config.convert.json.pretty);
        assert!(extras.is_empty());

        extras.insert("label-width".to_string(), "8".to_string());
        apply_config_overrides(&mut config, &mut extras, Some("treeviz"));
        assert_eq!(config.convert.treeviz.label_width, 8);
        assert!(extras.is_empty());
    }

    #[test]
    fn apply_config_overrides_leaves_other_formats_flags() {
        let mut config = load_cli_config(None);
        let mut extras = HashMap::new();
        extras.insert("standalone".to_string(), "true".to_string());
        extras.insert("pretty".to_string(), "false".to_string());

        apply_config_overrides(&mut config, &mut extras, Some("tag"));

        assert!(!config.convert.html.standalone);
        assert!(config.convert.json.pretty);
        assert_eq!(extras.len(), 2);
    }

    #[test]
    fn apply_config_overrides_keeps_unknown_params() {
        let mut config = load_cli_config(None);
        let mut extras = HashMap::new();
        extras.insert("custom-css".to_string(), "p { color: red; }".to_string());

        apply_config_overrides(&mut config, &mut extras, Some("html"));

        assert_eq!(
            extras.get("custom-css"),
            Some(&"p { color: red; }".to_string())
        );
    }

    #[test]
    fn format_params_only_target_the_requested_format() {
        let config = load_cli_config(None);

        let html = format_params_from_config(&config, "html");
        assert_eq!(html.get("standalone"), Some(&"false".to_string()));
        assert_eq!(html.get("title"), Some(&"Error Explanation".to_string()));
        assert!(!html.contains_key("pretty"));

        let tree = format_params_from_config(&config, "treeviz");
        assert_eq!(tree.get("label-width"), Some(&"30".to_string()));
        assert_eq!(tree.len(), 1);

        assert!(format_params_from_config(&config, "tag").is_empty());
        assert!(format_params_from_config(&config, "markdown").is_empty());
    }
}
