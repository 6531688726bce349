// Command-line interface for rst-tools
//
// md2rst converts CommonMark Markdown into reStructuredText. The heavy lifting lives in the
// rst-babel library; this binary only deals with arguments, configuration, logging and I/O.
//
// Converting:
//
// The source format is auto-detected from the file extension (markdown or json), and can be
// overridden with --from. The target defaults to rst. Reading from stdin is done with `-`.
// Usage:
//  md2rst <input> [--to <format>] [--from <format>] [--output <file>]  - Convert (default)
//  md2rst convert <input> ...                                           - Same as above (explicit)
//  md2rst inspect <path> [<transform>]      - Show the parsed tree (defaults to "ir-treeviz")
//  md2rst --list-formats                    - List formats and transforms
//
// Extra Parameters:
//
// Rendering rules can be overridden with --extra-<parameter-name> [value].
// The CLI layer strips the "extra-" prefix and layers the values over the configuration.
// Example:
//  md2rst README.md --extra-anonymous-links --extra-bullet -

use rst_cli::transforms;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use rst_babel::formats::markdown::{MarkdownFormat, MarkdownOptions};
use rst_babel::formats::rst::{apply_options, RstFormat};
use rst_babel::{FormatError, FormatRegistry, RstRules};
use rst_config::{ConfigError, Loader, RstConfig, LOCAL_CONFIG_FILE};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

/// `--extra-*` keys that override rendering rules
const RULE_KEYS: &[&str] = &[
    "anonymous-links",
    "escape",
    "bullet",
    "indent",
    "heading-chars",
];

/// Subcommands (and help) that must not get `convert` injected in front of them
const SUBCOMMANDS: &[&str] = &["convert", "inspect", "help"];

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Error reading '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("Error writing file '{path}': {source}")]
    Write { path: String, source: io::Error },

    #[error("Could not detect format from filename '{0}'. Please specify --from explicitly")]
    UndetectedFormat(String),

    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid value '{value}' for --extra-{flag}")]
    InvalidExtra { flag: String, value: String },

    #[error("No input given. Use --help for usage information")]
    MissingInput,

    #[error("{0}")]
    Format(#[from] FormatError),

    #[error("{0}")]
    Transform(String),
}

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
///
/// A lone `-` counts as a value, so `--extra-bullet -` works.
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
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| next == "-" || !next.starts_with('-'));

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

/// Retry arguments with `convert` as the subcommand, unless the first
/// argument already names a subcommand.
fn inject_convert(args: &[String]) -> Option<Vec<String>> {
    let first = args.get(1)?;
    if SUBCOMMANDS.contains(&first.as_str()) {
        return None;
    }
    let mut new_args = vec![args[0].clone(), "convert".to_string()];
    new_args.extend_from_slice(&args[1..]);
    Some(new_args)
}

fn build_cli() -> Command {
    Command::new("md2rst")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert CommonMark documents to reStructuredText")
        .long_about(
            "md2rst renders CommonMark Markdown as reStructuredText for docutils and Sphinx.\n\n\
            Commands:\n  \
            - convert: Convert a document (default command)\n  \
            - inspect: View the parsed node tree\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override rendering rules:\n  \
            anonymous-links, escape, bullet, indent, heading-chars.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            md2rst README.md                        # Convert to RST (outputs to stdout)\n  \
            md2rst README.md -o README.rst          # Convert to a file\n  \
            cat README.md | md2rst -                # Read from stdin\n  \
            md2rst inspect README.md                # View the parsed tree",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an rst.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log progress to stderr (repeat for more detail)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document (default command)")
                .long_about(
                    "Convert a document to another format, reStructuredText by default.\n\n\
                    The source format is auto-detected from the file extension\n\
                    (.md/.markdown or .json). Input '-' reads Markdown from stdin.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
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
                        .help("Target format (defaults to rst)")
                        .default_value("rst")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the parsed node tree of a document")
                .long_about(
                    "View a document at different processing stages.\n\n\
                    Transforms:\n  \
                    - ir-treeviz: node tree visualization (default)\n  \
                    - ir-json:    node tree as JSON\n  \
                    - rst:        rendered reStructuredText\n\n\
                    Extra Parameters:\n  \
                    --extra-width <n>   Label truncation width for ir-treeviz\n  \
                    --extra-smart       Smart punctuation while parsing",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the document, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'ir-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => match inject_convert(&cleaned_args) {
            Some(new_args) => cli
                .try_get_matches_from(&new_args)
                .unwrap_or_else(|e2| e2.exit()),
            None => e.exit(),
        },
    };

    if let Err(err) = run(&matches, extra_params) {
        tracing::debug!(error = ?err, "command failed");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches, mut extra_params: HashMap<String, String>) -> Result<(), CliError> {
    let mut config = load_cli_config(matches.get_one::<String>("config").map(String::as_str))?;
    init_logging(matches.get_count("verbose"), &config);

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return Ok(());
    }

    apply_config_overrides(&mut config, &mut extra_params)?;
    let rules = rules_from_config(&config, &mut extra_params)?;

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .ok_or(CliError::MissingInput)?;
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(String::as_str)
                .unwrap_or("ir-treeviz");
            handle_inspect_command(path, transform, &rules, &extra_params, &config)
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .ok_or(CliError::MissingInput)?;
            let to = sub_matches
                .get_one::<String>("to")
                .map(String::as_str)
                .unwrap_or("rst");
            let registry = build_registry(&config, rules);
            let from = match sub_matches.get_one::<String>("from") {
                Some(from) => from.clone(),
                None => detect_source_format(&registry, input)?,
            };
            let output = sub_matches.get_one::<String>("output").map(String::as_str);
            handle_convert_command(&registry, input, &from, to, output, &extra_params)
        }
        _ => Err(CliError::MissingInput),
    }
}

/// Logging goes to stderr. `--verbose` wins over `RUST_LOG`, which wins over
/// the configured filter.
fn init_logging(verbosity: u8, config: &RstConfig) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.logging.filter))
            .unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_registry(config: &RstConfig, rules: RstRules) -> FormatRegistry {
    let mut registry = FormatRegistry::default();
    registry.register(MarkdownFormat::new(MarkdownOptions::from(&config.parsing)));
    registry.register(RstFormat::new(rules));
    registry
}

fn detect_source_format(registry: &FormatRegistry, input: &str) -> Result<String, CliError> {
    if input == "-" {
        return Ok("markdown".to_string());
    }
    registry
        .detect_format_from_filename(input)
        .ok_or_else(|| CliError::UndetectedFormat(input.to_string()))
}

fn read_input(path: &str) -> Result<String, CliError> {
    let result = if path == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).map(|_| source)
    } else {
        fs::read_to_string(path)
    };
    result.map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    rules: &RstRules,
    extra_params: &HashMap<String, String>,
    config: &RstConfig,
) -> Result<(), CliError> {
    let source = read_input(path)?;
    let registry = FormatRegistry::default();
    let params = build_inspect_params(&registry, path, config, extra_params);

    let output = transforms::execute_transform(&source, transform, rules, &params)
        .map_err(CliError::Transform)?;

    print!("{output}");
    Ok(())
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
) -> Result<(), CliError> {
    // Validate formats exist before touching the input
    registry.get(from)?;
    registry.get(to)?;

    let source = read_input(input)?;
    tracing::info!(input, from, to, "converting");

    let doc = registry.parse(&source, from)?;
    let result = registry.serialize_with_options(&doc, to, extra_params)?;

    match output {
        Some(path) => fs::write(path, result).map_err(|source| CliError::Write {
            path: path.to_string(),
            source,
        })?,
        None => print!("{result}"),
    }
    Ok(())
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        if let Ok(format) = registry.get(&format_name) {
            let direction = match (format.supports_parsing(), format.supports_serialization()) {
                (true, true) => "from/to",
                (true, false) => "from",
                (false, true) => "to",
                (false, false) => "-",
            };
            println!(
                "  {format_name:<10} {direction:<8} {}",
                format.description()
            );
        }
    }

    println!("\nInspect transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> Result<RstConfig, CliError> {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    Ok(loader.build()?)
}

/// Layer rule overrides from `--extra-*` over the configured rules. The
/// consumed keys are removed from `extra_params`.
fn rules_from_config(
    config: &RstConfig,
    extra_params: &mut HashMap<String, String>,
) -> Result<RstRules, CliError> {
    let mut overrides = HashMap::new();
    for key in RULE_KEYS {
        if let Some(value) = extra_params.remove(*key) {
            overrides.insert(key.to_string(), value);
        }
    }
    let rules = RstRules::from(&config.rendering.rules);
    Ok(apply_options(rules, &overrides)?)
}

/// Apply non-rule `--extra-*` settings to the configuration. The consumed
/// keys are removed from `extra_params`.
fn apply_config_overrides(
    config: &mut RstConfig,
    extra_params: &mut HashMap<String, String>,
) -> Result<(), CliError> {
    if let Some(raw) = extra_params.remove("smart") {
        config.parsing.smart = parse_bool_arg("smart", &raw)?;
    }
    if let Some(raw) = extra_params.remove("width") {
        config.inspect.treeviz_width = raw.parse().map_err(|_| CliError::InvalidExtra {
            flag: "width".to_string(),
            value: raw.clone(),
        })?;
    }
    Ok(())
}

fn build_inspect_params(
    registry: &FormatRegistry,
    path: &str,
    config: &RstConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let from = match registry.detect_format_from_filename(path).as_deref() {
        Some("json") => "json",
        _ => "markdown",
    };
    params.insert("from".to_string(), from.to_string());
    params.insert("smart".to_string(), config.parsing.smart.to_string());
    params.insert(
        "width".to_string(),
        config.inspect.treeviz_width.to_string(),
    );

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }
    params
}

fn parse_bool_arg(flag: &str, raw: &str) -> Result<bool, CliError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(CliError::InvalidExtra {
            flag: flag.to_string(),
            value: raw.to_string(),
        }),
    }
}
