//! Command-line interface for tagged EBNF grammar documents
//! This binary reads a grammar in the tagged YAML notation and writes it back out in one of the
//! registered formats (EBNF text, canonical YAML, or an inspection view).
//!
//! Usage:
//!   ebnf `<path>` [--format `<format>`] [--config `<file>`]   - Convert a document (`-` reads stdin)
//!   ebnf --list-formats                                     - List all available formats

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use ebnf_config::{EbnfConfig, Loader};
use ebnf_core::ebnf::formats::{EbnfFormatter, FormatRegistry, TagFormatter};
use ebnf_core::{decode_document, RenderOptions};
use log::{debug, LevelFilter};

/// Picked up from the working directory when `--config` is not given
const LOCAL_CONFIG: &str = "ebnf.toml";

fn main() -> anyhow::Result<()> {
    let matches = Command::new("ebnf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting tagged EBNF grammars")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the grammar document, or '-' for stdin")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (see --list-formats)")
                .default_value("ebnf"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("line-width")
                .long("line-width")
                .help("Wrap EBNF definitions whose one-line form reaches this width")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("namespace")
                .long("namespace")
                .help("Tag namespace for YAML output when the input declares none"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = load_config(&matches)?;
    init_logging(&config)?;
    let registry = build_registry(&config);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return Ok(());
    }

    let Some(path) = matches.get_one::<String>("path") else {
        bail!("a document path is required");
    };
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("ebnf");
    handle_convert_command(&registry, path, format)
}

/// Layer defaults, the config file and command-line overrides
fn load_config(matches: &ArgMatches) -> anyhow::Result<EbnfConfig> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    if let Some(width) = matches.get_one::<u32>("line-width") {
        loader = loader.set_override("render.line_width", i64::from(*width))?;
    }
    if let Some(namespace) = matches.get_one::<String>("namespace") {
        loader = loader.set_override("yaml.namespace", namespace.as_str())?;
    }
    loader.build().context("Failed to load configuration")
}

fn init_logging(config: &EbnfConfig) -> anyhow::Result<()> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log.level.clone());
    let level = LevelFilter::from_str(&level)
        .with_context(|| format!("Invalid log level '{level}'"))?;

    simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_time_format_custom(&[])
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Never,
    )?;
    Ok(())
}

/// The default registry, with the configurable formatters replaced by configured ones
fn build_registry(config: &EbnfConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::default();
    registry.register(EbnfFormatter::new(RenderOptions::from(&config.render)));
    registry.register(TagFormatter::new(config.yaml.namespace.clone()));
    registry
}

/// Handle the convert command
fn handle_convert_command(registry: &FormatRegistry, path: &str, format: &str) -> anyhow::Result<()> {
    if !registry.has(format) {
        bail!(
            "Unknown format '{format}'. Available formats: {}",
            registry.list_formats().join(", ")
        );
    }

    let source = read_source(path)?;
    let doc = decode_document(&source).with_context(|| format!("Failed to read {path}"))?;
    debug!("read {} rules from {path}", doc.rules.len());

    let output = registry
        .serialize(&doc, format)
        .with_context(|| format!("Failed to write {path} as {format}"))?;
    print!("{output}");
    Ok(())
}

fn read_source(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(Path::new(path)).with_context(|| format!("Failed to open {path}"))
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available output formats:\n");

    for name in registry.list_formats() {
        if let Some(formatter) = registry.get(&name) {
            println!("  {}", name);
            println!("    {}", formatter.description());
            println!();
        }
    }
}
