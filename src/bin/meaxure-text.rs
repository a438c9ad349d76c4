//! Command-line interface for meaxure-text
//! Recovers the per-line placement of a text block's styled runs from a rendered SVG.
//!
//! Usage:
//!   meaxure-text place `<block.json>` --svg `<render.svg>` [--format `<format>`]  - Place the block's runs
//!   meaxure-text lines `<render.svg>`                                         - Print the rendered lines
//!
//! Both subcommands accept `--config <file>` to layer a TOML file over the built-in
//! defaults and `--log-level <filter>` to override its logging section. `place`
//! also takes `--no-shortcut` to render blocks that fit on one line.

use clap::{Arg, ArgAction, ArgMatches, Command};
use env_logger::Env;
use meaxure_config::{Loader, MeaxureConfig};
use meaxure_text::text::{
    AdvanceMeasure, Engine, EngineOptions, PlacedRun, RenderOutputParser, StaticMarkup, TextBlock,
};
use serde::Serialize;

fn main() {
    let matches = Command::new("meaxure-text")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recovers per-line placement of styled text runs from rendered markup")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log filter, overriding the configured one (e.g. 'debug')"),
        )
        .subcommand(
            Command::new("place")
                .about("Place the runs of a text block")
                .arg(
                    Arg::new("block")
                        .help("Path to the text block description (JSON)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("svg")
                        .long("svg")
                        .help("Path to the rendered markup of the block")
                        .required(true),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('json' or 'yaml')")
                        .value_parser(["json", "yaml"])
                        .default_value("json"),
                )
                .arg(
                    Arg::new("advance")
                        .long("advance")
                        .help("Width of one character, in points")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("7"),
                )
                .arg(
                    Arg::new("no-shortcut")
                        .long("no-shortcut")
                        .help("Render the block even when it fits on one line")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("lines")
                .about("Print the lines parsed from rendered markup")
                .arg(
                    Arg::new("svg")
                        .help("Path to the rendered markup")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });
    env_logger::Builder::from_env(Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    let result = match matches.subcommand() {
        Some(("place", place_matches)) => handle_place_command(place_matches, &config),
        Some(("lines", lines_matches)) => handle_lines_command(lines_matches, &config),
        _ => unreachable!(),
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Defaults, then `--config`, then flag overrides.
fn load_config(matches: &ArgMatches) -> Result<MeaxureConfig, String> {
    // Global args are propagated down, so the subcommand sees them wherever they
    // were written.
    let scope = matches.subcommand().map_or(matches, |(_, sub)| sub);
    let mut loader = Loader::new();
    if let Some(path) = scope.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(level) = scope.get_one::<String>("log-level") {
        loader = loader.with_log_level(level).map_err(|e| e.to_string())?;
    }
    if let Some(("place", place_matches)) = matches.subcommand() {
        if place_matches.get_flag("no-shortcut") {
            loader = loader
                .without_single_line_shortcut()
                .map_err(|e| e.to_string())?;
        }
    }
    loader.build().map_err(|e| e.to_string())
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a String, String> {
    matches
        .get_one::<String>(name)
        .ok_or_else(|| format!("missing argument '{}'", name))
}

fn read(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))
}

/// What `place` prints.
#[derive(Serialize)]
struct PlaceReport<'a> {
    runs: &'a [PlacedRun],
    warnings: Vec<String>,
}

/// Handle the place command
fn handle_place_command(matches: &ArgMatches, config: &MeaxureConfig) -> Result<(), String> {
    let block_path = required(matches, "block")?;
    let svg_path = required(matches, "svg")?;
    let format = required(matches, "format")?;
    let advance = matches.get_one::<f64>("advance").copied().unwrap_or(7.0);

    let block: TextBlock = serde_json::from_str(&read(block_path)?)
        .map_err(|e| format!("invalid block description {}: {}", block_path, e))?;
    let engine = Engine::with_options(
        StaticMarkup::new(read(svg_path)?),
        AdvanceMeasure::new(advance),
        EngineOptions::from(config),
    );
    let placed = engine.reconstruct(&block).map_err(|e| e.to_string())?;

    let report = PlaceReport {
        runs: &placed.runs,
        warnings: placed.warnings.iter().map(ToString::to_string).collect(),
    };
    let output = match format.as_str() {
        "yaml" => serde_yaml::to_string(&report).map_err(|e| e.to_string())?,
        _ => serde_json::to_string_pretty(&report).map_err(|e| e.to_string())? + "\n",
    };
    print!("{}", output);
    Ok(())
}

/// Handle the lines command
fn handle_lines_command(matches: &ArgMatches, config: &MeaxureConfig) -> Result<(), String> {
    let svg_path = required(matches, "svg")?;
    let parser = RenderOutputParser::with_run_tags(config.markup.run_tags.clone());
    let lines = parser.parse(&read(svg_path)?);
    let output = serde_json::to_string_pretty(&lines).map_err(|e| e.to_string())?;
    println!("{}", output);
    Ok(())
}
