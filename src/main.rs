use std::{fs, path::Path, str::FromStr};

use anyhow::{anyhow, Context};
use assay::ast::Program;
use assay::inspect::{mulang, Analyzer, InspectionRule, HASKELL};
use clap::{crate_description, crate_name, crate_version, App, Arg};
use serde_json::{json, Map, Value};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

fn read(path: &str, what: &str) -> anyhow::Result<String> {
    fs::read_to_string(Path::new(path)).with_context(|| format!("failed to read {} `{}`", what, path))
}

fn main() -> anyhow::Result<()> {
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::new("program")
                .required(true)
                .help("Program AST as JSON"),
        )
        .arg(
            Arg::new("rules")
                .short('r')
                .long("rules")
                .takes_value(true)
                .help("Inspection rules as a JSON array"),
        )
        .arg(
            Arg::new("mulang")
                .short('m')
                .long("mulang")
                .takes_value(true)
                .help("Mulang expectations document (YAML or JSON)"),
        )
        .arg(
            Arg::new("typecheck")
                .short('t')
                .long("typecheck")
                .takes_value(false)
                .help("Check functions against their signatures"),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .takes_value(true)
                .default_value(HASKELL)
                .help("Source language whose type checker runs"),
        )
        .arg(
            Arg::new("loglevel")
                .short('l')
                .long("log-level")
                .takes_value(true)
                .possible_values(["off", "error", "warn", "info", "debug", "trace"])
                .default_value("warn"),
        )
        .get_matches();

    let loglevel = LevelFilter::from_str(matches.value_of("loglevel").unwrap_or("warn"))
        .map_err(|_| anyhow!("invalid log level"))?;
    TermLogger::init(
        loglevel,
        ConfigBuilder::new()
            .set_location_level(LevelFilter::Error)
            .set_time_level(LevelFilter::Off)
            .set_thread_level(LevelFilter::Off)
            .set_target_level(LevelFilter::Off)
            .build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let program_path = matches
        .value_of("program")
        .ok_or_else(|| anyhow!("no program given"))?;
    let program: Program = serde_json::from_str(&read(program_path, "program")?)
        .with_context(|| format!("`{}` is not a valid program", program_path))?;

    let mut rules: Vec<InspectionRule> = Vec::new();
    if let Some(path) = matches.value_of("rules") {
        let native: Vec<InspectionRule> = serde_json::from_str(&read(path, "rules")?)
            .with_context(|| format!("`{}` is not a valid rule list", path))?;
        rules.extend(native);
    }
    if let Some(path) = matches.value_of("mulang") {
        let translated = mulang::translate_str(&read(path, "Mulang expectations")?)
            .with_context(|| format!("failed to translate `{}`", path))?;
        rules.extend(translated);
    }

    let has_rules = matches.is_present("rules") || matches.is_present("mulang");
    let typecheck = matches.is_present("typecheck") || !has_rules;

    let analyzer = Analyzer::new(&program);
    let mut output = Map::new();
    if has_rules {
        let results = analyzer.analyze(&rules);
        log::info!(
            "{} of {} rule(s) passed",
            results.iter().filter(|result| result.passed).count(),
            results.len()
        );
        output.insert("results".to_string(), serde_json::to_value(results)?);
    }
    if typecheck {
        let language = matches.value_of("language").unwrap_or(HASKELL);
        let errors = analyzer
            .type_check(language)
            .ok_or_else(|| anyhow!("no type checker for `{}`", language))?;
        output.insert("typeErrors".to_string(), json!(errors));
    }

    println!("{}", serde_json::to_string_pretty(&Value::Object(output))?);
    Ok(())
}
