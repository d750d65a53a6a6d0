pub mod cli;
pub mod logging;
pub mod models;
pub mod services;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, warn};

use cli::Cli;
use logging::{init_logging, LogSettings};
use services::{
    load_classifier, load_document, render_json, render_text, AnalyzeError, Analyzer, AppConfig, ConfigStore,
    LinearNewsClassifier, RenderOptions,
};

const EXIT_BLANK_INPUT: u8 = 2;

fn config_store(cli: &Cli) -> Option<ConfigStore> {
    cli.config_dir
        .clone()
        .or_else(ConfigStore::default_config_dir)
        .map(ConfigStore::new)
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let Some(store) = config_store(cli) else {
        warn!("No config directory available, using defaults");
        return Ok(AppConfig::default());
    };
    store
        .load()
        .with_context(|| format!("loading {}", store.config_file().display()))
}

/// Persist the effective configuration, with artifact overrides from the command line applied.
fn write_config(cli: &Cli) -> Result<ExitCode> {
    let store = config_store(cli).context("no config directory available; pass --config-dir")?;
    let mut config = store
        .load()
        .with_context(|| format!("loading {}", store.config_file().display()))?;
    if let Some(path) = &cli.vectorizer {
        config.model.vectorizer_path = path.clone();
    }
    if let Some(path) = &cli.model {
        config.model.model_path = path.clone();
    }
    store
        .save(&config)
        .with_context(|| format!("writing {}", store.config_file().display()))?;

    info!(path = %store.config_file().display(), "config.written");
    println!("Wrote config: {}", store.config_file().display());
    Ok(ExitCode::SUCCESS)
}

/// Load the classifier artifacts; any failure here is fatal for the process.
fn bootstrap_classifier(cli: &Cli, config: &AppConfig) -> Result<LinearNewsClassifier> {
    let vectorizer_path = cli.vectorizer.as_ref().unwrap_or(&config.model.vectorizer_path);
    let model_path = cli.model.as_ref().unwrap_or(&config.model.model_path);
    load_classifier(vectorizer_path, model_path).context("Error loading models")
}

fn read_input(cli: &Cli) -> Result<String> {
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }
    if let Some(path) = &cli.file {
        return load_document(path).with_context(|| format!("reading {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading article from stdin")?;
    Ok(buf)
}

fn execute(cli: &Cli) -> Result<ExitCode> {
    if cli.init_config {
        return write_config(cli);
    }

    let config = load_config(cli)?;
    let analyzer = Analyzer::with_policy(bootstrap_classifier(cli, &config)?, config.indicators);

    let text = read_input(cli)?;
    let started = Instant::now();
    let result = match analyzer.analyze_text(&text) {
        Ok(result) => result,
        Err(AnalyzeError::BlankInput) => {
            eprintln!("{}", AnalyzeError::BlankInput);
            return Ok(ExitCode::from(EXIT_BLANK_INPUT));
        }
        Err(e) => return Err(e.into()),
    };
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "analysis.finished");

    if cli.json {
        println!("{}", render_json(&result)?);
    } else {
        let options = RenderOptions {
            recommendations: !cli.no_recommendations,
        };
        print!("{}", render_text(&result, options));
    }
    Ok(ExitCode::SUCCESS)
}

/// Command-line entry point
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&LogSettings::from_env());

    match execute(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{:#}", e), "newslens.failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
