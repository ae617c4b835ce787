//! Monkeyroute command-line entry point
//!
//! Loads the configuration, builds the tiered router and prints routing
//! decisions as JSON.

use clap::Parser;
use monkeyroute::cli::{self, Cli, Command};
use monkeyroute::{config::Config, router::TieredRouter, telemetry};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (query, history_path, pretty, analyze_only) = match cli.command {
        Command::Config { output } => {
            let template = cli::generate_config_template();
            match output {
                Some(path) => {
                    std::fs::write(&path, template)?;
                    eprintln!("Wrote configuration template to {}", path);
                }
                None => print!("{}", template),
            }
            return Ok(());
        }
        Command::Route {
            query,
            history,
            pretty,
        } => (query, history, pretty, false),
        Command::Analyze { query, history } => (query, history, true, true),
    };

    // Load configuration
    let config = Config::from_file(&cli.config)?;

    // Initialize telemetry
    telemetry::init(&config.observability.log_level);

    let router = TieredRouter::from_config(&config)?;
    let history = cli::load_history(history_path.as_deref())?;

    let output = if analyze_only {
        serde_json::to_value(router.analyze(&query, &history))?
    } else {
        serde_json::to_value(router.plan(&query, &history))?
    };

    if pretty {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output);
    }

    Ok(())
}
