//! Explore Controls RS command-line front end

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bi_core::config::{AppConfig, LoggingConfig};

#[derive(Parser)]
#[command(name = "bi")]
#[command(about = "Build chart queries and inspect formatting rules")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print the query context for a Gantt chart's form data")]
    GanttQuery {
        #[arg(help = "Path to the form data JSON file")]
        form_data: String,
        #[arg(long, help = "Pretty-print the output")]
        pretty: bool,
    },
    #[command(about = "Print the label of each formatting rule")]
    Label {
        #[arg(help = "Path to a JSON rule or list of rules")]
        rules: String,
        #[arg(long, value_name = "PATH", help = "JSON object mapping column ids to display names")]
        verbose_map: Option<String>,
    },
    #[command(about = "Apply a new column list to formatting rules and print the result")]
    ApplyColumns {
        #[arg(help = "Path to a JSON list of rules")]
        rules: String,
        #[arg(long, value_delimiter = ',', help = "Selectable columns (comma-separated)")]
        columns: Vec<String>,
        #[arg(long, help = "Drop rules for columns not in the list (overrides BI_REMOVE_IRRELEVANT_CONDITIONS)")]
        remove_irrelevant: Option<bool>,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Failed to load config from env: {}, using defaults", e);
        AppConfig::default()
    });
    init_tracing(&config.logging);

    let cli = Cli::parse();
    info!(version = env!("CARGO_PKG_VERSION"), "Starting bi");

    let result = match cli.command {
        Commands::GanttQuery { form_data, pretty } => {
            commands::gantt_query(&form_data, pretty, &config)
        }
        Commands::Label { rules, verbose_map } => commands::label(&rules, verbose_map.as_deref()),
        Commands::ApplyColumns {
            rules,
            columns,
            remove_irrelevant,
        } => {
            let remove = remove_irrelevant.unwrap_or(config.controls.remove_irrelevant_conditions);
            commands::apply_columns(&rules, columns, remove)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_new(&logging.filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_apply_columns_args() {
        let cli = Cli::try_parse_from([
            "bi",
            "apply-columns",
            "rules.json",
            "--columns",
            "a,b",
            "--remove-irrelevant",
            "true",
        ])
        .unwrap();

        match cli.command {
            Commands::ApplyColumns {
                rules,
                columns,
                remove_irrelevant,
            } => {
                assert_eq!(rules, "rules.json");
                assert_eq!(columns, vec!["a", "b"]);
                assert_eq!(remove_irrelevant, Some(true));
            }
            _ => panic!("expected apply-columns"),
        }
    }
}
