// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Waypoint - a browser-based career coaching chat.
//!
//! This is the binary entry point.

mod serve;

use clap::{Parser, Subcommand};

/// Waypoint - a browser-based career coaching chat.
#[derive(Parser, Debug)]
#[command(name = "waypoint", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Start the chat server (default).
    Serve,
    /// Print the effective configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match waypoint_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            waypoint_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Config => match toml::to_string_pretty(&config.redacted()) {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("error: failed to render config: {e}");
                std::process::exit(1);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::try_parse_from(["waypoint"]).unwrap();
        assert_eq!(cli.command, None);
        let cli = Cli::try_parse_from(["waypoint", "config"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Config));
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = waypoint_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.agent.name, "waypoint");
        assert_eq!(config.gateway.port, 8501);
    }

    #[test]
    fn rendered_config_hides_api_key() {
        let mut config = waypoint_config::load_and_validate_str("").unwrap();
        config.openai.api_key = Some("sk-live-secret".into());
        let text = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(!text.contains("sk-live-secret"));
        assert!(text.contains("[redacted]"));
        assert!(text.contains("[openai]"));
    }
}
