pub mod config;
pub mod personas;

use clap::{Parser, Subcommand};

/// TripWeave: persona-aware travel itinerary service.
#[derive(Debug, Parser)]
#[command(name = "tripweave", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default when no subcommand is given).
    Serve,
    /// Persona catalog utilities.
    #[command(subcommand)]
    Personas(PersonasCommand),
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum PersonasCommand {
    /// Embed and store any built-in persona missing from the catalog.
    Warm,
    /// Show which persona a preference text selects.
    Match {
        /// Free-text travel preferences.
        text: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path specified by `TW_CONFIG` (or
/// `config.toml` by default). A missing file yields the defaults.
/// Returns the parsed [`Config`] and the path that was used.
pub fn load_config() -> anyhow::Result<(tw_domain::config::Config, String)> {
    let config_path = std::env::var("TW_CONFIG").unwrap_or_else(|_| "config.toml".into());

    let config = if std::path::Path::new(&config_path).exists() {
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
        toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))?
    } else {
        tw_domain::config::Config::default()
    };

    Ok((config, config_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["tripweave"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_persona_match() {
        let cli = Cli::try_parse_from(["tripweave", "personas", "match", "quiet beaches"]).unwrap();
        match cli.command {
            Some(Command::Personas(PersonasCommand::Match { text })) => {
                assert_eq!(text, "quiet beaches")
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
