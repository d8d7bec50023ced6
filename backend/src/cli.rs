use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rci-alert", version, about = "RCI three-window signal monitor with LINE alerts")]
pub struct Cli {
    /// JSON file with pairs and thresholds.
    #[arg(long, env = "RCI_ALERT_CONFIG", default_value = "config.json", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan now. One pass when GITHUB_ACTIONS=true, otherwise forever.
    Run,

    /// Serve the webhook; monitoring starts on the first event.
    Serve {
        #[arg(long, env = "PORT", default_value_t = 10000)]
        port: u16,

        #[arg(long, default_value = "0.0.0.0")]
        bind: IpAddr,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["rci-alert", "serve"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.json"));

        match cli.command {
            Command::Serve { bind, .. } => assert_eq!(bind.to_string(), "0.0.0.0"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["rci-alert", "run", "--config", "/etc/rci.json"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/rci.json"));
        assert!(matches!(cli.command, Command::Run));
    }

    #[test]
    fn explicit_port() {
        let cli = Cli::try_parse_from(["rci-alert", "serve", "--port", "8080"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { port: 8080, .. }));
    }
}
