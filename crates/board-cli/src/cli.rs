use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chatboard", about = "In-memory chat board served over HTTP", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the chat board server
    Serve(ServeArgs),
    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (0 picks a free port)
    pub port: Option<u16>,
    /// Listen address; PORT overrides its port
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Response buffer size in bytes
    #[arg(long)]
    pub buffer_size: Option<usize>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve_bare() {
        let cli = Cli::try_parse_from(["chatboard", "serve"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.port, None);
            assert!(args.bind.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_serve_port() {
        let cli = Cli::try_parse_from(["chatboard", "serve", "8080"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.port, Some(8080));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_serve_options() {
        let cli = Cli::try_parse_from([
            "chatboard",
            "serve",
            "--bind",
            "0.0.0.0:9000",
            "--config",
            "board.toml",
            "--buffer-size",
            "1024",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:9000".parse().unwrap()));
            assert_eq!(args.config, Some(PathBuf::from("board.toml")));
            assert_eq!(args.buffer_size, Some(1024));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_config() {
        let cli = Cli::try_parse_from(["chatboard", "--verbose", "config"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Config(_)));
    }

    #[test]
    fn reject_bad_port() {
        assert!(Cli::try_parse_from(["chatboard", "serve", "70000"]).is_err());
        assert!(Cli::try_parse_from(["chatboard", "serve", "http"]).is_err());
    }

    #[test]
    fn subcommand_required() {
        assert!(Cli::try_parse_from(["chatboard"]).is_err());
    }
}
