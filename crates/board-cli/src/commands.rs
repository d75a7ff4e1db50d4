use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;

use board_server::{BoardServer, ServerConfig};
use board_store::InMemoryChatStore;

use crate::cli::{Cli, Command, ConfigArgs, ServeArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Config(args) => cmd_config(args),
    }
}

/// Load the configuration file, if any, then apply command-line overrides.
fn resolve_config(path: Option<&Path>, args: Option<&ServeArgs>) -> anyhow::Result<ServerConfig> {
    let mut config = match path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(args) = args {
        if let Some(bind) = args.bind {
            config.bind_addr = bind;
        }
        if let Some(port) = args.port {
            config = config.with_port(port);
        }
        if let Some(size) = args.buffer_size {
            config.buffer_size = size;
        }
    }
    config.validate()?;
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(args.config.as_deref(), Some(&args))?;
    let runtime = tokio::runtime::Runtime::new().context("starting runtime")?;
    runtime.block_on(async move {
        let store = Arc::new(InMemoryChatStore::new());
        let server = BoardServer::bind(config, store).await?;
        let addr = server.local_addr()?;

        println!("{} Chat board listening on {}", "✓".green().bold(), addr.to_string().bold());
        println!("  Post:  {}", format!("http://{addr}/post?user=NAME&message=TEXT").cyan());
        println!("  React: {}", format!("http://{addr}/react?user=NAME&message=TEXT&id=N").cyan());
        println!("  List:  {}", format!("http://{addr}/chats").cyan());
        println!("  Reset: {}", format!("http://{addr}/reset").cyan());
        println!("  Buffer: {} bytes", server.config().buffer_size.to_string().yellow());

        server
            .serve_with_shutdown(async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::warn!(%err, "cannot listen for Ctrl-C");
                    std::future::pending::<()>().await;
                }
            })
            .await?;
        println!("{} Stopped.", "✓".green());
        Ok(())
    })
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = resolve_config(args.config.as_deref(), None)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
