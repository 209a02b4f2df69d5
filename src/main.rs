//! Herald - a chat-bot command router.

mod cli;

use anyhow::Context;
use cli::Cli;
use herald::config::Config;
use herald::logging::{init_file_logging, init_stderr_logging};
use herald::transport::{parse_script, ConsoleTransport, InboundEvent, Transport};
use herald::{BotError, Dispatcher};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    if cli.log_file {
        init_file_logging();
    } else {
        init_stderr_logging();
    }

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<BotError>() {
            Some(bot_error) if bot_error.is_fatal() => {
                error!("{}: {}", bot_error.category(), bot_error);
                error!("Startup aborted; fix the configuration and restart");
            }
            Some(bot_error) => error!("{}: {}", bot_error.category(), bot_error),
            None => error!("{:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load(cli.config.as_deref())?;

    let transport: Arc<dyn Transport> = Arc::new(ConsoleTransport::new());
    let dispatcher = Arc::new(Dispatcher::new(transport, config, cli.bot_id.clone()).await?);

    if cli.check {
        let prefix_commands = dispatcher.prefix_commands().len().await;
        let slash_commands = dispatcher.slash_commands().len().await;
        info!(
            prefix_commands,
            slash_commands,
            mode = dispatcher.config().mode().label(),
            "Configuration OK"
        );
        return Ok(());
    }

    let events = load_script(&cli).await?;
    dispatcher.ready().await;

    tokio::select! {
        _ = serve(&dispatcher, events) => {}
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    dispatcher.shutdown().await;
    info!("Goodbye");
    Ok(())
}

/// Reads the event script, if one was given.
async fn load_script(cli: &Cli) -> anyhow::Result<Option<Vec<InboundEvent>>> {
    let Some(path) = &cli.script else {
        return Ok(None);
    };

    let script = if cli.script_from_stdin() {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read event script from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read event script {}", path.display()))?
    };

    Ok(Some(parse_script(&script)?))
}

/// Feeds events to the dispatcher.
///
/// Each event runs on its own task; script events are awaited in order so
/// clicks can refer to menus sent by earlier lines. Without a script the bot
/// idles until a signal arrives.
async fn serve(dispatcher: &Arc<Dispatcher>, events: Option<Vec<InboundEvent>>) {
    let Some(events) = events else {
        std::future::pending::<()>().await;
        return;
    };

    for event in events {
        let dispatcher = Arc::clone(dispatcher);
        if let Err(e) = tokio::spawn(async move { dispatcher.dispatch(event).await }).await {
            warn!("Event task failed: {}", e);
        }
    }
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Cannot listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
