//! ircpush - IRC to Pusher bridge.

use anyhow::Context;
use clap::Parser;
use ircpush::config::{Cli, ConfigError};
use ircpush::dispatch::Dispatcher;
use ircpush::publish::{PublishTarget, PusherClient};
use ircpush::{bridge, session, shutdown, telemetry};
use std::process::ExitCode;
use tracing::{Instrument, error, info};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    telemetry::init(cli.log_format);

    // Load configuration
    let config = cli.into_config().map_err(|e| {
        if let ConfigError::Invalid(errors) = &e {
            for err in errors {
                error!("{err}");
            }
        } else {
            error!(error = %e, "Failed to load config");
        }
        e
    })?;

    info!(
        server = %config.irc.target(),
        nick = %config.irc.nick,
        channels = ?config.irc.channels,
        pusher_channel = %config.pusher.channel,
        event = %config.pusher.event,
        "Starting ircpush"
    );

    let publisher = PusherClient::new(&config.pusher, config.timeouts.publish())
        .context("failed to build Pusher client")?;
    let dispatcher = Dispatcher::new(publisher, PublishTarget::from(&config.pusher));

    let session = session::connect(&config.irc, &config.timeouts)
        .await
        .map_err(|e| {
            error!(error = %e, "Connection failed");
            e
        })?;

    let span = telemetry::spans::session(&config.irc.target(), &config.irc.nick);
    let outcome = async {
        session.writer().register(&config.irc).await;
        bridge::run(session, &dispatcher, shutdown::interrupt()).await
    }
    .instrument(span)
    .await;

    Ok(outcome.exit_code())
}
