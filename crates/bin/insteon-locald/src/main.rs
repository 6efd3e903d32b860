//! # insteon-locald: Insteon local hub daemon
//!
//! Composition root that wires the hub, the name store and the terminal
//! prompts together, then keeps switch state fresh.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Construct the adapters and the switch platform
//! - Restore named switches and prompt for new ones
//! - Read names and switch commands from stdin
//! - Refresh every registered switch on a fixed interval
//! - Stop on Ctrl+C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod command;
mod config;
mod configurator;

use std::sync::Arc;

use insteon_local_adapter_storage_json::JsonFileStore;
use insteon_local_adapter_virtual::{VirtualDevice, VirtualHub};
use insteon_local_app::ports::HubDevice;
use insteon_local_app::registry::SwitchRegistry;
use insteon_local_app::services::platform::SwitchPlatform;
use insteon_local_app::services::switch::InsteonSwitch;
use insteon_local_domain::id::HubDeviceId;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::command::Command;
use crate::config::Config;
use crate::configurator::TerminalConfigurator;

type Platform = SwitchPlatform<
    VirtualHub,
    JsonFileStore,
    TerminalConfigurator<std::io::Stdout>,
    SwitchRegistry<InsteonSwitch<VirtualDevice>>,
>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    let store = JsonFileStore::in_config_dir(&config.storage.config_dir);
    tracing::info!(
        names = %store.path().display(),
        devices = config.hub.devices.len(),
        "insteon-locald starting"
    );

    let poll_interval = config.poll_interval();
    let platform: Platform = SwitchPlatform::new(
        VirtualHub::new(config.hub),
        store,
        TerminalConfigurator::stdout(),
        SwitchRegistry::new(),
    );
    platform.setup().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut ticker = tokio::time::interval(poll_interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => handle_line(&platform, &line).await,
                Ok(None) => {
                    tracing::info!("stdin closed, no more names can be entered");
                    stdin_open = false;
                }
                Err(err) => {
                    tracing::error!(error = %err, "failed to read stdin");
                    stdin_open = false;
                }
            },
            _ = ticker.tick() => refresh_all(&platform.sink().entities()).await,
            result = &mut shutdown => {
                match result {
                    Ok(()) => tracing::info!("received shutdown signal"),
                    Err(err) => {
                        tracing::error!(error = %err, "failed to listen for shutdown signal");
                    }
                }
                break;
            }
        }
    }

    tracing::info!(
        switches = platform.sink().len(),
        pending = platform.pending_ids().len(),
        "insteon-locald stopped"
    );
    Ok(())
}

async fn handle_line(platform: &Platform, line: &str) {
    let command = match Command::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring input");
            return;
        }
    };

    match command {
        Command::Name { device_id, name } => {
            if let Err(err) = platform.submit_name(&device_id, &name).await {
                tracing::warn!(%device_id, error = %err, "name rejected");
            }
        }
        Command::TurnOn(device_id) => {
            let Some(switch) = find_switch(platform, &device_id) else {
                return;
            };
            if let Err(err) = switch.turn_on().await {
                tracing::error!(%device_id, error = %err, "failed to turn on");
            }
        }
        Command::TurnOff(device_id) => {
            let Some(switch) = find_switch(platform, &device_id) else {
                return;
            };
            if let Err(err) = switch.turn_off().await {
                tracing::error!(%device_id, error = %err, "failed to turn off");
            }
        }
        Command::Status => {
            for switch in platform.sink().entities() {
                let snapshot = switch.snapshot();
                tracing::info!(
                    entity_id = %snapshot.entity_id,
                    name = %snapshot.name,
                    state = %snapshot.state,
                    last_refreshed = ?snapshot.last_refreshed,
                    "switch"
                );
            }
            for device_id in platform.pending_ids() {
                tracing::info!(%device_id, "waiting for a name");
            }
        }
    }
}

fn find_switch(
    platform: &Platform,
    device_id: &HubDeviceId,
) -> Option<Arc<InsteonSwitch<VirtualDevice>>> {
    let found = platform
        .sink()
        .entities()
        .into_iter()
        .find(|switch| switch.device_id() == device_id);
    if found.is_none() {
        tracing::warn!(%device_id, "no switch registered with this id");
    }
    found
}

async fn refresh_all<D: HubDevice>(switches: &[Arc<InsteonSwitch<D>>]) {
    for switch in switches {
        match switch.refresh().await {
            Ok(on) => tracing::debug!(unique_id = %switch.unique_id(), on, "switch refreshed"),
            Err(err) => {
                tracing::warn!(unique_id = %switch.unique_id(), error = %err, "refresh failed");
            }
        }
    }
}
