//! Insteon switch entity: cached on/off state over a hub device handle.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use insteon_local_domain::entity::{self, EntityState, SwitchSnapshot, Timestamp};
use insteon_local_domain::error::InsteonError;
use insteon_local_domain::id::HubDeviceId;

use crate::ports::HubDevice;
use crate::services::throttle::Throttle;

/// Status group holding the main load of a switch.
const STATUS_GROUP: u8 = 0;

struct Cached {
    state: EntityState,
    throttle: Throttle,
    last_refreshed: Option<Timestamp>,
}

/// A togglable on/off entity backed by one hub device.
///
/// State is whatever the last successful refresh or command left in the
/// cache; [`is_on`](Self::is_on) never talks to the hub. Refreshes are
/// throttled per switch (see [`Throttle`]).
pub struct InsteonSwitch<D> {
    device: D,
    device_id: HubDeviceId,
    name: String,
    cached: Mutex<Cached>,
}

impl<D: HubDevice> InsteonSwitch<D> {
    /// Wrap `device` under the user-assigned `name`. Starts off.
    pub fn new(device: D, name: impl Into<String>) -> Self {
        let device_id = device.device_id().clone();
        Self {
            device,
            device_id,
            name: name.into(),
            cached: Mutex::new(Cached {
                state: EntityState::Off,
                throttle: Throttle::default(),
                last_refreshed: None,
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn device_id(&self) -> &HubDeviceId {
        &self.device_id
    }

    /// `insteon_local_<device id>`.
    #[must_use]
    pub fn unique_id(&self) -> String {
        entity::unique_id(&self.device_id)
    }

    /// `switch.insteon_local_<device id, lowercased>`.
    #[must_use]
    pub fn entity_id(&self) -> String {
        entity::entity_id(&self.device_id)
    }

    /// Cached state. No IO.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.lock().state.is_on()
    }

    #[must_use]
    pub fn snapshot(&self) -> SwitchSnapshot {
        let cached = self.lock();
        SwitchSnapshot {
            device_id: self.device_id.clone(),
            unique_id: self.unique_id(),
            entity_id: self.entity_id(),
            name: self.name.clone(),
            state: cached.state,
            last_refreshed: cached.last_refreshed,
        }
    }

    /// Refresh the cached state from the hub, at most once per regular
    /// interval. Returns the (possibly unchanged) cached state.
    ///
    /// Every attempt that reaches the hub counts toward the interval,
    /// including failed ones: a refresh right after an error is throttled.
    ///
    /// # Errors
    ///
    /// Returns [`InsteonError::Hub`] when the status query fails, or
    /// [`InsteonError::Validation`] when the reported level is not a
    /// hexadecimal integer. The cache is left untouched in both cases.
    pub async fn refresh(&self) -> Result<bool, InsteonError> {
        self.poll(false).await
    }

    /// Like [`refresh`](Self::refresh) but only bound by the shorter
    /// forced interval.
    ///
    /// # Errors
    ///
    /// Same as [`refresh`](Self::refresh).
    pub async fn force_refresh(&self) -> Result<bool, InsteonError> {
        self.poll(true).await
    }

    /// Switch on. The cache flips immediately; if the hub rejects the
    /// command the previous state is restored and a forced refresh is
    /// attempted before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the hub error of the failed command.
    pub async fn turn_on(&self) -> Result<(), InsteonError> {
        self.command(EntityState::On).await
    }

    /// Switch off. See [`turn_on`](Self::turn_on).
    ///
    /// # Errors
    ///
    /// Returns the hub error of the failed command.
    pub async fn turn_off(&self) -> Result<(), InsteonError> {
        self.command(EntityState::Off).await
    }

    async fn poll(&self, force: bool) -> Result<bool, InsteonError> {
        let allowed = self.lock().throttle.try_acquire(force);
        if !allowed {
            tracing::trace!(device_id = %self.device_id, force, "refresh throttled");
            return Ok(self.is_on());
        }

        let status = self.device.status(STATUS_GROUP).await?;
        let reported = status.is_on()?;

        let mut cached = self.lock();
        cached.last_refreshed = Some(Utc::now());
        match reported {
            Some(on) => cached.state = EntityState::from(on),
            None => {
                tracing::debug!(
                    device_id = %self.device_id,
                    "status reply without level, keeping cached state"
                );
            }
        }
        Ok(cached.state.is_on())
    }

    async fn command(&self, target: EntityState) -> Result<(), InsteonError> {
        let previous = std::mem::replace(&mut self.lock().state, target);

        let result = match target {
            EntityState::On => self.device.turn_on().await,
            EntityState::Off => self.device.turn_off().await,
        };

        if let Err(err) = result {
            tracing::warn!(
                device_id = %self.device_id,
                error = %err,
                state = %target,
                "hub command failed, refreshing state"
            );
            self.lock().state = previous;
            if let Err(refresh_err) = self.force_refresh().await {
                tracing::warn!(
                    device_id = %self.device_id,
                    error = %refresh_err,
                    "corrective refresh failed"
                );
            }
            return Err(err);
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Cached> {
        self.cached.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
