//! Switch platform: restores named switches, discovers new ones and
//! drives the one-time naming flow.

use std::sync::{Mutex, MutexGuard, PoisonError};

use insteon_local_domain::device::DeviceNames;
use insteon_local_domain::error::{InsteonError, NotFoundError, ValidationError};
use insteon_local_domain::id::HubDeviceId;

use crate::ports::{ConfigRequest, Configurator, DeviceNameStore, EntitySink, InsteonHub};
use crate::services::pending::PendingConfigurations;
use crate::services::switch::InsteonSwitch;

/// Shown on an outstanding prompt when its device is discovered again.
pub const DUPLICATE_REQUEST_MESSAGE: &str = "Failed to register, please try again.";

/// Shown on an outstanding prompt when the submitted name is blank.
pub const EMPTY_NAME_MESSAGE: &str = "Name must not be empty.";

/// What [`SwitchPlatform::setup`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupReport {
    /// Switches rebuilt from persisted names.
    pub restored: usize,
    /// Naming prompts issued for newly discovered switches.
    pub prompted: usize,
}

/// Outcome of [`SwitchPlatform::request_configuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A new prompt was shown.
    Prompted,
    /// A prompt was already outstanding; an error was shown on it instead.
    AlreadyPending,
}

/// Entry point of the integration, created once per platform activation.
///
/// Every collaborator is injected: the hub, the name store, the host's
/// configurator and the sink that receives new switches. Outstanding
/// naming prompts are tracked per platform instance.
pub struct SwitchPlatform<H, S, C, K>
where
    C: Configurator,
{
    hub: H,
    store: S,
    configurator: C,
    sink: K,
    pending: Mutex<PendingConfigurations<C::Handle>>,
}

impl<H, S, C, K> SwitchPlatform<H, S, C, K>
where
    H: InsteonHub,
    S: DeviceNameStore,
    C: Configurator,
    K: EntitySink<InsteonSwitch<H::Device>>,
{
    pub fn new(hub: H, store: S, configurator: C, sink: K) -> Self {
        Self {
            hub,
            store,
            configurator,
            sink,
            pending: Mutex::new(PendingConfigurations::new()),
        }
    }

    /// Restore switches from persisted names, then prompt for every linked
    /// switch that has no name yet.
    ///
    /// An unreadable name store is logged and treated as empty.
    ///
    /// # Errors
    ///
    /// Returns [`InsteonError::Hub`] if the hub cannot list its linked
    /// devices. Switches restored before that point stay registered.
    #[tracing::instrument(skip(self))]
    pub async fn setup(&self) -> Result<SetupReport, InsteonError> {
        let names = self.load_names().await;

        let restored: Vec<InsteonSwitch<H::Device>> = names
            .iter()
            .map(|(device_id, name)| InsteonSwitch::new(self.hub.device(device_id), name.clone()))
            .collect();
        let restored_count = restored.len();
        if !restored.is_empty() {
            self.sink.add_entities(restored);
        }

        let mut linked: Vec<_> = self.hub.linked_devices().await?.into_iter().collect();
        linked.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut prompted = 0;
        for (device_id, device) in linked {
            if !device.category.is_switch() {
                tracing::debug!(
                    %device_id,
                    category = %device.category,
                    "skipping non-switch device"
                );
                continue;
            }
            if names.contains_key(&device_id) {
                continue;
            }
            if self.request_configuration(&device_id, &device.display_model())
                == RequestOutcome::Prompted
            {
                prompted += 1;
            }
        }

        tracing::info!(
            restored = restored_count,
            prompted,
            "insteon switch platform ready"
        );
        Ok(SetupReport {
            restored: restored_count,
            prompted,
        })
    }

    /// Ask the user to name `device_id`. If a prompt is already
    /// outstanding for it, show an error on that prompt instead of opening
    /// a second one; the outstanding prompt is kept as is.
    pub fn request_configuration(&self, device_id: &HubDeviceId, model: &str) -> RequestOutcome {
        let mut pending = self.lock_pending();
        if let Some(handle) = pending.get(device_id) {
            tracing::warn!(%device_id, "configuration already pending");
            self.configurator.notify_errors(handle, DUPLICATE_REQUEST_MESSAGE);
            return RequestOutcome::AlreadyPending;
        }

        let handle = self
            .configurator
            .request_config(ConfigRequest::name_switch(device_id, model));
        pending.begin(device_id.clone(), handle);
        tracing::info!(%device_id, model, "requested name for new switch");
        RequestOutcome::Prompted
    }

    /// Handle the user's answer to a naming prompt: close the prompt,
    /// persist the name and register the new switch.
    ///
    /// Failing to persist the name is logged; the switch is registered
    /// regardless.
    ///
    /// # Errors
    ///
    /// - [`InsteonError::NotFound`] if no prompt is outstanding for `device_id`
    /// - [`InsteonError::Validation`] if `name` is blank; the prompt stays
    ///   open and shows an error
    #[tracing::instrument(skip(self))]
    pub async fn submit_name(
        &self,
        device_id: &HubDeviceId,
        name: &str,
    ) -> Result<(), InsteonError> {
        let name = name.trim();
        let handle = {
            let mut pending = self.lock_pending();
            let Some(handle) = pending.get(device_id) else {
                return Err(NotFoundError {
                    entity: "PendingConfiguration",
                    id: device_id.to_string(),
                }
                .into());
            };
            if name.is_empty() {
                self.configurator.notify_errors(handle, EMPTY_NAME_MESSAGE);
                return Err(ValidationError::EmptyName.into());
            }
            pending.complete(device_id)
        };
        if let Some(handle) = handle {
            self.configurator.request_done(handle);
        }
        tracing::info!(%device_id, "device configuration done");

        let mut names = self.load_names().await;
        names
            .entry(device_id.clone())
            .or_insert_with(|| name.to_string());
        if let Err(err) = self.store.save(&names).await {
            tracing::error!(error = %err, "failed to save configuration file");
        }

        let switch = InsteonSwitch::new(self.hub.device(device_id), name);
        self.sink.add_entities(vec![switch]);
        Ok(())
    }

    /// Whether a naming prompt is outstanding for `device_id`.
    #[must_use]
    pub fn is_pending(&self, device_id: &HubDeviceId) -> bool {
        self.lock_pending().is_pending(device_id)
    }

    /// Ids with an outstanding naming prompt, sorted.
    #[must_use]
    pub fn pending_ids(&self) -> Vec<HubDeviceId> {
        self.lock_pending().pending_ids()
    }

    pub fn hub(&self) -> &H {
        &self.hub
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn configurator(&self) -> &C {
        &self.configurator
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    async fn load_names(&self) -> DeviceNames {
        match self.store.load().await {
            Ok(names) => names,
            Err(err) => {
                tracing::error!(
                    error = %err,
                    "reading config file failed, assuming no configured switches"
                );
                DeviceNames::new()
            }
        }
    }

    fn lock_pending(&self) -> MutexGuard<'_, PendingConfigurations<C::Handle>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SwitchRegistry;
    use crate::testing::{FakeDevice, FakeHub, InMemoryStore, RecordingConfigurator, id};

    type TestPlatform = SwitchPlatform<
        FakeHub,
        InMemoryStore,
        RecordingConfigurator,
        SwitchRegistry<InsteonSwitch<FakeDevice>>,
    >;

    fn make_platform(hub: FakeHub, store: InMemoryStore) -> TestPlatform {
        SwitchPlatform::new(
            hub,
            store,
            RecordingConfigurator::default(),
            SwitchRegistry::new(),
        )
    }

    fn registered_names(platform: &TestPlatform) -> Vec<String> {
        platform
            .sink()
            .entities()
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    #[tokio::test]
    async fn should_restore_switches_from_persisted_names() {
        let store = InMemoryStore::with_names(&[("1A2B3C", "Porch"), ("4D5E6F", "Garage")]);
        let platform = make_platform(FakeHub::default(), store);

        let report = platform.setup().await.unwrap();

        assert_eq!(report, SetupReport { restored: 2, prompted: 0 });
        assert_eq!(registered_names(&platform), vec!["Porch", "Garage"]);
        let unique_ids: Vec<String> = platform
            .sink()
            .entities()
            .iter()
            .map(|s| s.unique_id())
            .collect();
        assert_eq!(
            unique_ids,
            vec!["insteon_local_1A2B3C", "insteon_local_4D5E6F"]
        );
    }

    #[tokio::test]
    async fn should_prompt_once_per_unconfigured_switch() {
        let hub = FakeHub::default();
        hub.link("1A2B3C", "switch");
        hub.link("4D5E6F", "switch");
        hub.link("7A8B9C", "switch");
        let platform = make_platform(hub, InMemoryStore::default());

        let report = platform.setup().await.unwrap();

        assert_eq!(report.prompted, 3);
        assert_eq!(platform.configurator().requests.lock().unwrap().len(), 3);
        assert_eq!(
            platform.pending_ids(),
            vec![id("1A2B3C"), id("4D5E6F"), id("7A8B9C")]
        );
        assert!(platform.sink().is_empty());
    }

    #[tokio::test]
    async fn should_not_prompt_for_configured_or_non_switch_devices() {
        let hub = FakeHub::default();
        hub.link("1A2B3C", "switch");
        hub.link("4D5E6F", "dimmer");
        hub.link("7A8B9C", "switch");
        let store = InMemoryStore::with_names(&[("1A2B3C", "Porch")]);
        let platform = make_platform(hub, store);

        let report = platform.setup().await.unwrap();

        assert_eq!(report, SetupReport { restored: 1, prompted: 1 });
        assert_eq!(platform.pending_ids(), vec![id("7A8B9C")]);
        let requests = platform.configurator().requests.lock().unwrap();
        assert_eq!(
            requests[0].title,
            "Insteon Switch SwitchLinc Relay 2477S addr: 7A8B9C"
        );
    }

    #[tokio::test]
    async fn should_treat_unreadable_store_as_empty() {
        let hub = FakeHub::default();
        hub.link("1A2B3C", "switch");
        let store = InMemoryStore {
            fail_load: true,
            ..InMemoryStore::with_names(&[("1A2B3C", "Porch")])
        };
        let platform = make_platform(hub, store);

        let report = platform.setup().await.unwrap();

        assert_eq!(report, SetupReport { restored: 0, prompted: 1 });
        assert!(platform.is_pending(&id("1A2B3C")));
    }

    #[tokio::test]
    async fn should_propagate_hub_error_after_restoring() {
        let hub = FakeHub {
            fail_linked: true,
            ..FakeHub::default()
        };
        let store = InMemoryStore::with_names(&[("1A2B3C", "Porch")]);
        let platform = make_platform(hub, store);

        let result = platform.setup().await;

        assert!(matches!(result, Err(InsteonError::Hub(_))));
        assert_eq!(platform.sink().len(), 1);
    }

    #[tokio::test]
    async fn should_notify_error_instead_of_prompting_twice() {
        let hub = FakeHub::default();
        hub.link("1A2B3C", "switch");
        let platform = make_platform(hub, InMemoryStore::default());
        platform.setup().await.unwrap();

        let outcome = platform.request_configuration(&id("1A2B3C"), "SwitchLinc Relay 2477S");

        assert_eq!(outcome, RequestOutcome::AlreadyPending);
        assert_eq!(platform.pending_ids().len(), 1);
        assert_eq!(platform.configurator().requests.lock().unwrap().len(), 1);
        assert_eq!(
            *platform.configurator().errors.lock().unwrap(),
            vec![(0, DUPLICATE_REQUEST_MESSAGE.to_string())]
        );
    }

    #[tokio::test]
    async fn should_notify_error_when_setup_runs_twice_before_answer() {
        let hub = FakeHub::default();
        hub.link("1A2B3C", "switch");
        let platform = make_platform(hub, InMemoryStore::default());

        platform.setup().await.unwrap();
        let second = platform.setup().await.unwrap();

        assert_eq!(second.prompted, 0);
        assert_eq!(platform.pending_ids(), vec![id("1A2B3C")]);
        assert_eq!(platform.configurator().errors.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_persist_and_register_switch_on_submission() {
        let hub = FakeHub::default();
        hub.link("1A2B3C", "switch");
        let platform = make_platform(hub, InMemoryStore::default());
        platform.setup().await.unwrap();

        platform.submit_name(&id("1A2B3C"), "Porch").await.unwrap();

        assert!(!platform.is_pending(&id("1A2B3C")));
        assert_eq!(*platform.configurator().done.lock().unwrap(), vec![0]);
        assert_eq!(
            platform.store().names.lock().unwrap().get("1A2B3C").map(String::as_str),
            Some("Porch")
        );
        assert_eq!(registered_names(&platform), vec!["Porch"]);
        assert_eq!(
            platform.sink().entities()[0].unique_id(),
            "insteon_local_1A2B3C"
        );
    }

    #[tokio::test]
    async fn should_keep_other_persisted_names_on_submission() {
        let hub = FakeHub::default();
        hub.link("4D5E6F", "switch");
        let store = InMemoryStore::with_names(&[("1A2B3C", "Porch")]);
        let platform = make_platform(hub, store);
        platform.setup().await.unwrap();

        platform.submit_name(&id("4D5E6F"), "  Garage ").await.unwrap();

        let names = platform.store().names.lock().unwrap().clone();
        assert_eq!(names.len(), 2);
        assert_eq!(names.get("1A2B3C").map(String::as_str), Some("Porch"));
        assert_eq!(names.get("4D5E6F").map(String::as_str), Some("Garage"));
        assert_eq!(registered_names(&platform), vec!["Porch", "Garage"]);
    }

    #[tokio::test]
    async fn should_register_once_even_when_submitted_twice() {
        let hub = FakeHub::default();
        hub.link("1A2B3C", "switch");
        let platform = make_platform(hub, InMemoryStore::default());
        platform.setup().await.unwrap();

        platform.submit_name(&id("1A2B3C"), "Porch").await.unwrap();
        let second = platform.submit_name(&id("1A2B3C"), "Porch").await;

        assert!(matches!(second, Err(InsteonError::NotFound(_))));
        assert_eq!(platform.sink().len(), 1);
    }

    #[tokio::test]
    async fn should_reject_submission_without_pending_prompt() {
        let platform = make_platform(FakeHub::default(), InMemoryStore::default());

        let result = platform.submit_name(&id("1A2B3C"), "Porch").await;

        assert!(matches!(result, Err(InsteonError::NotFound(_))));
        assert!(platform.sink().is_empty());
        assert_eq!(*platform.store().saves.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn should_keep_prompt_open_when_name_is_blank() {
        let hub = FakeHub::default();
        hub.link("1A2B3C", "switch");
        let platform = make_platform(hub, InMemoryStore::default());
        platform.setup().await.unwrap();

        let result = platform.submit_name(&id("1A2B3C"), "   ").await;

        assert!(matches!(
            result,
            Err(InsteonError::Validation(ValidationError::EmptyName))
        ));
        assert!(platform.is_pending(&id("1A2B3C")));
        assert_eq!(
            *platform.configurator().errors.lock().unwrap(),
            vec![(0, EMPTY_NAME_MESSAGE.to_string())]
        );
        assert!(platform.sink().is_empty());
    }

    #[tokio::test]
    async fn should_register_switch_even_when_save_fails() {
        let hub = FakeHub::default();
        hub.link("1A2B3C", "switch");
        let store = InMemoryStore {
            fail_save: true,
            ..InMemoryStore::default()
        };
        let platform = make_platform(hub, store);
        platform.setup().await.unwrap();

        platform.submit_name(&id("1A2B3C"), "Porch").await.unwrap();

        assert_eq!(*platform.store().saves.lock().unwrap(), 1);
        assert!(platform.store().names.lock().unwrap().is_empty());
        assert_eq!(platform.sink().len(), 1);
    }

    #[tokio::test]
    async fn should_drive_registered_switch_through_hub_device() {
        let hub = FakeHub::default();
        hub.link("1A2B3C", "switch");
        let platform = make_platform(hub, InMemoryStore::default());
        platform.setup().await.unwrap();
        platform.submit_name(&id("1A2B3C"), "Porch").await.unwrap();

        let switch = platform.sink().entities()[0].clone();
        switch.turn_on().await.unwrap();

        let device = platform.hub().device(&id("1A2B3C"));
        assert_eq!(device.state.lock().unwrap().on_calls, 1);
        assert!(switch.is_on());
    }
}
