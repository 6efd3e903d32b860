//! Terminal implementation of the configurator port.
//!
//! Prompts are written to a terminal; answers come back as
//! `<device id> <name>` lines, see [`crate::command`].

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use insteon_local_app::ports::{ConfigRequest, Configurator};
use insteon_local_domain::id::HubDeviceId;

pub struct TerminalConfigurator<W> {
    out: Mutex<W>,
}

impl TerminalConfigurator<std::io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalConfigurator<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn print(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = writeln!(out, "{text}").and_then(|()| out.flush()) {
            tracing::warn!(error = %err, "failed to write prompt");
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Configurator for TerminalConfigurator<W> {
    type Handle = HubDeviceId;

    fn request_config(&self, request: ConfigRequest) -> HubDeviceId {
        let fields = request
            .fields
            .iter()
            .map(|field| field.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.print(&format!(
            "== {} ==\n{}\n[{}] type: {} <{}>",
            request.title, request.description, request.submit_caption, request.device_id, fields
        ));
        request.device_id
    }

    fn notify_errors(&self, handle: &HubDeviceId, message: &str) {
        self.print(&format!("!! {handle}: {message}"));
    }

    fn request_done(&self, handle: HubDeviceId) {
        self.print(&format!("ok {handle} configured"));
    }
}
