//! Configurator port: the host's interactive configuration subsystem.
//!
//! The platform asks the configurator to show a form; the host later
//! routes the user's answer back through
//! [`SwitchPlatform::submit_name`](crate::services::platform::SwitchPlatform::submit_name),
//! using [`ConfigRequest::device_id`] to know which device it belongs to.

use insteon_local_domain::id::HubDeviceId;

/// Picture shown next to Insteon configuration prompts.
pub const ENTITY_PICTURE: &str = "/static/images/config_insteon.png";

/// One input field of a configuration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigField {
    pub id: String,
    pub name: String,
    pub field_type: String,
}

/// A form the host should present to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRequest {
    /// Device the answer belongs to.
    pub device_id: HubDeviceId,
    pub title: String,
    pub description: String,
    pub entity_picture: String,
    pub submit_caption: String,
    pub fields: Vec<ConfigField>,
}

impl ConfigRequest {
    /// Form asking for the friendly name of a newly discovered switch.
    ///
    /// `model` is the display model, e.g. `SwitchLinc Relay 2477S`.
    #[must_use]
    pub fn name_switch(device_id: &HubDeviceId, model: &str) -> Self {
        Self {
            device_id: device_id.clone(),
            title: format!("Insteon Switch {model} addr: {device_id}"),
            description: format!("Enter a name for {model} addr: {device_id}"),
            entity_picture: ENTITY_PICTURE.to_string(),
            submit_caption: "Confirm".to_string(),
            fields: vec![ConfigField {
                id: "name".to_string(),
                name: "Name".to_string(),
                field_type: String::new(),
            }],
        }
    }
}

/// Host service that prompts the user.
///
/// Implementations must not call back into the platform from within these
/// methods; submissions arrive later, from the host's own context.
pub trait Configurator: Send + Sync {
    /// Opaque handle identifying an outstanding request.
    type Handle: Send + Sync + 'static;

    /// Show a form and return a handle to it.
    fn request_config(&self, request: ConfigRequest) -> Self::Handle;

    /// Show an error on an outstanding form.
    fn notify_errors(&self, handle: &Self::Handle, message: &str);

    /// Close a form once its answer has been handled.
    fn request_done(&self, handle: Self::Handle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_describe_switch_naming_form() {
        let id = HubDeviceId::new("1A2B3C").unwrap();
        let request = ConfigRequest::name_switch(&id, "SwitchLinc Relay 2477S");

        assert_eq!(request.device_id, id);
        assert_eq!(
            request.title,
            "Insteon Switch SwitchLinc Relay 2477S addr: 1A2B3C"
        );
        assert_eq!(
            request.description,
            "Enter a name for SwitchLinc Relay 2477S addr: 1A2B3C"
        );
        assert_eq!(request.entity_picture, ENTITY_PICTURE);
        assert_eq!(request.submit_caption, "Confirm");
        assert_eq!(request.fields.len(), 1);
        assert_eq!(request.fields[0].id, "name");
        assert_eq!(request.fields[0].name, "Name");
        assert!(request.fields[0].field_type.is_empty());
    }
}
