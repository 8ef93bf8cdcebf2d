use haptic_chat_bridge::{
    ApiError, ApiResult, BridgeStatus, DeviceConnectOutcome, DeviceDescriptor, Settings,
};

pub mod view;

pub use view::{view_model, StatusLine, StatusTone, StepIndicator, WizardViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ServerSetup,
    DeviceSelection,
    ModelSetup,
    Ready,
}

pub const ALL_STEPS: [WizardStep; 4] = [
    WizardStep::ServerSetup,
    WizardStep::DeviceSelection,
    WizardStep::ModelSetup,
    WizardStep::Ready,
];

impl WizardStep {
    pub fn index(self) -> usize {
        match self {
            WizardStep::ServerSetup => 1,
            WizardStep::DeviceSelection => 2,
            WizardStep::ModelSetup => 3,
            WizardStep::Ready => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::ServerSetup => "Device server",
            WizardStep::DeviceSelection => "Device",
            WizardStep::ModelSetup => "Model server",
            WizardStep::Ready => "Ready",
        }
    }

    pub fn next(self) -> Self {
        match self {
            WizardStep::ServerSetup => WizardStep::DeviceSelection,
            WizardStep::DeviceSelection => WizardStep::ModelSetup,
            WizardStep::ModelSetup => WizardStep::Ready,
            WizardStep::Ready => WizardStep::Ready,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            WizardStep::ServerSetup => WizardStep::ServerSetup,
            WizardStep::DeviceSelection => WizardStep::ServerSetup,
            WizardStep::ModelSetup => WizardStep::DeviceSelection,
            WizardStep::Ready => WizardStep::ModelSetup,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WizardState {
    pub settings: Settings,
    pub step: WizardStep,
}

impl WizardState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            step: WizardStep::ServerSetup,
        }
    }
}

pub fn initial_step(
    server_connected: bool,
    device_connected: bool,
    model_connected: bool,
) -> WizardStep {
    match (server_connected, device_connected, model_connected) {
        (true, true, true) => WizardStep::Ready,
        (true, true, false) => WizardStep::ModelSetup,
        (true, false, _) => WizardStep::DeviceSelection,
        (false, _, _) => WizardStep::ServerSetup,
    }
}

pub fn reconcile_with_status(settings: &mut Settings, status: &BridgeStatus) {
    settings.device.server_connected = status.device_server_connected;
    settings.model.connected = status.model_server_connected;
    settings.normalize();
}

pub fn apply_device_connect(
    settings: &mut Settings,
    host: &str,
    port: &str,
    outcome: DeviceConnectOutcome,
) -> String {
    let device = &mut settings.device;
    device.server_connected = true;
    device.host = host.to_string();
    device.port = port.to_string();
    device.device_connected = outcome.device_connected;
    device.devices = outcome.devices;
    device.selected_device = outcome.device;

    let device_info = device
        .selected_device
        .as_ref()
        .map(|d| format!(" ({})", d.name))
        .unwrap_or_default();
    format!("Successfully connected to device server{device_info}")
}

pub fn select_device(settings: &mut Settings, index: u32) -> ApiResult<DeviceDescriptor> {
    let Some(device) = settings
        .device
        .devices
        .iter()
        .find(|d| d.index == index)
        .cloned()
    else {
        return Err(ApiError::NotFound(index));
    };

    settings.device.selected_device = Some(device.clone());
    settings.device.device_connected = true;
    Ok(device)
}

pub fn disconnect_device(settings: &mut Settings) {
    let device = &mut settings.device;
    device.server_connected = false;
    device.device_connected = false;
    device.selected_device = None;
    device.devices.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vibrator_a() -> DeviceDescriptor {
        DeviceDescriptor {
            index: 0,
            name: "Vibrator A".to_string(),
            actuator_count: 1,
            linear_actuator_count: 0,
            rotary_actuator_count: 0,
        }
    }

    #[test]
    fn initial_step_follows_connection_precedence() {
        assert_eq!(initial_step(false, false, false), WizardStep::ServerSetup);
        assert_eq!(initial_step(true, false, false), WizardStep::DeviceSelection);
        assert_eq!(initial_step(true, true, false), WizardStep::ModelSetup);
        assert_eq!(initial_step(true, true, true), WizardStep::Ready);

        // model connection alone never advances past the device steps
        assert_eq!(initial_step(false, false, true), WizardStep::ServerSetup);
        assert_eq!(initial_step(true, false, true), WizardStep::DeviceSelection);

        // device without server is an invalid combination, treated as disconnected
        assert_eq!(initial_step(false, true, false), WizardStep::ServerSetup);
        assert_eq!(initial_step(false, true, true), WizardStep::ServerSetup);
    }

    #[test]
    fn reconcile_takes_flags_from_live_status() {
        let mut settings = Settings::default();
        settings.device.device_connected = true;
        settings.device.selected_device = Some(vibrator_a());

        reconcile_with_status(
            &mut settings,
            &BridgeStatus {
                device_server_connected: false,
                model_server_connected: true,
                setup_complete: false,
            },
        );

        assert!(!settings.device.server_connected);
        assert!(!settings.device.device_connected);
        assert!(settings.device.selected_device.is_none());
        assert!(settings.model.connected);
    }

    #[test]
    fn reconcile_keeps_a_selected_device_while_the_server_is_up() {
        let mut settings = Settings::default();
        settings.device.server_connected = true;
        settings.device.device_connected = true;
        settings.device.devices = vec![vibrator_a()];
        settings.device.selected_device = Some(vibrator_a());

        reconcile_with_status(
            &mut settings,
            &BridgeStatus {
                device_server_connected: true,
                model_server_connected: false,
                setup_complete: false,
            },
        );

        assert!(settings.device.device_connected);
        assert_eq!(
            settings.device.selected_device.as_ref().map(|d| d.name.as_str()),
            Some("Vibrator A")
        );
    }

    #[test]
    fn apply_device_connect_stores_the_enumerated_devices() {
        let mut settings = Settings::default();
        let message = apply_device_connect(
            &mut settings,
            "127.0.0.1",
            "12345",
            DeviceConnectOutcome {
                server_connected: true,
                device_connected: false,
                device: None,
                devices: vec![vibrator_a()],
            },
        );

        assert!(settings.device.server_connected);
        assert!(!settings.device.device_connected);
        assert_eq!(settings.device.devices.len(), 1);
        assert_eq!(settings.device.host, "127.0.0.1");
        assert_eq!(settings.device.port, "12345");
        assert_eq!(message, "Successfully connected to device server");
    }

    #[test]
    fn select_device_with_unknown_index_changes_nothing() {
        let mut settings = Settings::default();
        settings.device.server_connected = true;
        settings.device.devices = vec![vibrator_a()];
        let before = settings.clone();

        let err = select_device(&mut settings, 7).expect_err("unknown index");
        assert!(matches!(err, ApiError::NotFound(7)));
        assert_eq!(settings, before);
    }

    #[test]
    fn select_device_is_idempotent() {
        let mut settings = Settings::default();
        settings.device.server_connected = true;
        settings.device.devices = vec![vibrator_a()];

        select_device(&mut settings, 0).expect("first selection");
        let after_first = settings.clone();
        select_device(&mut settings, 0).expect("second selection");

        assert_eq!(settings, after_first);
        assert!(settings.device.device_connected);
        assert_eq!(
            settings.device.selected_device.as_ref().map(|d| d.name.as_str()),
            Some("Vibrator A")
        );
    }

    #[test]
    fn disconnect_clears_every_device_field() {
        let mut settings = Settings::default();
        settings.device.server_connected = true;
        settings.device.device_connected = true;
        settings.device.devices = vec![vibrator_a()];
        settings.device.selected_device = Some(vibrator_a());

        disconnect_device(&mut settings);

        assert!(!settings.device.server_connected);
        assert!(!settings.device.device_connected);
        assert!(settings.device.selected_device.is_none());
        assert!(settings.device.devices.is_empty());
    }
}
