use super::{WizardState, WizardStep, ALL_STEPS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Muted,
    Pending,
    Success,
}

#[derive(Debug, Clone)]
pub struct StepIndicator {
    pub title: &'static str,
    pub active: bool,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub tone: StatusTone,
}

// Everything the terminal needs to paint a frame, derived without touching it.
#[derive(Debug, Clone)]
pub struct WizardViewModel {
    pub step: WizardStep,
    pub indicators: Vec<StepIndicator>,
    pub progress_percent: u16,
    pub device_status: StatusLine,
    pub model_status: StatusLine,
    pub connect_device_label: &'static str,
    pub connect_device_enabled: bool,
    pub disconnect_visible: bool,
    pub device_rows: Vec<String>,
    pub device_cursor: usize,
    pub select_enabled: bool,
    pub connect_model_label: &'static str,
    pub connect_model_enabled: bool,
    pub start_enabled: bool,
}

fn status_line(connected: bool, connecting: bool) -> StatusLine {
    if connecting {
        StatusLine {
            text: "Connecting to server...".to_string(),
            tone: StatusTone::Pending,
        }
    } else if connected {
        StatusLine {
            text: "Connected!".to_string(),
            tone: StatusTone::Success,
        }
    } else {
        StatusLine {
            text: "Not Connected".to_string(),
            tone: StatusTone::Muted,
        }
    }
}

pub fn view_model(
    state: &WizardState,
    device_connecting: bool,
    model_connecting: bool,
    device_cursor: usize,
) -> WizardViewModel {
    let device = &state.settings.device;
    let model = &state.settings.model;

    let indicators = ALL_STEPS
        .iter()
        .map(|step| StepIndicator {
            title: step.title(),
            active: *step == state.step,
            completed: match step {
                WizardStep::ServerSetup => device.server_connected,
                WizardStep::DeviceSelection => device.device_connected,
                WizardStep::ModelSetup => model.connected,
                WizardStep::Ready => device.device_connected && model.connected,
            },
        })
        .collect();

    let device_rows = device
        .devices
        .iter()
        .map(|d| {
            let marker = if device.selected_device.as_ref().map(|s| s.index) == Some(d.index) {
                "●"
            } else {
                "○"
            };
            format!("{marker} {}", d.summary())
        })
        .collect();

    WizardViewModel {
        step: state.step,
        indicators,
        progress_percent: ((state.step.index() as u16 - 1) * 100) / (ALL_STEPS.len() as u16 - 1),
        device_status: status_line(device.server_connected, device_connecting),
        model_status: status_line(model.connected, model_connecting),
        connect_device_label: if device_connecting {
            "Connecting..."
        } else if device.server_connected {
            "Reconnect"
        } else {
            "Connect to device server"
        },
        connect_device_enabled: !device_connecting,
        disconnect_visible: device.server_connected,
        device_rows,
        device_cursor,
        select_enabled: !device.devices.is_empty(),
        connect_model_label: if model_connecting {
            "Connecting..."
        } else if model.connected {
            "Reconnect"
        } else {
            "Connect to model server"
        },
        connect_model_enabled: device.device_connected && !model_connecting,
        start_enabled: device.device_connected && model.connected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haptic_chat_bridge::{DeviceDescriptor, Settings};

    fn state_with(device_connected: bool, model_connected: bool) -> WizardState {
        let mut settings = Settings::default();
        settings.device.server_connected = device_connected;
        settings.device.device_connected = device_connected;
        settings.model.connected = model_connected;
        WizardState::new(settings)
    }

    #[test]
    fn model_connect_is_gated_on_a_connected_device() {
        let vm = view_model(&state_with(false, false), false, false, 0);
        assert!(!vm.connect_model_enabled);

        let vm = view_model(&state_with(true, false), false, false, 0);
        assert!(vm.connect_model_enabled);
    }

    #[test]
    fn start_requires_both_connections() {
        assert!(!view_model(&state_with(true, false), false, false, 0).start_enabled);
        assert!(!view_model(&state_with(false, true), false, false, 0).start_enabled);
        assert!(view_model(&state_with(true, true), false, false, 0).start_enabled);
    }

    #[test]
    fn an_in_flight_request_disables_its_control() {
        let vm = view_model(&state_with(true, false), true, true, 0);
        assert!(!vm.connect_device_enabled);
        assert!(!vm.connect_model_enabled);
        assert_eq!(vm.device_status.text, "Connecting to server...");
    }

    #[test]
    fn reconnect_label_appears_once_connected() {
        let vm = view_model(&state_with(true, false), false, false, 0);
        assert_eq!(vm.connect_device_label, "Reconnect");
        assert!(vm.disconnect_visible);
    }

    #[test]
    fn device_rows_mark_the_selected_device() {
        let mut state = state_with(true, false);
        state.settings.device.devices = vec![
            DeviceDescriptor {
                index: 0,
                name: "Vibrator A".to_string(),
                actuator_count: 1,
                linear_actuator_count: 0,
                rotary_actuator_count: 0,
            },
            DeviceDescriptor {
                index: 1,
                name: "Stroker B".to_string(),
                actuator_count: 2,
                linear_actuator_count: 1,
                rotary_actuator_count: 1,
            },
        ];
        state.settings.device.selected_device = state.settings.device.devices.first().cloned();

        let vm = view_model(&state, false, false, 1);
        assert_eq!(vm.device_rows.len(), 2);
        assert!(vm.device_rows[0].starts_with('●'));
        assert!(vm.device_rows[1].starts_with('○'));
        assert!(vm.select_enabled);
        assert_eq!(vm.device_cursor, 1);
    }

    #[test]
    fn progress_tracks_the_current_step() {
        let mut state = state_with(false, false);
        assert_eq!(view_model(&state, false, false, 0).progress_percent, 0);
        state.step = WizardStep::ModelSetup;
        assert_eq!(view_model(&state, false, false, 0).progress_percent, 66);
        state.step = WizardStep::Ready;
        assert_eq!(view_model(&state, false, false, 0).progress_percent, 100);
    }
}
