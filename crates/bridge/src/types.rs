use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescriptor {
    pub index: u32,
    pub name: String,
    #[serde(default)]
    pub actuator_count: u32,
    #[serde(default)]
    pub linear_actuator_count: u32,
    #[serde(default)]
    pub rotary_actuator_count: u32,
}

impl DeviceDescriptor {
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.linear_actuator_count > 0 {
            parts.push(format!("{} linear", self.linear_actuator_count));
        }
        if self.rotary_actuator_count > 0 {
            parts.push(format!("{} rotary", self.rotary_actuator_count));
        }
        if parts.is_empty() {
            format!("{} ({} actuators)", self.name, self.actuator_count)
        } else {
            format!("{} ({})", self.name, parts.join(", "))
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeStatus {
    pub device_server_connected: bool,
    pub model_server_connected: bool,
    pub setup_complete: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DeviceConnectOutcome {
    pub server_connected: bool,
    pub device_connected: bool,
    pub device: Option<DeviceDescriptor>,
    pub devices: Vec<DeviceDescriptor>,
}
