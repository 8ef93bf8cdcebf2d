use haptic_chat_bridge::DeviceConnectOutcome;

pub enum AppAsyncEvent {
    DeviceConnectFinished {
        host: String,
        port: String,
        outcome: Option<DeviceConnectOutcome>,
        error: Option<String>,
    },
    DeviceDisconnectFinished {
        error: Option<String>,
    },
    ModelConnectFinished {
        error: Option<String>,
    },
    SetupCompleteMarked {
        error: Option<String>,
    },
}
