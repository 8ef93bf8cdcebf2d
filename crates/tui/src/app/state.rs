use super::*;

pub struct App {
    pub should_quit: bool,
    pub config: Config,
    pub settings_path: PathBuf,
    pub wizard: WizardState,
    pub in_wizard: bool,
    pub is_loading: bool,
    pub loading_message: String,
    pub device_connecting: bool,
    pub model_connecting: bool,
    pub device_cursor: usize,
    pub field_focus: usize,
    pub show_help: bool,
    pub keybinds: Keybinds,
    pub notifications: Vec<Notification>,
    pub bridge: BridgeClient,
    pub app_async_tx: Option<mpsc::UnboundedSender<AppAsyncEvent>>,
    pub app_async_rx: Option<mpsc::UnboundedReceiver<AppAsyncEvent>>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl App {
    pub fn new(config: Config) -> Self {
        let (app_async_tx, app_async_rx) = mpsc::unbounded_channel();
        let settings_path = Settings::default_path().unwrap_or_else(|e| {
            tracing::warn!("falling back to a local settings file: {e}");
            PathBuf::from("settings.json")
        });
        let bridge = BridgeClient::new(
            &config.bridge.base_url,
            Duration::from_secs(config.bridge.timeout_seconds),
        );

        Self {
            should_quit: false,
            config,
            settings_path,
            wizard: WizardState::new(Settings::default()),
            in_wizard: true,
            is_loading: true,
            loading_message: "Checking connection status...".to_string(),
            device_connecting: false,
            model_connecting: false,
            device_cursor: 0,
            field_focus: 0,
            show_help: false,
            keybinds: Keybinds,
            notifications: Vec::new(),
            bridge,
            app_async_tx: Some(app_async_tx),
            app_async_rx: Some(app_async_rx),
        }
    }
}
