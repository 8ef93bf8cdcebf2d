use super::*;

impl App {
    pub(super) fn go_to_step(&mut self, step: WizardStep) {
        if step != self.wizard.step {
            self.field_focus = 0;
        }
        self.wizard.step = step;
        self.persist();
    }

    pub(super) fn connect_device_server(&mut self) {
        if self.device_connecting {
            return;
        }

        let device = &self.wizard.settings.device;
        let (host, port) = (device.host.clone(), device.port.clone());
        if host.is_empty() || port.is_empty() {
            self.notify_api_error(&ApiError::Validation(
                "Device server host and port are required".to_string(),
            ));
            return;
        }

        self.device_connecting = true;
        self.notify(Severity::Info, "Connecting to device server...");

        let bridge = self.bridge.clone();
        self.spawn_app_task(async move {
            match bridge.connect_device_server(&host, &port).await {
                Ok(outcome) => AppAsyncEvent::DeviceConnectFinished {
                    host,
                    port,
                    outcome: Some(outcome),
                    error: None,
                },
                Err(e) => AppAsyncEvent::DeviceConnectFinished {
                    host,
                    port,
                    outcome: None,
                    error: Some(e.user_message()),
                },
            }
        });
    }

    pub(super) fn disconnect_device_server(&mut self) {
        wizard::disconnect_device(&mut self.wizard.settings);
        self.device_cursor = 0;
        self.persist();
        self.notify(Severity::Info, "Disconnected from device server");

        if self.config.wizard.remote_disconnect {
            let bridge = self.bridge.clone();
            self.spawn_app_task(async move {
                let error = bridge
                    .disconnect_device_server()
                    .await
                    .err()
                    .map(|e| e.user_message());
                AppAsyncEvent::DeviceDisconnectFinished { error }
            });
        }
    }

    pub(super) fn select_device(&mut self, index: u32) {
        match wizard::select_device(&mut self.wizard.settings, index) {
            Ok(device) => {
                self.persist();
                self.notify(Severity::Success, format!("Selected {}", device.name));
            }
            Err(e) => self.notify_api_error(&e),
        }
    }

    pub(super) fn connect_model_server(&mut self) {
        if self.model_connecting {
            return;
        }
        if !self.wizard.settings.device.device_connected {
            self.notify(
                Severity::Warning,
                "Connect a device before the model server",
            );
            return;
        }

        // the submitted fields are saved before the attempt, success or not
        self.persist();

        let model = &self.wizard.settings.model;
        let (host, port, api_key) = (
            model.host.clone(),
            model.port.clone(),
            model.api_key.clone(),
        );
        if host.is_empty() || port.is_empty() {
            self.notify_api_error(&ApiError::Validation(
                "Model server host and port are required".to_string(),
            ));
            return;
        }

        self.model_connecting = true;
        self.notify(Severity::Info, "Connecting to model server...");

        let bridge = self.bridge.clone();
        self.spawn_app_task(async move {
            let error = bridge
                .connect_model_server(&host, &port, &api_key)
                .await
                .err()
                .map(|e| e.user_message());
            AppAsyncEvent::ModelConnectFinished { error }
        });
    }

    pub(super) fn complete_setup(&mut self) {
        let device_connected = self.wizard.settings.device.device_connected;
        let model_connected = self.wizard.settings.model.connected;
        if !(device_connected && model_connected) {
            return;
        }

        // best-effort; the transition to the main view does not wait for it
        let bridge = self.bridge.clone();
        self.spawn_app_task(async move {
            let error = bridge
                .mark_setup_complete(device_connected, model_connected)
                .await
                .err()
                .map(|e| e.user_message());
            AppAsyncEvent::SetupCompleteMarked { error }
        });

        self.in_wizard = false;
        self.notify(
            Severity::Success,
            "Setup complete! You can now use haptic-chat.",
        );
    }

    pub(super) fn run_step_action(&mut self) {
        match self.wizard.step {
            WizardStep::ServerSetup => self.connect_device_server(),
            WizardStep::DeviceSelection => {
                let devices = &self.wizard.settings.device.devices;
                if devices.is_empty() {
                    // re-connecting doubles as a rescan
                    self.connect_device_server();
                } else if let Some(device) = devices.get(self.device_cursor) {
                    let index = device.index;
                    self.select_device(index);
                }
            }
            WizardStep::ModelSetup => self.connect_model_server(),
            WizardStep::Ready => self.complete_setup(),
        }
    }
}
