use super::*;

impl App {
    pub async fn init(&mut self) -> Result<()> {
        self.wizard.settings = Settings::load_or_default(&self.settings_path);

        match self.bridge.status().await {
            Ok(status) => {
                wizard::reconcile_with_status(&mut self.wizard.settings, &status);
                self.wizard.step = wizard::initial_step(
                    self.wizard.settings.device.server_connected,
                    self.wizard.settings.device.device_connected,
                    self.wizard.settings.model.connected,
                );
                if status.setup_complete && self.wizard.step == WizardStep::Ready {
                    // an earlier session finished setup, go straight to the main view
                    self.in_wizard = false;
                }
                self.persist();
            }
            Err(e) => {
                tracing::warn!("initial status check failed: {}", e.user_message());
                self.wizard.step = WizardStep::ServerSetup;
            }
        }

        self.is_loading = false;
        Ok(())
    }

    pub fn process_async_events(&mut self) {
        let mut events = Vec::new();
        if let Some(ref mut rx) = self.app_async_rx {
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
        }

        for event in events {
            match event {
                AppAsyncEvent::DeviceConnectFinished {
                    host,
                    port,
                    outcome,
                    error,
                } => {
                    self.device_connecting = false;
                    if let Some(err) = error {
                        self.notify(Severity::Error, err);
                    } else if let Some(outcome) = outcome {
                        let message = wizard::apply_device_connect(
                            &mut self.wizard.settings,
                            &host,
                            &port,
                            outcome,
                        );
                        self.device_cursor = 0;
                        self.persist();
                        self.notify(Severity::Success, message);
                    }
                }
                AppAsyncEvent::DeviceDisconnectFinished { error } => {
                    if let Some(err) = error {
                        // the local reset already happened; the remote call is advisory
                        self.report_error("Device server disconnect", err);
                    }
                }
                AppAsyncEvent::ModelConnectFinished { error } => {
                    self.model_connecting = false;
                    if let Some(err) = error {
                        self.notify(Severity::Error, err);
                    } else {
                        self.wizard.settings.model.connected = true;
                        self.persist();
                        self.notify(Severity::Success, "Successfully connected to model server");
                    }
                }
                AppAsyncEvent::SetupCompleteMarked { error } => {
                    if let Some(err) = error {
                        tracing::warn!("failed to mark setup complete: {err}");
                    }
                }
            }
        }
    }
}
