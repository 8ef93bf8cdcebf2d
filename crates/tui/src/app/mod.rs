use crate::config::Config;
use crate::keybinds::Keybinds;
use crate::notifications::{self, Notification, Severity};
use crate::wizard::{self, WizardState, WizardStep};
use anyhow::Result;
use chrono::Utc;
use haptic_chat_bridge::{ApiError, BridgeClient, Settings};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

mod actions;
mod effects;
mod input;
mod render;
mod state;
mod types;

pub use state::App;
pub use types::AppAsyncEvent;

impl App {
    pub(super) fn notify(&mut self, severity: Severity, text: impl Into<String>) {
        self.notifications.push(Notification::new(severity, text));
    }

    pub(super) fn report_error(&mut self, context: &str, error: impl std::fmt::Display) {
        let message = format!("{context}: {error}");
        tracing::warn!("{message}");
        self.notifications
            .push(Notification::new(Severity::Error, message));
    }

    pub(super) fn notify_api_error(&mut self, error: &ApiError) {
        tracing::warn!("{error}");
        self.notifications
            .push(Notification::new(Severity::Error, error.user_message()));
    }

    pub(super) fn persist(&mut self) {
        if let Err(e) = self.wizard.settings.save(&self.settings_path) {
            self.report_error("Failed to save settings", e);
        }
    }

    pub fn tick(&mut self) {
        notifications::prune(&mut self.notifications, Utc::now());
    }

    pub(super) fn spawn_app_task<F>(&self, future: F)
    where
        F: Future<Output = AppAsyncEvent> + Send + 'static,
    {
        if let Some(tx) = self.app_async_tx.clone() {
            tokio::spawn(async move {
                let event = future.await;
                let _ = tx.send(event);
            });
        }
    }
}
