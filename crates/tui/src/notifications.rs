use chrono::{DateTime, Duration, Utc};

pub const NOTIFICATION_TTL_SECONDS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub text: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity,
            created_at: Utc::now(),
        }
    }

    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::seconds(NOTIFICATION_TTL_SECONDS)
    }
}

pub fn prune(notifications: &mut Vec<Notification>, now: DateTime<Utc>) {
    notifications.retain(|n| !n.expired_at(now));
}
