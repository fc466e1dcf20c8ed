use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// How long a notification stays on screen unless dismissed earlier.
pub const DISPLAY_TIMEOUT_MS: i64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationEvent {
    pub id: i64,
    pub message: String,
    pub kind: NotificationKind,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationQueue {
    items: Vec<NotificationEvent>,
    last_id: i64,
}

impl NotificationQueue {
    /// Ids come from the wall clock in milliseconds, bumped when two
    /// notifications land in the same millisecond.
    pub fn push(
        mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: DateTime<Utc>,
    ) -> Self {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.items.push(NotificationEvent {
            id,
            message: message.into(),
            kind,
            created_at: now,
        });
        self.last_id = id;
        self
    }

    pub fn dismiss(mut self, id: i64) -> Self {
        self.items.retain(|n| n.id != id);
        self
    }

    pub fn expire(mut self, now: DateTime<Utc>) -> Self {
        let timeout = Duration::milliseconds(DISPLAY_TIMEOUT_MS);
        self.items.retain(|n| now - n.created_at < timeout);
        self
    }

    pub fn items(&self) -> &[NotificationEvent] {
        &self.items
    }
}
