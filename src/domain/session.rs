use chrono::{DateTime, Utc};

use super::{
    DeliveryResult, DeliveryState, Lead, NotificationKind, NotificationQueue, SearchRequest,
    ValidationError, WebhookTarget,
};

pub const GENERATION_IN_PROGRESS: &str = "Lead generation is already running. Please wait.";
pub const DELIVERY_IN_PROGRESS: &str = "Data is already being sent to the webhook. Please wait.";
pub const WEBHOOK_SAVED: &str = "Webhook URL saved successfully!";
pub const WEBHOOK_SENT: &str = "Form data sent to webhook successfully!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerationState {
    #[default]
    Idle,
    Generating,
}

/// Everything the page shows. Changed only through `apply` and the `begin_*`
/// guards, each of which consumes the old value and returns the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub form: Option<SearchRequest>,
    pub leads: Vec<Lead>,
    pub webhook: Option<WebhookTarget>,
    pub generation: GenerationState,
    pub delivery: DeliveryState,
    pub notifications: NotificationQueue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Notified {
        message: String,
        kind: NotificationKind,
    },
    GenerationSucceeded(Vec<Lead>),
    GenerationFailed(String),
    WebhookLoaded(WebhookTarget),
    WebhookSaved(WebhookTarget),
    DeliveryFinished(DeliveryResult),
    NotificationDismissed(i64),
}

impl SessionEvent {
    pub fn warning(error: &ValidationError) -> Self {
        SessionEvent::Notified {
            message: error.to_string(),
            kind: NotificationKind::Warning,
        }
    }
}

/// What a delivery needs once the session has agreed to send.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryJob {
    pub payload: SearchRequest,
    pub target: WebhookTarget,
}

impl Session {
    pub fn is_generating(&self) -> bool {
        self.generation == GenerationState::Generating
    }

    pub fn is_sending(&self) -> bool {
        self.delivery == DeliveryState::Sending
    }

    pub fn apply(self, event: SessionEvent, now: DateTime<Utc>) -> Self {
        let mut session = self.expire(now);
        let notifications = std::mem::take(&mut session.notifications);

        let notifications = match event {
            SessionEvent::Notified { message, kind } => notifications.push(message, kind, now),
            SessionEvent::GenerationSucceeded(leads) => {
                session.generation = GenerationState::Idle;
                let message = match leads.len() {
                    0 => "The model returned no leads. Try a broader search.".to_string(),
                    n => format!("Found {} leads. You can now send data to the webhook.", n),
                };
                let kind = if leads.is_empty() {
                    NotificationKind::Info
                } else {
                    NotificationKind::Success
                };
                session.leads = leads;
                notifications.push(message, kind, now)
            }
            SessionEvent::GenerationFailed(message) => {
                session.generation = GenerationState::Idle;
                notifications.push(message, NotificationKind::Error, now)
            }
            SessionEvent::WebhookLoaded(target) => {
                session.webhook = Some(target);
                notifications
            }
            SessionEvent::WebhookSaved(target) => {
                session.webhook = Some(target);
                notifications.push(WEBHOOK_SAVED, NotificationKind::Success, now)
            }
            SessionEvent::DeliveryFinished(result) => {
                if result.success {
                    session.delivery = DeliveryState::Delivered;
                    notifications.push(WEBHOOK_SENT, NotificationKind::Success, now)
                } else {
                    session.delivery = DeliveryState::Failed;
                    notifications.push(result.message, NotificationKind::Error, now)
                }
            }
            SessionEvent::NotificationDismissed(id) => notifications.dismiss(id),
        };

        session.notifications = notifications;
        session
    }

    /// Records the request and raises the loading flag. Returns `false` (with a
    /// warning queued) when a generation is already in flight.
    pub fn begin_generation(self, request: SearchRequest, now: DateTime<Utc>) -> (Self, bool) {
        if self.is_generating() {
            let session = self.apply(
                SessionEvent::Notified {
                    message: GENERATION_IN_PROGRESS.to_string(),
                    kind: NotificationKind::Warning,
                },
                now,
            );
            return (session, false);
        }

        let mut session = self.expire(now);
        session.generation = GenerationState::Generating;
        session.form = Some(request);
        session.notifications =
            session
                .notifications
                .push("Generating leads...", NotificationKind::Info, now);
        (session, true)
    }

    pub fn begin_delivery(self, now: DateTime<Utc>) -> (Self, Option<DeliveryJob>) {
        let refusal = if self.webhook.is_none() {
            Some(ValidationError::WebhookNotSet.to_string())
        } else if self.form.is_none() {
            Some(ValidationError::NothingToSend.to_string())
        } else if self.is_sending() {
            Some(DELIVERY_IN_PROGRESS.to_string())
        } else {
            None
        };

        if let Some(message) = refusal {
            let session = self.apply(
                SessionEvent::Notified {
                    message,
                    kind: NotificationKind::Warning,
                },
                now,
            );
            return (session, None);
        }

        let mut session = self.expire(now);
        session.delivery = DeliveryState::Sending;
        let job = match (&session.form, &session.webhook) {
            (Some(payload), Some(target)) => Some(DeliveryJob {
                payload: payload.clone(),
                target: target.clone(),
            }),
            _ => None,
        };
        (session, job)
    }

    fn expire(mut self, now: DateTime<Utc>) -> Self {
        self.notifications = self.notifications.expire(now);
        self
    }
}
