use serde::Serialize;

pub const DELIVERED_MESSAGE: &str = "Data sent successfully";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryResult {
    pub success: bool,
    pub message: String,
}

impl DeliveryResult {
    pub fn delivered() -> Self {
        DeliveryResult {
            success: true,
            message: DELIVERED_MESSAGE.to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        DeliveryResult {
            success: false,
            message: message.into(),
        }
    }
}

/// Idle -> Sending -> {Delivered, Failed}. One POST per attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryState {
    #[default]
    Idle,
    Sending,
    Delivered,
    Failed,
}
