pub mod delivery;
pub mod lead;
pub mod notification;
pub mod search_request;
pub mod session;
pub mod webhook_target;

pub use delivery::*;
pub use lead::*;
pub use notification::*;
pub use search_request::*;
pub use session::*;
pub use webhook_target::*;

/// Input problems caught before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please provide both a search query and a location.")]
    MissingQueryOrLocation,
    #[error("Lead count must be between 1 and 200, got {0}.")]
    LeadCountOutOfRange(u32),
    #[error("Lead count must be a number or \"unlimited\", got \"{0}\".")]
    LeadCountNotANumber(String),
    #[error("Please enter a valid URL.")]
    InvalidWebhookUrl(String),
    #[error("Webhook URL is not set. Please set it first.")]
    WebhookNotSet,
    #[error("Please fill out the form and generate leads first.")]
    NothingToSend,
}
