pub mod gemini_client;
pub mod lead_generator;
pub mod openai_client;
pub mod session_store;
pub mod webhook_client;

pub use gemini_client::*;
pub use lead_generator::*;
pub use openai_client::*;
pub use session_store::*;
pub use webhook_client::*;
