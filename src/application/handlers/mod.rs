//! Application handlers.
//!
//! ## Commands
//! - Processing payment provider webhooks
//!
//! ## Queries
//! - Token-verified buyer lookup

mod handle_webhook;
mod verify_buyer;

// Commands
pub use handle_webhook::{HandleWebhookCommand, HandleWebhookHandler, HandleWebhookResult};

// Queries
pub use verify_buyer::{VerifyBuyerHandler, VerifyBuyerQuery};
