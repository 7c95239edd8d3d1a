//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates the buyer list store and the domain rules.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;
mod membership_store;

pub use handlers::{
    HandleWebhookCommand, HandleWebhookHandler, HandleWebhookResult, VerifyBuyerHandler,
    VerifyBuyerQuery,
};
pub use membership_store::{Lookup, MembershipStore, StartupReport};
