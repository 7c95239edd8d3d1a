//! Membership domain module.
//!
//! Buyer list set semantics, webhook event vocabulary and verification tokens.
//!
//! # Module Structure
//!
//! - `list` - MembershipList, the set of active buyer emails
//! - `event` - WebhookEvent payload and the closed EventKind vocabulary
//! - `token` - SHA-256 verification tokens
//! - `errors` - WebhookError and VerificationError with HTTP status mapping

mod errors;
mod event;
mod list;
mod token;

pub use errors::{VerificationError, WebhookError};
pub use event::{
    CustomerInfo, EventKind, MembershipAction, OrderInfo, PaymentMethod, ProductInfo,
    SubscriptionInfo, WebhookEvent,
};
pub use list::MembershipList;
pub use token::{expected_token, token_matches};
