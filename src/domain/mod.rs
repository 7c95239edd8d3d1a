//! Domain layer containing business rules and domain types.
//!
//! # Module Organization
//!
//! - `membership` - Buyer list, webhook event vocabulary and verification tokens

pub mod membership;
