//! Buyer Registry - Payment webhook receiver and active buyer lookup
//!
//! This crate keeps a list of active buyer emails in sync with payment
//! provider events and lets other services verify buyer status with a
//! shared-secret token.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
