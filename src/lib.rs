//! AR Fee Engine - Authorized-representative fee computation
//!
//! This crate computes which creditor-committee and class meetings an
//! authorized representative may bill, at what rate, and the facilitator
//! fee derived from that total.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
