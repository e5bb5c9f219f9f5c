//! WHOIS lookups for registration details of taken domains.

pub mod client;
pub mod registry;

pub use client::{WhoisClient, WhoisRecord};
