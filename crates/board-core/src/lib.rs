//! Core types and services for the bounty board: listing records, the
//! lifecycle classifier, configuration, and the listings API client.

pub mod api;
pub mod config;
pub mod lifecycle;
pub mod listing;
pub mod platform;
