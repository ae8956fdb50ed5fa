//! Backend for a two-tier token-bridge front end.
//!
//! This library provides:
//! - Max-transferable-amount computation with gas reservation
//! - Fixed-point conversion between smallest units and decimal strings
//! - Balance and network-status lookup over chain RPC providers
//! - Bridge-wide (L1/L2) balance assembly

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod units;
