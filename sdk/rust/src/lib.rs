//! Async client for the CRUD gateway.

pub mod client;

pub use client::{GatewayClient, GatewayError};
