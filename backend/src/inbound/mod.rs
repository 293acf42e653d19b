//! Inbound adapters translating external requests into domain port calls.
//!
//! HTTP handlers live under [`http`] and keep actix details at the edge.

pub mod http;
