//! Lockbridge library.
//!
//! Bridges a Bluetooth smart lock to a host key-value state store.
//! Exposes the pure-logic modules for integration testing; the binary in
//! `main.rs` wires the host-side adapters together.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod lock;
pub mod logging;
