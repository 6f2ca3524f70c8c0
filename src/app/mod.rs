//! Application core — orchestration, zero I/O.
//!
//! This module wires the lock domain (status translation, command
//! dispatch) to the outside world.  All interaction with the lock and the
//! host store happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without a real device or host.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
