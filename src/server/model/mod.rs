//! Domain models and parameter types.
//!
//! This module contains the registry document and everything stored in it, plus
//! the heartbeat grammar and the pack whitelist. Models are plain data with the
//! validation rules attached; none of them perform I/O.

pub mod friend_code;
pub mod heartbeat;
pub mod registry;
pub mod user;
pub mod whitelist;
