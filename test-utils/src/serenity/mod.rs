//! Test factories for creating Serenity API objects.
//!
//! Serenity model structs have no public constructors, so these factories build
//! them by deserializing JSON shaped like Discord's API responses.
//!
//! # Available Factories
//!
//! - `message::create_test_message` - Create Serenity Message objects
//! - `role::create_test_role` - Create Serenity Role objects

pub mod message;
pub mod role;

pub use message::create_test_message;
pub use role::create_test_role;
