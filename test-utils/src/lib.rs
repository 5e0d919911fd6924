//! Rerollboard Test Utils
//!
//! Provides shared testing utilities for the rerollboard bot. Tests get an isolated
//! working directory for the local registry and whitelist files, and optionally a
//! fake GitHub server that implements the contents API and a raw-file mirror on top
//! of an in-memory repository.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for seeding local files and remote files
//! - **TestContext**: The built environment (temp directory, fake GitHub)
//! - **MemoryRepo**: In-memory repository with revision tokens and failure injection
//! - **FakeGitHub**: axum server exposing `MemoryRepo` over HTTP
//! - **factory**: Registry record builders
//! - **serenity**: Serenity model objects deserialized from JSON
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory::user::UserFactory};
//!
//! #[tokio::test]
//! async fn test_presence() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_user(UserFactory::new().online().build())
//!         .with_github()
//!         .build()
//!         .await?;
//!
//!     let repo = test.repo().unwrap();
//!     // Run the code under test against test.registry_path() and test.github...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod github;
pub mod remote;
pub mod serenity;
