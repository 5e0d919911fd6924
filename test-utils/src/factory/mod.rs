//! Factory methods for creating test data.
//!
//! Factories build registry records as JSON with sensible defaults, so tests only
//! spell out the fields they care about. Records are keyed by a unique member ID
//! and carry a unique friend code unless overridden.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory::user::UserFactory;
//!
//! let (member_id, record) = UserFactory::new()
//!     .friend_code("1111222233334444")
//!     .online()
//!     .build();
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create registry records

pub mod helpers;
pub mod user;
