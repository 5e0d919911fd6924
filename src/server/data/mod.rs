//! Persistence layer.
//!
//! Local repositories read and write the registry JSON document and the whitelist
//! text file. Both files are the local cache; the remote repository reached
//! through [`remote::RemoteStore`] is the durable copy recovered at startup.
//! Local loads fail open: a missing or unreadable file yields an empty document.

pub mod registry;
pub mod remote;
pub mod whitelist;
