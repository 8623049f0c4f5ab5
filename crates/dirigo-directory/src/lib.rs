//! # Directory client surface
//!
//! Typed RPC surface for an identity-directory server that manages its
//! objects (DNS zones and records, users, groups, hosts, access-control
//! rules) through `{class}_{verb}` calls.
//!
//! This crate defines the shapes both sides of that conversation share:
//!
//! - [`attrs`] - attribute values and ordered attribute maps
//! - [`rpc`] - verbs, argument bundles, calls, and replies
//! - [`error`] - the typed error taxonomy, including the structured
//!   empty-modlist no-op condition
//! - [`client`] - the [`DirectoryClient`](client::DirectoryClient)
//!   capability trait
//! - [`config`] - provider-level connection configuration
//! - [`memory`] - an in-memory backend with faithful call semantics, used
//!   by tests and demos
//!
//! Authentication, session handling, and wire encoding are the concern of
//! whichever transport implements the client trait; nothing here performs
//! network I/O.
//!
//! ## Example
//!
//! ```
//! use dirigo_directory::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> DirectoryResult<()> {
//! let dir = MemoryDirectory::new();
//!
//! let call = RpcCall::new(
//!     "user",
//!     Verb::Add,
//!     ArgumentSet::positional(["jdoe"])
//!         .with_option("givenname", "Jane")
//!         .with_option("sn", "Doe"),
//! );
//! let reply = dir.execute(call).await?;
//! assert_eq!(reply.value.as_deref(), Some("jdoe"));
//! # Ok(())
//! # }
//! ```

pub mod attrs;
pub mod client;
pub mod config;
pub mod error;
pub mod memory;
pub mod rpc;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::attrs::{AttrValue, Attributes};
    pub use crate::client::{DirectoryClient, SharedClient};
    pub use crate::config::{ConnectionSettings, DirectoryConfig, TlsConfig};
    pub use crate::error::{DirectoryError, DirectoryResult, EMPTY_MODLIST_MARKER};
    pub use crate::memory::MemoryDirectory;
    pub use crate::rpc::{member_list_attribute, ArgumentSet, RpcCall, RpcReply, Verb};
}

// Re-export async_trait for client implementors.
pub use async_trait::async_trait;
