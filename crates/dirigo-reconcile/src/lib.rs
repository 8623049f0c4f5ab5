//! # Declarative reconciliation of directory objects
//!
//! Drives identity-directory objects (DNS zones and records, users, groups,
//! hosts, HBAC rule memberships) toward their declared state through the
//! server's add/mod/show/del call surface.
//!
//! One generic engine serves every kind; what varies per kind is data, not
//! code:
//!
//! - [`kinds`] - the managed kinds and their static attribute tables
//! - [`fields`] - the table row type and the marshaling it drives
//! - [`ident`] - local identifier formats, including the composite
//!   `rule/tag/member` form used by rule memberships
//! - [`object`] - the managed object model (declared vs. observed state)
//! - [`engine`] - the [`Reconciler`](engine::Reconciler) itself
//! - [`error`] - the reconciler error taxonomy
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use dirigo_directory::prelude::*;
//! use dirigo_reconcile::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> ReconcileResult<()> {
//! let directory = Arc::new(MemoryDirectory::new());
//! let reconciler = Reconciler::new(directory);
//!
//! let mut zone = ManagedObject::new(
//!     Kind::DnsZone,
//!     Attributes::new()
//!         .with("zone_name", "example.test.")
//!         .with("default_ttl", 3600i64),
//! );
//! reconciler.create(&mut zone).await?;
//! assert_eq!(zone.local_id.as_deref(), Some("example.test."));
//! assert_eq!(zone.observed.get_int("default_ttl"), Some(3600));
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod fields;
pub mod ident;
pub mod kinds;
pub mod object;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::Reconciler;
    pub use crate::error::{ReconcileError, ReconcileResult};
    pub use crate::fields::{BundlePurpose, FieldSpec, ValueShape};
    pub use crate::ident::{
        MemberTag, MembershipId, HOST_MEMBER_TAGS, MEMBERSHIP_SEPARATOR, USER_MEMBER_TAGS,
    };
    pub use crate::kinds::{GroupKind, Kind, RecordType};
    pub use crate::object::{ManagedObject, Presence};
}
