//! The directory client capability trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DirectoryResult;
use crate::rpc::{RpcCall, RpcReply};

/// A client capable of executing calls against a directory server.
///
/// Implementations must be safe for concurrent use: independent managed
/// objects may be reconciled on separate tasks sharing one client. The
/// reconciler performs no retries of its own; whatever timeout and
/// cancellation behavior exists is the implementation's.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Display name for this client instance, used in logs.
    fn display_name(&self) -> &str;

    /// Execute one remote call and return its structured reply.
    async fn execute(&self, call: RpcCall) -> DirectoryResult<RpcReply>;
}

/// A shared, dynamically typed client handle.
pub type SharedClient = Arc<dyn DirectoryClient>;

#[async_trait]
impl<T: DirectoryClient + ?Sized> DirectoryClient for Arc<T> {
    fn display_name(&self) -> &str {
        (**self).display_name()
    }

    async fn execute(&self, call: RpcCall) -> DirectoryResult<RpcReply> {
        (**self).execute(call).await
    }
}
