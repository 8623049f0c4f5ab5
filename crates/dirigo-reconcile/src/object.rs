//! The managed object model.

use dirigo_directory::attrs::Attributes;

use crate::kinds::Kind;

/// Whether a read found the remote object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The remote object exists; observed attributes were refreshed.
    Present,
    /// The remote object is gone; local state was cleared.
    Absent,
}

/// One remote directory object under management.
///
/// `local_id` is derived purely from identity-determining declared
/// attributes; it is set when create succeeds and cleared when the object is
/// deleted or found absent.
#[derive(Debug, Clone)]
pub struct ManagedObject {
    /// The managed kind.
    pub kind: Kind,
    /// The reconciler-assigned identifier; `None` signals absence.
    pub local_id: Option<String>,
    /// Attributes as configured by the caller.
    pub declared: Attributes,
    /// Attributes as last read from the server.
    pub observed: Attributes,
}

impl ManagedObject {
    /// Describe a desired object that does not exist yet.
    pub fn new(kind: Kind, declared: Attributes) -> Self {
        Self {
            kind,
            local_id: None,
            declared,
            observed: Attributes::new(),
        }
    }

    /// Adopt an object that already exists remotely under `local_id`.
    pub fn with_local_id(kind: Kind, declared: Attributes, local_id: impl Into<String>) -> Self {
        Self {
            kind,
            local_id: Some(local_id.into()),
            declared,
            observed: Attributes::new(),
        }
    }

    /// Whether the object is currently tracked as existing.
    pub fn is_present(&self) -> bool {
        self.local_id.is_some()
    }

    /// Forget everything known about the remote side.
    pub(crate) fn clear_remote_state(&mut self) {
        self.local_id = None;
        self.observed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_object_is_absent() {
        let obj = ManagedObject::new(Kind::User, Attributes::new().with("login", "jdoe"));
        assert!(!obj.is_present());
        assert!(obj.observed.is_empty());
    }

    #[test]
    fn test_clear_remote_state() {
        let mut obj = ManagedObject::with_local_id(
            Kind::Group,
            Attributes::new().with("name", "ops"),
            "ops",
        );
        obj.observed.set("description", "ops team");

        assert!(obj.is_present());
        obj.clear_remote_state();
        assert!(!obj.is_present());
        assert!(obj.observed.is_empty());
        // The declaration survives; only remote knowledge is dropped.
        assert_eq!(obj.declared.get_str("name"), Some("ops"));
    }
}
