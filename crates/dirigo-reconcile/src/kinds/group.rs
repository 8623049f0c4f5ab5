//! Group attribute table and POSIX-kind validation.

use serde::{Deserialize, Serialize};

use dirigo_directory::attrs::Attributes;

use crate::error::{ReconcileError, ReconcileResult};
use crate::fields::{FieldSpec, ValueShape};

pub(crate) static FIELDS: &[FieldSpec] = &[
    FieldSpec::new("description", "description", ValueShape::Str),
    FieldSpec::new("gid_number", "gidnumber", ValueShape::Int),
    FieldSpec::new("nonposix", "nonposix", ValueShape::Bool)
        .create_only()
        .force_new(),
    FieldSpec::new("external", "external", ValueShape::Bool)
        .create_only()
        .force_new(),
];

/// The storage kind of a group, with exactly one active arm.
///
/// A declaration picks at most one of `nonposix` or `external`; a GID number
/// is only meaningful for POSIX groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupKind {
    /// A POSIX group, optionally with a fixed GID.
    Posix { gid_number: Option<i64> },
    /// A plain, non-POSIX group.
    NonPosix,
    /// A group holding external (trusted-domain) members.
    External,
}

impl GroupKind {
    /// Derive the group kind from a declaration, rejecting conflicting
    /// arms.
    pub fn from_declared(declared: &Attributes) -> ReconcileResult<GroupKind> {
        let nonposix = declared.get_bool("nonposix").unwrap_or(false);
        let external = declared.get_bool("external").unwrap_or(false);
        let gid_number = declared.get_int("gid_number");

        match (nonposix, external) {
            (true, true) => Err(ReconcileError::invalid_spec(
                "'nonposix' and 'external' are mutually exclusive",
            )),
            (true, false) | (false, true) if gid_number.is_some() => {
                Err(ReconcileError::invalid_spec(
                    "'gid_number' is only valid for posix groups",
                ))
            }
            (true, false) => Ok(GroupKind::NonPosix),
            (false, true) => Ok(GroupKind::External),
            (false, false) => Ok(GroupKind::Posix { gid_number }),
        }
    }
}
