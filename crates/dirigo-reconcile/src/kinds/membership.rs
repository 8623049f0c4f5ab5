//! HBAC rule membership attribute tables.
//!
//! A membership declaration names the parent rule and exactly one member,
//! under the attribute matching its kind (`host`/`hostgroup` or
//! `user`/`group`). Host memberships additionally expose the parent rule's
//! enable/disable toggle.

use dirigo_directory::attrs::Attributes;

use crate::error::{ReconcileError, ReconcileResult};
use crate::fields::{FieldSpec, ValueShape};
use crate::ident::MemberTag;
use crate::kinds::Kind;

pub(crate) static HOST_FIELDS: &[FieldSpec] =
    &[FieldSpec::new("enabled", "ipaenabledflag", ValueShape::Bool).toggle()];

pub(crate) static USER_FIELDS: &[FieldSpec] = &[];

/// Resolve the single declared member of a membership declaration.
///
/// Exactly one of the kind's member attributes must be set.
pub(crate) fn declared_member(
    declared: &Attributes,
    kind: Kind,
) -> ReconcileResult<(MemberTag, String)> {
    let Some(tags) = kind.member_tags() else {
        return Err(ReconcileError::invalid_spec(format!(
            "{kind} does not take rule members"
        )));
    };

    let mut found: Option<(MemberTag, String)> = None;
    for tag in tags {
        if let Some(member) = declared.get_str(tag.member_class()) {
            if found.is_some() {
                return Err(conflict_error(tags));
            }
            found = Some((*tag, member.to_string()));
        }
    }
    found.ok_or_else(|| conflict_error(tags))
}

fn conflict_error(tags: &[MemberTag]) -> ReconcileError {
    let attributes: Vec<&str> = tags.iter().map(|t| t.member_class()).collect();
    ReconcileError::invalid_spec(format!(
        "exactly one of {} must be set",
        attributes.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_member_resolves() {
        let declared = Attributes::new()
            .with("rule_name", "allow-ssh")
            .with("hostgroup", "webservers");
        let (tag, member) = declared_member(&declared, Kind::HbacHostMembership).unwrap();
        assert_eq!(tag, MemberTag::HostGroup);
        assert_eq!(member, "webservers");
    }

    #[test]
    fn test_both_members_rejected() {
        let declared = Attributes::new()
            .with("rule_name", "allow-ssh")
            .with("host", "h1.example.test.")
            .with("hostgroup", "webservers");
        let err = declared_member(&declared, Kind::HbacHostMembership).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SPEC");
    }

    #[test]
    fn test_no_member_rejected() {
        let declared = Attributes::new().with("rule_name", "allow-ssh");
        let err = declared_member(&declared, Kind::HbacUserMembership).unwrap_err();
        assert!(err.to_string().contains("user, group"));
    }

    #[test]
    fn test_user_vocabulary_ignores_host_attributes() {
        let declared = Attributes::new()
            .with("rule_name", "allow-ssh")
            .with("host", "h1.example.test.")
            .with("user", "jdoe");
        let (tag, member) = declared_member(&declared, Kind::HbacUserMembership).unwrap();
        assert_eq!(tag, MemberTag::User);
        assert_eq!(member, "jdoe");
    }

    #[test]
    fn test_only_host_memberships_carry_the_toggle() {
        assert!(HOST_FIELDS.iter().any(|f| f.toggle));
        assert!(USER_FIELDS.is_empty());
    }
}
