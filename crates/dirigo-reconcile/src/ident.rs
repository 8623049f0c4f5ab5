//! Local identifier formats.
//!
//! Simple kinds use the object's declared name verbatim. Rule memberships
//! pack the parent rule, a member-kind tag, and the member name into one
//! `rule/tag/member` string; DNS records join name, type, zone, and an
//! optional disambiguator with `_`.

use std::fmt;

use crate::error::{ReconcileError, ReconcileResult};

/// Separator between the fields of a membership identifier.
pub const MEMBERSHIP_SEPARATOR: char = '/';

/// The kind of object a rule membership points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberTag {
    /// A single host (`h`).
    Host,
    /// A host group (`hg`).
    HostGroup,
    /// A single user (`u`).
    User,
    /// A user group (`g`).
    Group,
}

/// Tag vocabulary accepted by host-membership identifiers.
pub const HOST_MEMBER_TAGS: &[MemberTag] = &[MemberTag::Host, MemberTag::HostGroup];

/// Tag vocabulary accepted by user-membership identifiers.
pub const USER_MEMBER_TAGS: &[MemberTag] = &[MemberTag::User, MemberTag::Group];

impl MemberTag {
    /// The identifier tag.
    pub fn as_str(self) -> &'static str {
        match self {
            MemberTag::Host => "h",
            MemberTag::HostGroup => "hg",
            MemberTag::User => "u",
            MemberTag::Group => "g",
        }
    }

    /// The member class used in remote call names and option keys.
    pub fn member_class(self) -> &'static str {
        match self {
            MemberTag::Host => "host",
            MemberTag::HostGroup => "hostgroup",
            MemberTag::User => "user",
            MemberTag::Group => "group",
        }
    }

    /// The membership list attribute of the parent rule's show result.
    pub fn membership_list(self) -> &'static str {
        match self {
            MemberTag::Host => "memberhost_host",
            MemberTag::HostGroup => "memberhost_hostgroup",
            MemberTag::User => "memberuser_user",
            MemberTag::Group => "memberuser_group",
        }
    }

    fn from_tag(tag: &str, vocabulary: &[MemberTag]) -> Option<MemberTag> {
        vocabulary.iter().copied().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for MemberTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The decoded form of a membership identifier.
///
/// Fields are joined without escaping, so a member name may itself contain
/// `/` (decoding keeps the tail intact), while a rule name containing `/` is
/// not representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipId {
    /// Name of the parent rule.
    pub rule: String,
    /// Member kind tag.
    pub tag: MemberTag,
    /// Name of the member.
    pub member: String,
}

impl MembershipId {
    /// Create a membership identifier.
    pub fn new(rule: impl Into<String>, tag: MemberTag, member: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            tag,
            member: member.into(),
        }
    }

    /// Encode into the `rule/tag/member` string form.
    pub fn encode(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.rule,
            self.tag,
            self.member,
            sep = MEMBERSHIP_SEPARATOR
        )
    }

    /// Decode an identifier, accepting only tags from `vocabulary`.
    pub fn decode(id: &str, vocabulary: &[MemberTag]) -> ReconcileResult<MembershipId> {
        let mut parts = id.splitn(3, MEMBERSHIP_SEPARATOR);
        let (Some(rule), Some(tag), Some(member)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ReconcileError::malformed_identifier(
                id,
                "expected <rule>/<tag>/<member>",
            ));
        };
        if rule.is_empty() || member.is_empty() {
            return Err(ReconcileError::malformed_identifier(
                id,
                "rule and member must not be empty",
            ));
        }
        let tag = MemberTag::from_tag(tag, vocabulary).ok_or_else(|| {
            ReconcileError::malformed_identifier(id, format!("unrecognized member tag '{tag}'"))
        })?;
        Ok(MembershipId::new(rule, tag, member))
    }
}

impl fmt::Display for MembershipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// Build the local identifier of a DNS record.
pub fn record_id(name: &str, record_type: &str, zone: &str, set_identifier: Option<&str>) -> String {
    match set_identifier {
        Some(disambiguator) => format!("{name}_{record_type}_{zone}_{disambiguator}"),
        None => format!("{name}_{record_type}_{zone}"),
    }
}
