//! The managed resource kinds.
//!
//! One enum variant per kind the reconciler can manage, each backed by a
//! static attribute table and a handful of kind-specific rules (identity
//! attributes, member vocabulary, state-toggle support).

pub mod group;
pub mod host;
pub mod membership;
pub mod record;
pub mod user;
pub mod zone;

use std::fmt;

use dirigo_directory::attrs::Attributes;

use crate::error::{ReconcileError, ReconcileResult};
use crate::fields::{check_required, FieldSpec};
use crate::ident::{record_id, MemberTag, MembershipId, HOST_MEMBER_TAGS, USER_MEMBER_TAGS};

pub use group::GroupKind;
pub use record::RecordType;

/// A kind of managed directory object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A DNS zone.
    DnsZone,
    /// A record set inside a DNS zone.
    DnsRecord,
    /// A user account.
    User,
    /// A user group.
    Group,
    /// An enrolled host.
    Host,
    /// A host or hostgroup attached to an HBAC rule.
    HbacHostMembership,
    /// A user or group attached to an HBAC rule.
    HbacUserMembership,
}

impl Kind {
    /// All managed kinds.
    pub fn all() -> &'static [Kind] {
        &[
            Kind::DnsZone,
            Kind::DnsRecord,
            Kind::User,
            Kind::Group,
            Kind::Host,
            Kind::HbacHostMembership,
            Kind::HbacUserMembership,
        ]
    }

    /// Stable name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::DnsZone => "dns_zone",
            Kind::DnsRecord => "dns_record",
            Kind::User => "user",
            Kind::Group => "group",
            Kind::Host => "host",
            Kind::HbacHostMembership => "hbac_host_membership",
            Kind::HbacUserMembership => "hbac_user_membership",
        }
    }

    /// The remote object class addressed by this kind's calls.
    pub fn object_class(self) -> &'static str {
        match self {
            Kind::DnsZone => "dnszone",
            Kind::DnsRecord => "dnsrecord",
            Kind::User => "user",
            Kind::Group => "group",
            Kind::Host => "host",
            Kind::HbacHostMembership | Kind::HbacUserMembership => "hbacrule",
        }
    }

    /// The kind's attribute table.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Kind::DnsZone => zone::FIELDS,
            Kind::DnsRecord => record::FIELDS,
            Kind::User => user::FIELDS,
            Kind::Group => group::FIELDS,
            Kind::Host => host::FIELDS,
            Kind::HbacHostMembership => membership::HOST_FIELDS,
            Kind::HbacUserMembership => membership::USER_FIELDS,
        }
    }

    /// The member tag vocabulary, for the membership kinds.
    pub fn member_tags(self) -> Option<&'static [MemberTag]> {
        match self {
            Kind::HbacHostMembership => Some(HOST_MEMBER_TAGS),
            Kind::HbacUserMembership => Some(USER_MEMBER_TAGS),
            _ => None,
        }
    }

    /// Whether this kind carries a secondary enable/disable state toggle.
    pub fn supports_state_toggle(self) -> bool {
        matches!(self, Kind::DnsZone | Kind::HbacHostMembership)
    }

    /// Identity-determining attributes; changing any of them forces
    /// replacement.
    pub fn identity_attributes(self) -> &'static [&'static str] {
        match self {
            Kind::DnsZone => &["zone_name"],
            Kind::DnsRecord => &["zone_name", "name", "type", "set_identifier"],
            Kind::User => &["login"],
            Kind::Group => &["name"],
            Kind::Host => &["fqdn"],
            Kind::HbacHostMembership => &["rule_name", "host", "hostgroup"],
            Kind::HbacUserMembership => &["rule_name", "user", "group"],
        }
    }

    /// Whether changing `attribute` forces object replacement.
    pub fn is_force_new(self, attribute: &str) -> bool {
        self.identity_attributes().contains(&attribute)
            || self
                .fields()
                .iter()
                .any(|spec| spec.name == attribute && spec.force_new)
    }

    /// The positional argument list identifying an object of this kind.
    pub(crate) fn positional(self, declared: &Attributes) -> ReconcileResult<Vec<String>> {
        match self {
            Kind::DnsZone => Ok(vec![self.required_str(declared, "zone_name")?]),
            Kind::DnsRecord => Ok(vec![
                self.required_str(declared, "zone_name")?,
                self.required_str(declared, "name")?,
            ]),
            Kind::User => Ok(vec![self.required_str(declared, "login")?]),
            Kind::Group => Ok(vec![self.required_str(declared, "name")?]),
            Kind::Host => Ok(vec![self.required_str(declared, "fqdn")?]),
            Kind::HbacHostMembership | Kind::HbacUserMembership => {
                Ok(vec![self.required_str(declared, "rule_name")?])
            }
        }
    }

    /// Validate a declaration ahead of the add call. Runs before any remote
    /// call is made.
    pub fn validate_create(self, declared: &Attributes) -> ReconcileResult<()> {
        self.positional(declared)?;
        check_required(self, self.fields(), declared)?;
        match self {
            Kind::DnsRecord => {
                record::declared_type(declared)?;
                if record::records_option(declared, declared)?.is_none() {
                    return Err(ReconcileError::MissingAttribute {
                        kind: self,
                        attribute: "records",
                    });
                }
                Ok(())
            }
            Kind::Group => GroupKind::from_declared(declared).map(|_| ()),
            Kind::HbacHostMembership | Kind::HbacUserMembership => {
                membership::declared_member(declared, self).map(|_| ())
            }
            _ => Ok(()),
        }
    }

    /// Derive the local identifier from identity-determining attributes.
    pub fn derive_local_id(self, declared: &Attributes) -> ReconcileResult<String> {
        match self {
            Kind::DnsZone => self.required_str(declared, "zone_name"),
            Kind::User => self.required_str(declared, "login"),
            Kind::Group => self.required_str(declared, "name"),
            Kind::Host => self.required_str(declared, "fqdn"),
            Kind::DnsRecord => {
                let name = self.required_str(declared, "name")?;
                let zone = self.required_str(declared, "zone_name")?;
                let record_type = record::declared_type(declared)?;
                Ok(record_id(
                    &name,
                    record_type.as_str(),
                    &zone,
                    declared.get_str("set_identifier"),
                ))
            }
            Kind::HbacHostMembership | Kind::HbacUserMembership => {
                let rule = self.required_str(declared, "rule_name")?;
                let (tag, member) = membership::declared_member(declared, self)?;
                Ok(MembershipId::new(rule, tag, member).encode())
            }
        }
    }

    fn required_str(self, declared: &Attributes, attribute: &'static str) -> ReconcileResult<String> {
        declared
            .get_str(attribute)
            .map(str::to_string)
            .ok_or(ReconcileError::MissingAttribute {
                kind: self,
                attribute,
            })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_classes() {
        assert_eq!(Kind::DnsZone.object_class(), "dnszone");
        assert_eq!(Kind::HbacHostMembership.object_class(), "hbacrule");
        assert_eq!(Kind::HbacUserMembership.object_class(), "hbacrule");
    }

    #[test]
    fn test_state_toggle_support() {
        assert!(Kind::DnsZone.supports_state_toggle());
        assert!(Kind::HbacHostMembership.supports_state_toggle());
        assert!(!Kind::User.supports_state_toggle());
        assert!(!Kind::HbacUserMembership.supports_state_toggle());
    }

    #[test]
    fn test_identity_attributes_force_new() {
        assert!(Kind::User.is_force_new("login"));
        assert!(Kind::DnsRecord.is_force_new("type"));
        assert!(!Kind::User.is_force_new("login_shell"));
    }

    #[test]
    fn test_positional_reports_missing_identity() {
        let err = Kind::DnsRecord
            .positional(&Attributes::new().with("zone_name", "example.test."))
            .unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::MissingAttribute {
                attribute: "name",
                ..
            }
        ));
    }

    #[test]
    fn test_derive_local_id_simple_kinds() {
        let declared = Attributes::new().with("login", "jdoe");
        assert_eq!(Kind::User.derive_local_id(&declared).unwrap(), "jdoe");

        let declared = Attributes::new().with("zone_name", "example.test.");
        assert_eq!(
            Kind::DnsZone.derive_local_id(&declared).unwrap(),
            "example.test."
        );
    }

    #[test]
    fn test_derive_local_id_record() {
        let declared = Attributes::new()
            .with("zone_name", "example.test.")
            .with("name", "www")
            .with("type", "A")
            .with("records", vec!["10.0.0.1"]);
        assert_eq!(
            Kind::DnsRecord.derive_local_id(&declared).unwrap(),
            "www_A_example.test."
        );
    }

    #[test]
    fn test_derive_local_id_membership() {
        let declared = Attributes::new()
            .with("rule_name", "allow-ssh")
            .with("host", "h1.example.test.");
        assert_eq!(
            Kind::HbacHostMembership.derive_local_id(&declared).unwrap(),
            "allow-ssh/h/h1.example.test."
        );
    }
}
