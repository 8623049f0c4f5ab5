//! DNS zone attribute table.
//!
//! The zone name itself is positional; `enabled` travels through the
//! enable/disable calls, and the overlap check can only be skipped at
//! creation.

use crate::fields::{FieldSpec, ValueShape};

pub(crate) static FIELDS: &[FieldSpec] = &[
    FieldSpec::new("admin_email", "idnssoarname", ValueShape::Str),
    FieldSpec::new("authoritative_nameserver", "idnssoamname", ValueShape::Str),
    FieldSpec::new("soa_refresh", "idnssoarefresh", ValueShape::Int),
    FieldSpec::new("soa_retry", "idnssoaretry", ValueShape::Int),
    FieldSpec::new("soa_expire", "idnssoaexpire", ValueShape::Int),
    FieldSpec::new("soa_minimum", "idnssoaminimum", ValueShape::Int),
    FieldSpec::new("default_ttl", "dnsdefaultttl", ValueShape::Int),
    FieldSpec::new("ttl", "dnsttl", ValueShape::Int),
    FieldSpec::new("dynamic_updates", "idnsallowdynupdate", ValueShape::Bool),
    FieldSpec::new("allow_sync_ptr", "idnsallowsyncptr", ValueShape::Bool),
    FieldSpec::new("allow_query", "idnsallowquery", ValueShape::Str),
    FieldSpec::new("allow_transfer", "idnsallowtransfer", ValueShape::Str),
    FieldSpec::new("zone_forwarders", "idnsforwarders", ValueShape::StrList),
    FieldSpec::new("skip_overlap_check", "skip_overlap_check", ValueShape::Bool).create_only(),
    FieldSpec::new("enabled", "idnszoneactive", ValueShape::Bool).toggle(),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_create_only_flags() {
        let enabled = FIELDS.iter().find(|f| f.name == "enabled").unwrap();
        assert!(enabled.toggle);

        let skip = FIELDS.iter().find(|f| f.name == "skip_overlap_check").unwrap();
        assert!(skip.create_only);
        assert!(!skip.toggle);
    }

    #[test]
    fn test_no_required_option_fields() {
        // The zone's only required attribute is its positional name.
        assert!(FIELDS.iter().all(|f| !f.required));
    }
}
