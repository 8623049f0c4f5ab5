//! DNS record attribute table and type discrimination.
//!
//! A record declaration carries a `type` and a flat `records` list; exactly
//! one type-specific value attribute is populated on the wire, selected by
//! the type. An unrecognized type is rejected outright rather than silently
//! ignored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use dirigo_directory::attrs::{AttrValue, Attributes};

use crate::error::{ReconcileError, ReconcileResult};
use crate::fields::{FieldSpec, ValueShape};
use crate::kinds::Kind;

pub(crate) static FIELDS: &[FieldSpec] =
    &[FieldSpec::new("ttl", "dnsttl", ValueShape::Int)];

/// A supported DNS record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
    NS,
    PTR,
    SRV,
    TXT,
    SSHFP,
}

impl RecordType {
    /// All supported record types.
    pub fn all() -> &'static [RecordType] {
        &[
            RecordType::A,
            RecordType::AAAA,
            RecordType::CNAME,
            RecordType::MX,
            RecordType::NS,
            RecordType::PTR,
            RecordType::SRV,
            RecordType::TXT,
            RecordType::SSHFP,
        ]
    }

    /// The type's name as declared.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::NS => "NS",
            RecordType::PTR => "PTR",
            RecordType::SRV => "SRV",
            RecordType::TXT => "TXT",
            RecordType::SSHFP => "SSHFP",
        }
    }

    /// The remote value-list attribute this type populates.
    pub fn value_attribute(self) -> &'static str {
        match self {
            RecordType::A => "arecord",
            RecordType::AAAA => "aaaarecord",
            RecordType::CNAME => "cnamerecord",
            RecordType::MX => "mxrecord",
            RecordType::NS => "nsrecord",
            RecordType::PTR => "ptrrecord",
            RecordType::SRV => "srvrecord",
            RecordType::TXT => "txtrecord",
            RecordType::SSHFP => "sshfprecord",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ReconcileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ReconcileError::UnsupportedRecordType {
                value: s.to_string(),
            })
    }
}

/// Read the declared record type, rejecting unknown types.
pub(crate) fn declared_type(declared: &Attributes) -> ReconcileResult<RecordType> {
    let text = declared
        .get_str("type")
        .ok_or(ReconcileError::MissingAttribute {
            kind: Kind::DnsRecord,
            attribute: "type",
        })?;
    text.parse()
}

/// Build the type-specific value option from a `records` list.
///
/// The type always comes from `type_source` (the full declaration - type is
/// force-new), while the values may come from an update diff.
pub(crate) fn records_option(
    type_source: &Attributes,
    values: &Attributes,
) -> ReconcileResult<Option<(&'static str, AttrValue)>> {
    let Some(raw) = values.get("records") else {
        return Ok(None);
    };
    let AttrValue::List(items) = raw else {
        return Err(ReconcileError::InvalidValue {
            attribute: "records".to_string(),
            expected: ValueShape::StrList,
        });
    };
    if items.is_empty() {
        return Err(ReconcileError::invalid_spec(
            "'records' must contain at least one value",
        ));
    }
    let record_type = declared_type(type_source)?;
    Ok(Some((
        record_type.value_attribute(),
        AttrValue::List(items.clone()),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_a_distinct_value_attribute() {
        let mut attributes: Vec<&str> = RecordType::all()
            .iter()
            .map(|t| t.value_attribute())
            .collect();
        attributes.sort_unstable();
        attributes.dedup();
        assert_eq!(attributes.len(), RecordType::all().len());
    }

    #[test]
    fn test_parse_known_types() {
        assert_eq!("A".parse::<RecordType>().unwrap(), RecordType::A);
        assert_eq!("SSHFP".parse::<RecordType>().unwrap(), RecordType::SSHFP);
    }

    #[test]
    fn test_unknown_type_is_an_explicit_error() {
        let err = "SPF".parse::<RecordType>().unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_RECORD_TYPE");
        // Lower-case names are not accepted either.
        assert!("a".parse::<RecordType>().is_err());
    }

    #[test]
    fn test_records_option_selects_typed_attribute() {
        let declared = Attributes::new()
            .with("type", "AAAA")
            .with("records", vec!["2001:db8::1"]);
        let (attribute, value) = records_option(&declared, &declared).unwrap().unwrap();
        assert_eq!(attribute, "aaaarecord");
        assert_eq!(value.as_list().unwrap(), ["2001:db8::1"]);
    }

    #[test]
    fn test_records_option_rejects_empty_list() {
        let declared = Attributes::new()
            .with("type", "A")
            .with("records", Vec::<String>::new());
        assert!(records_option(&declared, &declared).is_err());
    }

    #[test]
    fn test_records_option_absent_records_is_none() {
        let declared = Attributes::new().with("type", "A");
        assert!(records_option(&declared, &declared).unwrap().is_none());
    }
}
