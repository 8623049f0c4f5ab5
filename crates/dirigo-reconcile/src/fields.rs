//! Declarative attribute mapping.
//!
//! Each managed kind carries a static table of [`FieldSpec`] entries mapping
//! a schema attribute name onto its remote option key and value shape.
//! Building a call bundle and projecting a show result back onto schema
//! names are both driven by that table, so per-kind code stays declarative.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

use dirigo_directory::attrs::{AttrValue, Attributes};

use crate::error::{ReconcileError, ReconcileResult};
use crate::kinds::Kind;

/// The server's timestamp format (generalized time, always UTC).
const DIRECTORY_TIME_FORMAT: &str = "%Y%m%d%H%M%SZ";

/// The shape of an attribute's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Scalar string.
    Str,
    /// Scalar integer.
    Int,
    /// Scalar boolean.
    Bool,
    /// Ordered list of strings.
    StrList,
    /// RFC3339 timestamp, marshaled to the server's generalized-time form.
    Timestamp,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Str => write!(f, "a string"),
            ValueShape::Int => write!(f, "an integer"),
            ValueShape::Bool => write!(f, "a boolean"),
            ValueShape::StrList => write!(f, "a list of strings"),
            ValueShape::Timestamp => write!(f, "an RFC3339 timestamp"),
        }
    }
}

/// One row of a kind's attribute table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Schema attribute name.
    pub name: &'static str,
    /// Remote option key.
    pub remote: &'static str,
    /// Value shape.
    pub shape: ValueShape,
    /// Whether the attribute must be present at create time.
    pub required: bool,
    /// Whether changing the attribute forces object replacement.
    pub force_new: bool,
    /// Whether the attribute is only accepted by the add call.
    pub create_only: bool,
    /// Whether the attribute is applied through the enable/disable calls
    /// rather than the modify bundle.
    pub toggle: bool,
}

impl FieldSpec {
    /// Create an optional, mutable field.
    pub const fn new(name: &'static str, remote: &'static str, shape: ValueShape) -> Self {
        Self {
            name,
            remote,
            shape,
            required: false,
            force_new: false,
            create_only: false,
            toggle: false,
        }
    }

    /// Mark the field required at create time.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as forcing replacement on change.
    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    /// Mark the field as accepted only by the add call.
    pub const fn create_only(mut self) -> Self {
        self.create_only = true;
        self
    }

    /// Mark the field as the kind's enable/disable toggle.
    pub const fn toggle(mut self) -> Self {
        self.toggle = true;
        self
    }
}

/// Which call a bundle is being built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundlePurpose {
    /// The add call: create-only fields are included.
    Create,
    /// The modify call: create-only fields are excluded.
    Update,
}

/// Marshal one declared value into its remote form, enforcing the shape.
pub(crate) fn marshal(spec: &FieldSpec, value: &AttrValue) -> ReconcileResult<AttrValue> {
    let mismatch = || ReconcileError::InvalidValue {
        attribute: spec.name.to_string(),
        expected: spec.shape,
    };
    match (spec.shape, value) {
        (ValueShape::Str, AttrValue::Str(_))
        | (ValueShape::Int, AttrValue::Int(_))
        | (ValueShape::Bool, AttrValue::Bool(_))
        | (ValueShape::StrList, AttrValue::List(_)) => Ok(value.clone()),
        (ValueShape::Timestamp, AttrValue::Str(text)) => {
            let parsed =
                DateTime::parse_from_rfc3339(text).map_err(|source| ReconcileError::TimestampParse {
                    attribute: spec.name.to_string(),
                    value: text.clone(),
                    source,
                })?;
            Ok(AttrValue::Str(
                parsed
                    .with_timezone(&Utc)
                    .format(DIRECTORY_TIME_FORMAT)
                    .to_string(),
            ))
        }
        _ => Err(mismatch()),
    }
}

/// Build the keyword-argument bundle for a call from declared attributes.
///
/// Only attributes present in `attrs` are included; omission means "leave
/// unchanged" on modify and "use the server default" on add. Toggle fields
/// never travel in the bundle.
pub(crate) fn option_bundle(
    fields: &[FieldSpec],
    attrs: &Attributes,
    purpose: BundlePurpose,
) -> ReconcileResult<Attributes> {
    let mut bundle = Attributes::new();
    for spec in fields {
        if spec.toggle || (purpose == BundlePurpose::Update && spec.create_only) {
            continue;
        }
        if let Some(value) = attrs.get(spec.name) {
            bundle.set(spec.remote, marshal(spec, value)?);
        }
    }
    Ok(bundle)
}

/// Verify every required field of the table is declared.
pub(crate) fn check_required(
    kind: Kind,
    fields: &[FieldSpec],
    attrs: &Attributes,
) -> ReconcileResult<()> {
    for spec in fields {
        if spec.required && !attrs.has(spec.name) {
            return Err(ReconcileError::MissingAttribute {
                kind,
                attribute: spec.name,
            });
        }
    }
    Ok(())
}

/// Project a show result back onto schema attribute names.
///
/// Server formatting quirks are absorbed here: scalars wrapped in
/// one-element lists are unwrapped, state flags arrive as `"TRUE"`/`"FALSE"`
/// strings, and generalized-time values map back to RFC3339. A value that
/// cannot be coerced is skipped, since the server owns its own formatting.
pub(crate) fn observe(fields: &[FieldSpec], entry: &Attributes) -> Attributes {
    let mut observed = Attributes::new();
    for spec in fields {
        let Some(raw) = entry.get(spec.remote) else {
            continue;
        };
        match coerce(spec.shape, raw) {
            Some(value) => observed.set(spec.name, value),
            None => debug!(
                attribute = spec.name,
                remote = spec.remote,
                "skipping unreadable value in show result"
            ),
        }
    }
    observed
}

fn coerce(shape: ValueShape, raw: &AttrValue) -> Option<AttrValue> {
    match shape {
        ValueShape::Str => raw.as_scalar_str().map(AttrValue::from),
        ValueShape::Int => match raw {
            AttrValue::Int(i) => Some(AttrValue::Int(*i)),
            _ => raw.as_scalar_str()?.parse::<i64>().ok().map(AttrValue::Int),
        },
        ValueShape::Bool => match raw {
            AttrValue::Bool(b) => Some(AttrValue::Bool(*b)),
            _ => match raw.as_scalar_str()? {
                "TRUE" | "true" => Some(AttrValue::Bool(true)),
                "FALSE" | "false" => Some(AttrValue::Bool(false)),
                _ => None,
            },
        },
        ValueShape::StrList => match raw {
            AttrValue::List(items) => Some(AttrValue::List(items.clone())),
            AttrValue::Str(s) => Some(AttrValue::List(vec![s.clone()])),
            _ => None,
        },
        ValueShape::Timestamp => {
            let text = raw.as_scalar_str()?;
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, DIRECTORY_TIME_FORMAT) {
                return Some(AttrValue::Str(naive.and_utc().to_rfc3339()));
            }
            // Already RFC3339, or some formatting this client does not
            // know; keep the raw text rather than failing the read.
            Some(AttrValue::Str(text.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[FieldSpec] = &[
        FieldSpec::new("description", "description", ValueShape::Str),
        FieldSpec::new("gid_number", "gidnumber", ValueShape::Int),
        FieldSpec::new("expires_at", "krbprincipalexpiration", ValueShape::Timestamp),
        FieldSpec::new("mail", "mail", ValueShape::StrList),
        FieldSpec::new("skip_overlap_check", "skip_overlap_check", ValueShape::Bool).create_only(),
        FieldSpec::new("enabled", "idnszoneactive", ValueShape::Bool).toggle(),
    ];

    #[test]
    fn test_bundle_includes_only_declared_fields() {
        let declared = Attributes::new().with("description", "build hosts");
        let bundle = option_bundle(SAMPLE, &declared, BundlePurpose::Create).unwrap();
        assert_eq!(bundle.len(), 1);
        assert_eq!(bundle.get_str("description"), Some("build hosts"));
    }

    #[test]
    fn test_bundle_excludes_create_only_on_update() {
        let declared = Attributes::new().with("skip_overlap_check", true);
        let create = option_bundle(SAMPLE, &declared, BundlePurpose::Create).unwrap();
        assert!(create.has("skip_overlap_check"));
        let update = option_bundle(SAMPLE, &declared, BundlePurpose::Update).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_bundle_never_carries_toggle_fields() {
        let declared = Attributes::new().with("enabled", false);
        let bundle = option_bundle(SAMPLE, &declared, BundlePurpose::Create).unwrap();
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_timestamp_marshals_to_generalized_time() {
        let declared = Attributes::new().with("expires_at", "2027-01-31T12:00:00+02:00");
        let bundle = option_bundle(SAMPLE, &declared, BundlePurpose::Create).unwrap();
        assert_eq!(
            bundle.get_str("krbprincipalexpiration"),
            Some("20270131100000Z")
        );
    }

    #[test]
    fn test_timestamp_parse_failure_is_fatal() {
        let declared = Attributes::new().with("expires_at", "next tuesday");
        let err = option_bundle(SAMPLE, &declared, BundlePurpose::Create).unwrap_err();
        assert_eq!(err.error_code(), "TIMESTAMP_PARSE");
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let declared = Attributes::new().with("gid_number", "not a number");
        let err = option_bundle(SAMPLE, &declared, BundlePurpose::Create).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VALUE");
    }

    #[test]
    fn test_observe_unwraps_and_coerces() {
        let entry = Attributes::new()
            .with("description", vec!["build hosts"])
            .with("gidnumber", vec!["1500"])
            .with("mail", "solo@example.test")
            .with("idnszoneactive", "TRUE")
            .with("krbprincipalexpiration", "20270131100000Z");

        let observed = observe(SAMPLE, &entry);
        assert_eq!(observed.get_str("description"), Some("build hosts"));
        assert_eq!(observed.get_int("gid_number"), Some(1500));
        assert_eq!(observed.get_strings("mail"), vec!["solo@example.test"]);
        assert_eq!(observed.get_bool("enabled"), Some(true));
        assert_eq!(
            observed.get_str("expires_at"),
            Some("2027-01-31T10:00:00+00:00")
        );
    }

    #[test]
    fn test_observe_keeps_unknown_timestamp_text() {
        let entry = Attributes::new().with("krbprincipalexpiration", "unparseable");
        let observed = observe(SAMPLE, &entry);
        assert_eq!(observed.get_str("expires_at"), Some("unparseable"));
    }
}
