//! Host attribute table.
//!
//! `ip_address` and `force` only matter when the host is enrolled; the
//! server does not accept them on modify.

use crate::fields::{FieldSpec, ValueShape};

pub(crate) static FIELDS: &[FieldSpec] = &[
    FieldSpec::new("description", "description", ValueShape::Str),
    FieldSpec::new("locality", "l", ValueShape::Str),
    FieldSpec::new("location", "nshostlocation", ValueShape::Str),
    FieldSpec::new("platform", "nshardwareplatform", ValueShape::Str),
    FieldSpec::new("operating_system", "nsosversion", ValueShape::Str),
    FieldSpec::new("mac_addresses", "macaddress", ValueShape::StrList),
    FieldSpec::new("user_class", "userclass", ValueShape::Str),
    FieldSpec::new("ip_address", "ip_address", ValueShape::Str).create_only(),
    FieldSpec::new("force", "force", ValueShape::Bool).create_only(),
];
