//! User account attribute table.
//!
//! The login is positional. Both Kerberos expiration attributes are strict
//! RFC3339 on the schema side and generalized time on the wire.

use crate::fields::{FieldSpec, ValueShape};

pub(crate) static FIELDS: &[FieldSpec] = &[
    FieldSpec::new("first_name", "givenname", ValueShape::Str).required(),
    FieldSpec::new("last_name", "sn", ValueShape::Str).required(),
    FieldSpec::new("full_name", "cn", ValueShape::Str),
    FieldSpec::new("display_name", "displayname", ValueShape::Str),
    FieldSpec::new("initials", "initials", ValueShape::Str),
    FieldSpec::new("home_directory", "homedirectory", ValueShape::Str),
    FieldSpec::new("gecos", "gecos", ValueShape::Str),
    FieldSpec::new("login_shell", "loginshell", ValueShape::Str),
    FieldSpec::new("krb_principal_name", "krbprincipalname", ValueShape::StrList),
    FieldSpec::new(
        "krb_principal_expiration",
        "krbprincipalexpiration",
        ValueShape::Timestamp,
    ),
    FieldSpec::new(
        "krb_password_expiration",
        "krbpasswordexpiration",
        ValueShape::Timestamp,
    ),
    FieldSpec::new("email_address", "mail", ValueShape::StrList),
    FieldSpec::new("telephone_numbers", "telephonenumber", ValueShape::StrList),
    FieldSpec::new("mobile_numbers", "mobile", ValueShape::StrList),
    FieldSpec::new("job_title", "title", ValueShape::Str),
    FieldSpec::new("employee_number", "employeenumber", ValueShape::Str),
    FieldSpec::new("employee_type", "employeetype", ValueShape::Str),
    FieldSpec::new("preferred_language", "preferredlanguage", ValueShape::Str),
    FieldSpec::new("organisation_unit", "ou", ValueShape::Str),
    FieldSpec::new("street_address", "street", ValueShape::Str),
    FieldSpec::new("city", "l", ValueShape::Str),
    FieldSpec::new("province", "st", ValueShape::Str),
    FieldSpec::new("postal_code", "postalcode", ValueShape::Str),
    FieldSpec::new("uid_number", "uidnumber", ValueShape::Int),
    FieldSpec::new("gid_number", "gidnumber", ValueShape::Int),
    FieldSpec::new("ssh_public_keys", "ipasshpubkey", ValueShape::StrList),
];
