//! The remote call model.
//!
//! Every operation against the directory server is a named method of the
//! form `{object_class}_{verb}` taking a positional (required) argument list
//! and a keyword (optional) argument map. Membership edits on rule objects
//! use the `add_{member_class}` / `remove_{member_class}` verb family.

use std::fmt;

use crate::attrs::{AttrValue, Attributes};

/// The verb of a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Create an object (`{class}_add`).
    Add,
    /// Modify an object in place (`{class}_mod`).
    Modify,
    /// Fetch an object (`{class}_show`).
    Show,
    /// Delete an object (`{class}_del`).
    Del,
    /// Switch an object into its active state (`{class}_enable`).
    Enable,
    /// Switch an object into its inactive state (`{class}_disable`).
    Disable,
    /// Attach members of the given class to a rule
    /// (`{class}_add_{member_class}`).
    AddMember(&'static str),
    /// Detach members of the given class from a rule
    /// (`{class}_remove_{member_class}`).
    RemoveMember(&'static str),
}

impl Verb {
    /// Render the method name for an object class.
    pub fn method_name(&self, object_class: &str) -> String {
        match self {
            Verb::Add => format!("{object_class}_add"),
            Verb::Modify => format!("{object_class}_mod"),
            Verb::Show => format!("{object_class}_show"),
            Verb::Del => format!("{object_class}_del"),
            Verb::Enable => format!("{object_class}_enable"),
            Verb::Disable => format!("{object_class}_disable"),
            Verb::AddMember(member_class) => format!("{object_class}_add_{member_class}"),
            Verb::RemoveMember(member_class) => format!("{object_class}_remove_{member_class}"),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Add => write!(f, "add"),
            Verb::Modify => write!(f, "mod"),
            Verb::Show => write!(f, "show"),
            Verb::Del => write!(f, "del"),
            Verb::Enable => write!(f, "enable"),
            Verb::Disable => write!(f, "disable"),
            Verb::AddMember(member_class) => write!(f, "add_{member_class}"),
            Verb::RemoveMember(member_class) => write!(f, "remove_{member_class}"),
        }
    }
}

/// The membership list attribute a rule's show result carries for a member
/// class.
///
/// Part of the remote schema contract: host-side members land in
/// `memberhost_*`, user-side members in `memberuser_*`.
pub fn member_list_attribute(member_class: &str) -> Option<&'static str> {
    match member_class {
        "host" => Some("memberhost_host"),
        "hostgroup" => Some("memberhost_hostgroup"),
        "user" => Some("memberuser_user"),
        "group" => Some("memberuser_group"),
        _ => None,
    }
}

/// A required-plus-optional argument bundle, built fresh for every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentSet {
    /// Positional arguments identifying the object (e.g. `[zone, name]`).
    pub positional: Vec<String>,
    /// Keyword arguments; omission means "leave unchanged" on modify and
    /// "use the server default" on add.
    pub options: Attributes,
}

impl ArgumentSet {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an argument set from positional arguments.
    pub fn positional<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            positional: args.into_iter().map(Into::into).collect(),
            options: Attributes::new(),
        }
    }

    /// Add a keyword argument using builder style.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.options.set(name, value);
        self
    }

    /// Replace the keyword arguments wholesale.
    #[must_use]
    pub fn with_options(mut self, options: Attributes) -> Self {
        self.options = options;
        self
    }
}

/// A fully described remote call.
#[derive(Debug, Clone)]
pub struct RpcCall {
    /// The remote object class the call addresses (e.g. `dnszone`, `user`).
    pub object_class: String,
    /// The call verb.
    pub verb: Verb,
    /// The argument bundle.
    pub args: ArgumentSet,
}

impl RpcCall {
    /// Create a new call.
    pub fn new(object_class: impl Into<String>, verb: Verb, args: ArgumentSet) -> Self {
        Self {
            object_class: object_class.into(),
            verb,
            args,
        }
    }

    /// The rendered remote method name.
    pub fn method_name(&self) -> String {
        self.verb.method_name(&self.object_class)
    }
}

impl fmt::Display for RpcCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.method_name(), self.args.positional.join(", "))
    }
}

/// The structured result of a remote call.
#[derive(Debug, Clone, Default)]
pub struct RpcReply {
    /// The primary value the server reports for the affected object, if any.
    pub value: Option<String>,
    /// The object entry the call returned.
    pub result: Attributes,
    /// Human-readable summary line, if the server produced one.
    pub summary: Option<String>,
}

impl RpcReply {
    /// Create a reply carrying an entry.
    pub fn with_result(result: Attributes) -> Self {
        Self {
            value: None,
            result,
            summary: None,
        }
    }

    /// Create an empty reply.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Attach the affected object's primary value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}
