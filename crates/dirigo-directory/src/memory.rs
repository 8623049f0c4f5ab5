//! In-memory directory backend.
//!
//! A [`DirectoryClient`] that keeps every object in process memory while
//! reproducing the server's call semantics: duplicate adds are rejected, a
//! modification that changes nothing raises the empty-modlist condition,
//! enable/disable flip a per-class state flag, and member operations edit a
//! rule's membership lists.
//!
//! Used by the reconciler's test suite and as a stand-in transport for
//! demos. Records every method invoked and supports per-method fault
//! injection.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::attrs::{AttrValue, Attributes};
use crate::client::DirectoryClient;
use crate::error::{DirectoryError, DirectoryResult};
use crate::rpc::{member_list_attribute, RpcCall, RpcReply, Verb};

/// The state flag a class exposes through enable/disable, if any.
fn state_flag_attribute(object_class: &str) -> Option<&'static str> {
    match object_class {
        "dnszone" => Some("idnszoneactive"),
        "hbacrule" => Some("ipaenabledflag"),
        _ => None,
    }
}

/// In-memory implementation of [`DirectoryClient`].
pub struct MemoryDirectory {
    /// Object class -> object key -> entry.
    state: RwLock<HashMap<String, BTreeMap<String, Attributes>>>,
    /// Method names in invocation order.
    calls: RwLock<Vec<String>>,
    /// Methods that fail with an injected error.
    fail_methods: RwLock<HashSet<String>>,
}

impl MemoryDirectory {
    /// Create an empty in-memory directory.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HashMap::new()),
            calls: RwLock::new(Vec::new()),
            fail_methods: RwLock::new(HashSet::new()),
        }
    }

    /// All method names invoked so far, in order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    /// Number of calls executed so far.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Make every subsequent invocation of `method` fail with an
    /// unavailable error.
    pub async fn fail_method(&self, method: impl Into<String>) {
        self.fail_methods.write().await.insert(method.into());
    }

    /// Stop failing `method`.
    pub async fn clear_fault(&self, method: &str) {
        self.fail_methods.write().await.remove(method);
    }

    /// Seed or overwrite an entry directly, bypassing call semantics.
    pub async fn insert(&self, object_class: &str, key: &str, entry: Attributes) {
        self.state
            .write()
            .await
            .entry(object_class.to_string())
            .or_default()
            .insert(key.to_string(), entry);
    }

    /// Fetch a stored entry directly, bypassing call semantics.
    pub async fn entry(&self, object_class: &str, key: &str) -> Option<Attributes> {
        self.state
            .read()
            .await
            .get(object_class)
            .and_then(|objects| objects.get(key))
            .cloned()
    }

    fn object_key(call: &RpcCall) -> String {
        call.args.positional.join("/")
    }

    fn handle_add(
        objects: &mut BTreeMap<String, Attributes>,
        call: &RpcCall,
        key: &str,
    ) -> DirectoryResult<RpcReply> {
        if objects.contains_key(key) {
            return Err(DirectoryError::already_exists(&call.object_class, key));
        }
        let mut entry = call.args.options.clone();
        if let Some(flag) = state_flag_attribute(&call.object_class) {
            entry.set(flag, "TRUE");
        }
        objects.insert(key.to_string(), entry.clone());
        Ok(RpcReply::with_result(entry).with_value(key))
    }

    fn handle_modify(
        objects: &mut BTreeMap<String, Attributes>,
        call: &RpcCall,
        key: &str,
    ) -> DirectoryResult<RpcReply> {
        let entry = objects
            .get_mut(key)
            .ok_or_else(|| DirectoryError::not_found(&call.object_class, key))?;

        let mut changed = false;
        for (name, value) in call.args.options.iter() {
            if entry.get(name) != Some(value) {
                entry.set(name.clone(), value.clone());
                changed = true;
            }
        }
        if !changed {
            return Err(DirectoryError::empty_modlist(&call.object_class, key));
        }
        Ok(RpcReply::with_result(entry.clone()).with_value(key))
    }

    fn handle_del(
        objects: &mut BTreeMap<String, Attributes>,
        call: &RpcCall,
        key: &str,
    ) -> DirectoryResult<RpcReply> {
        let Some(entry) = objects.get_mut(key) else {
            return Err(DirectoryError::not_found(&call.object_class, key));
        };

        // A record delete names the value lists to remove; the entry only
        // disappears once no record values remain.
        let has_value_lists = call
            .args
            .options
            .iter()
            .any(|(_, value)| matches!(value, AttrValue::List(_)));
        if call.object_class == "dnsrecord" && has_value_lists {
            for (name, value) in call.args.options.iter() {
                let AttrValue::List(to_remove) = value else {
                    continue;
                };
                if let Some(AttrValue::List(stored)) = entry.get(name).cloned() {
                    let remaining: Vec<String> = stored
                        .into_iter()
                        .filter(|item| !to_remove.contains(item))
                        .collect();
                    if remaining.is_empty() {
                        entry.remove(name);
                    } else {
                        entry.set(name.clone(), remaining);
                    }
                }
            }
            let any_records_left = entry
                .iter()
                .any(|(name, value)| name.ends_with("record") && matches!(value, AttrValue::List(items) if !items.is_empty()));
            if any_records_left {
                return Ok(RpcReply::with_result(entry.clone()).with_value(key));
            }
        }

        objects.remove(key);
        Ok(RpcReply::empty().with_value(key))
    }

    fn handle_state_flip(
        objects: &mut BTreeMap<String, Attributes>,
        call: &RpcCall,
        key: &str,
        enabled: bool,
    ) -> DirectoryResult<RpcReply> {
        let flag = state_flag_attribute(&call.object_class).ok_or_else(|| {
            DirectoryError::rejected(format!(
                "{} does not support enable/disable",
                call.object_class
            ))
        })?;
        let entry = objects
            .get_mut(key)
            .ok_or_else(|| DirectoryError::not_found(&call.object_class, key))?;
        entry.set(flag, if enabled { "TRUE" } else { "FALSE" });
        Ok(RpcReply::empty().with_value(key))
    }

    fn handle_member_edit(
        objects: &mut BTreeMap<String, Attributes>,
        call: &RpcCall,
        key: &str,
        member_class: &str,
        add: bool,
    ) -> DirectoryResult<RpcReply> {
        let list_attr = member_list_attribute(member_class).ok_or_else(|| {
            DirectoryError::rejected(format!("unknown member class '{member_class}'"))
        })?;
        let entry = objects
            .get_mut(key)
            .ok_or_else(|| DirectoryError::not_found(&call.object_class, key))?;

        let members: Vec<String> = call
            .args
            .options
            .get(member_class)
            .map(|value| value.as_strings().into_iter().map(str::to_string).collect())
            .unwrap_or_default();
        if members.is_empty() {
            return Err(DirectoryError::rejected(format!(
                "no '{member_class}' members given"
            )));
        }

        let mut list: Vec<String> = entry.get_strings(list_attr).iter().map(|s| s.to_string()).collect();
        for member in members {
            if add {
                if !list.contains(&member) {
                    list.push(member);
                }
            } else if let Some(position) = list.iter().position(|item| *item == member) {
                list.remove(position);
            } else {
                return Err(DirectoryError::not_found(member_class, member));
            }
        }
        entry.set(list_attr, list);
        Ok(RpcReply::with_result(entry.clone()).with_value(key))
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryClient for MemoryDirectory {
    fn display_name(&self) -> &str {
        "memory"
    }

    async fn execute(&self, call: RpcCall) -> DirectoryResult<RpcReply> {
        let method = call.method_name();
        self.calls.write().await.push(method.clone());

        if self.fail_methods.read().await.contains(&method) {
            debug!(method = %method, "returning injected fault");
            return Err(DirectoryError::unavailable(format!(
                "injected fault for {method}"
            )));
        }

        let key = Self::object_key(&call);
        debug!(method = %method, key = %key, "executing in-memory call");

        let mut state = self.state.write().await;
        let objects = state.entry(call.object_class.clone()).or_default();

        match call.verb {
            Verb::Add => Self::handle_add(objects, &call, &key),
            Verb::Modify => Self::handle_modify(objects, &call, &key),
            Verb::Show => objects
                .get(&key)
                .map(|entry| RpcReply::with_result(entry.clone()).with_value(&key))
                .ok_or_else(|| DirectoryError::not_found(&call.object_class, &key)),
            Verb::Del => Self::handle_del(objects, &call, &key),
            Verb::Enable => Self::handle_state_flip(objects, &call, &key, true),
            Verb::Disable => Self::handle_state_flip(objects, &call, &key, false),
            Verb::AddMember(member_class) => {
                Self::handle_member_edit(objects, &call, &key, member_class, true)
            }
            Verb::RemoveMember(member_class) => {
                Self::handle_member_edit(objects, &call, &key, member_class, false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::ArgumentSet;

    fn add_user(login: &str) -> RpcCall {
        RpcCall::new(
            "user",
            Verb::Add,
            ArgumentSet::positional([login])
                .with_option("givenname", "Jane")
                .with_option("sn", "Doe"),
        )
    }

    #[tokio::test]
    async fn test_add_then_show() {
        let dir = MemoryDirectory::new();
        dir.execute(add_user("jdoe")).await.unwrap();

        let reply = dir
            .execute(RpcCall::new(
                "user",
                Verb::Show,
                ArgumentSet::positional(["jdoe"]),
            ))
            .await
            .unwrap();
        assert_eq!(reply.result.get_str("givenname"), Some("Jane"));
        assert_eq!(reply.value.as_deref(), Some("jdoe"));
    }

    #[tokio::test]
    async fn test_duplicate_add_rejected() {
        let dir = MemoryDirectory::new();
        dir.execute(add_user("jdoe")).await.unwrap();
        let err = dir.execute(add_user("jdoe")).await.unwrap_err();
        assert_eq!(err.error_code(), "ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn test_no_change_modify_raises_empty_modlist() {
        let dir = MemoryDirectory::new();
        dir.execute(add_user("jdoe")).await.unwrap();

        let call = RpcCall::new(
            "user",
            Verb::Modify,
            ArgumentSet::positional(["jdoe"]).with_option("givenname", "Jane"),
        );
        let err = dir.execute(call).await.unwrap_err();
        assert!(err.is_no_op());
    }

    #[tokio::test]
    async fn test_disable_sets_state_flag() {
        let dir = MemoryDirectory::new();
        dir.execute(RpcCall::new(
            "dnszone",
            Verb::Add,
            ArgumentSet::positional(["example.test."]),
        ))
        .await
        .unwrap();

        dir.execute(RpcCall::new(
            "dnszone",
            Verb::Disable,
            ArgumentSet::positional(["example.test."]),
        ))
        .await
        .unwrap();

        let entry = dir.entry("dnszone", "example.test.").await.unwrap();
        assert_eq!(entry.get_str("idnszoneactive"), Some("FALSE"));
    }

    #[tokio::test]
    async fn test_enable_on_unsupported_class_rejected() {
        let dir = MemoryDirectory::new();
        dir.execute(add_user("jdoe")).await.unwrap();
        let err = dir
            .execute(RpcCall::new(
                "user",
                Verb::Enable,
                ArgumentSet::positional(["jdoe"]),
            ))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "REJECTED");
    }

    #[tokio::test]
    async fn test_member_add_and_remove() {
        let dir = MemoryDirectory::new();
        dir.execute(RpcCall::new(
            "hbacrule",
            Verb::Add,
            ArgumentSet::positional(["allow-ssh"]),
        ))
        .await
        .unwrap();

        dir.execute(RpcCall::new(
            "hbacrule",
            Verb::AddMember("host"),
            ArgumentSet::positional(["allow-ssh"]).with_option("host", vec!["h1.example.test."]),
        ))
        .await
        .unwrap();

        let entry = dir.entry("hbacrule", "allow-ssh").await.unwrap();
        assert_eq!(entry.get_strings("memberhost_host"), vec!["h1.example.test."]);

        // Removing an absent member is an error, not a silent success.
        let err = dir
            .execute(RpcCall::new(
                "hbacrule",
                Verb::RemoveMember("host"),
                ArgumentSet::positional(["allow-ssh"]).with_option("host", vec!["h2.example.test."]),
            ))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_record_del_removes_values_then_entry() {
        let dir = MemoryDirectory::new();
        dir.execute(RpcCall::new(
            "dnsrecord",
            Verb::Add,
            ArgumentSet::positional(["example.test.", "www"])
                .with_option("arecord", vec!["10.0.0.1", "10.0.0.2"]),
        ))
        .await
        .unwrap();

        dir.execute(RpcCall::new(
            "dnsrecord",
            Verb::Del,
            ArgumentSet::positional(["example.test.", "www"])
                .with_option("arecord", vec!["10.0.0.1"]),
        ))
        .await
        .unwrap();
        let entry = dir.entry("dnsrecord", "example.test./www").await.unwrap();
        assert_eq!(entry.get_strings("arecord"), vec!["10.0.0.2"]);

        dir.execute(RpcCall::new(
            "dnsrecord",
            Verb::Del,
            ArgumentSet::positional(["example.test.", "www"])
                .with_option("arecord", vec!["10.0.0.2"]),
        ))
        .await
        .unwrap();
        assert!(dir.entry("dnsrecord", "example.test./www").await.is_none());
    }

    #[tokio::test]
    async fn test_call_log_and_fault_injection() {
        let dir = MemoryDirectory::new();
        dir.fail_method("user_show").await;

        dir.execute(add_user("jdoe")).await.unwrap();
        let err = dir
            .execute(RpcCall::new(
                "user",
                Verb::Show,
                ArgumentSet::positional(["jdoe"]),
            ))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNAVAILABLE");

        assert_eq!(dir.calls().await, vec!["user_add", "user_show"]);

        dir.clear_fault("user_show").await;
        assert!(
            dir.execute(RpcCall::new(
                "user",
                Verb::Show,
                ArgumentSet::positional(["jdoe"]),
            ))
            .await
            .is_ok()
        );
    }
}
