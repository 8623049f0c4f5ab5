//! The generic reconciler engine.
//!
//! One engine drives every managed kind through the same
//! `Absent -> Present -> Absent` lifecycle: translate declared attributes
//! into an argument bundle via the kind's table, issue the remote call, and
//! re-read observed state. Kind differences (membership verbs, record type
//! discrimination, state toggles) are isolated to small dispatch points.

use tracing::{debug, instrument, warn};

use dirigo_directory::attrs::Attributes;
use dirigo_directory::client::DirectoryClient;
use dirigo_directory::rpc::{ArgumentSet, RpcCall, Verb};

use crate::error::{ReconcileError, ReconcileResult};
use crate::fields::{observe, option_bundle, BundlePurpose};
use crate::ident::MembershipId;
use crate::kinds::{record, Kind};
use crate::object::{ManagedObject, Presence};

/// Reconciles managed objects against the directory server.
///
/// Holds nothing but the client handle; every operation works solely on the
/// object it is given, so independent objects may be reconciled
/// concurrently over one shared client (an `Arc<impl DirectoryClient>`
/// is itself a client).
pub struct Reconciler<C: DirectoryClient> {
    client: C,
}

impl<C: DirectoryClient> Reconciler<C> {
    /// Create a reconciler over a client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Create the remote object and populate observed state.
    ///
    /// Declaration problems (missing attributes, bad shapes, malformed
    /// timestamps, conflicting arms) fail before any remote call. Every
    /// remote error is fatal here; the no-op condition cannot occur on an
    /// add call.
    #[instrument(skip_all, fields(kind = %obj.kind, client = self.client.display_name()))]
    pub async fn create(&self, obj: &mut ManagedObject) -> ReconcileResult<()> {
        let kind = obj.kind;
        kind.validate_create(&obj.declared)?;

        let mut options = option_bundle(kind.fields(), &obj.declared, BundlePurpose::Create)?;
        let verb = match kind {
            Kind::DnsRecord => {
                if let Some((attribute, value)) =
                    record::records_option(&obj.declared, &obj.declared)?
                {
                    options.set(attribute, value);
                }
                Verb::Add
            }
            Kind::HbacHostMembership | Kind::HbacUserMembership => {
                let (tag, member) = crate::kinds::membership::declared_member(&obj.declared, kind)?;
                options.set(tag.member_class(), vec![member]);
                Verb::AddMember(tag.member_class())
            }
            _ => Verb::Add,
        };

        let args = ArgumentSet {
            positional: kind.positional(&obj.declared)?,
            options,
        };
        self.client
            .execute(RpcCall::new(kind.object_class(), verb, args))
            .await?;

        let local_id = kind.derive_local_id(&obj.declared)?;
        debug!(id = %local_id, "created remote object");
        obj.local_id = Some(local_id.clone());

        // A freshly added object starts enabled; only an explicit disable
        // needs the secondary call.
        if kind.supports_state_toggle() && obj.declared.get_bool("enabled") == Some(false) {
            self.apply_state_toggle(obj, false).await;
        }

        match self.read(obj).await? {
            Presence::Present => Ok(()),
            Presence::Absent => Err(ReconcileError::drift(
                local_id,
                "object absent immediately after create",
            )),
        }
    }

    /// Refresh observed state from a fresh show call.
    ///
    /// A membership whose member has been detached out of band is drift:
    /// local state is cleared and the error surfaced, rather than silently
    /// recreating the attachment.
    #[instrument(skip_all, fields(kind = %obj.kind, client = self.client.display_name()))]
    pub async fn read(&self, obj: &mut ManagedObject) -> ReconcileResult<Presence> {
        let kind = obj.kind;
        let local_id = obj
            .local_id
            .clone()
            .ok_or(ReconcileError::MissingIdentifier { kind })?;

        if let Some(tags) = kind.member_tags() {
            return self.read_membership(obj, &local_id, tags).await;
        }

        let args = ArgumentSet::positional(kind.positional(&obj.declared)?).with_option("all", true);
        let reply = match self
            .client
            .execute(RpcCall::new(kind.object_class(), Verb::Show, args))
            .await
        {
            Ok(reply) => reply,
            Err(error) if error.is_not_found() => {
                debug!(id = %local_id, "remote object is gone");
                obj.clear_remote_state();
                return Ok(Presence::Absent);
            }
            Err(error) => return Err(error.into()),
        };

        let mut observed = observe(kind.fields(), &reply.result);
        if kind == Kind::DnsRecord {
            let record_type = record::declared_type(&obj.declared)?;
            if let Some(values) = reply.result.get(record_type.value_attribute()) {
                observed.set("records", values.as_strings());
            }
        }
        obj.observed = observed;
        Ok(Presence::Present)
    }

    async fn read_membership(
        &self,
        obj: &mut ManagedObject,
        local_id: &str,
        tags: &'static [crate::ident::MemberTag],
    ) -> ReconcileResult<Presence> {
        let kind = obj.kind;
        let id = MembershipId::decode(local_id, tags)?;

        let args = ArgumentSet::positional([id.rule.clone()]).with_option("all", true);
        let reply = match self
            .client
            .execute(RpcCall::new(kind.object_class(), Verb::Show, args))
            .await
        {
            Ok(reply) => reply,
            Err(error) if error.is_not_found() => {
                debug!(rule = %id.rule, "parent rule is gone");
                obj.clear_remote_state();
                return Ok(Presence::Absent);
            }
            Err(error) => return Err(error.into()),
        };

        let members = reply.result.get_strings(id.tag.membership_list());
        if !members.contains(&id.member.as_str()) {
            obj.clear_remote_state();
            return Err(ReconcileError::drift(
                local_id,
                format!(
                    "member '{}' is not attached to rule '{}'",
                    id.member, id.rule
                ),
            ));
        }

        let mut observed = Attributes::new()
            .with("rule_name", id.rule.clone())
            .with(id.tag.member_class(), id.member.clone());
        observed.merge(&observe(kind.fields(), &reply.result));
        obj.observed = observed;
        Ok(Presence::Present)
    }

    /// Apply a declared-attribute diff to the remote object.
    ///
    /// An empty diff issues zero remote calls. The modify call is only sent
    /// when the translated bundle is non-empty, and a remote no-op
    /// (`EmptyModlist`) counts as success. State toggles go through their
    /// own enable/disable call whose failure is logged but never fails the
    /// update. Always finishes with a fresh read.
    #[instrument(skip_all, fields(kind = %obj.kind, client = self.client.display_name()))]
    pub async fn update(&self, obj: &mut ManagedObject, diff: &Attributes) -> ReconcileResult<()> {
        let kind = obj.kind;
        if diff.is_empty() {
            debug!("empty diff, nothing to do");
            return Ok(());
        }
        if obj.local_id.is_none() {
            return Err(ReconcileError::MissingIdentifier { kind });
        }
        for attribute in diff.names() {
            if kind.is_force_new(attribute) {
                return Err(ReconcileError::ImmutableAttribute {
                    kind,
                    attribute: attribute.to_string(),
                });
            }
        }

        let mut options = option_bundle(kind.fields(), diff, BundlePurpose::Update)?;
        if kind == Kind::DnsRecord {
            if let Some((attribute, value)) = record::records_option(&obj.declared, diff)? {
                options.set(attribute, value);
            }
        }

        if options.is_empty() {
            debug!("no modifiable attributes in diff, skipping modify call");
        } else {
            let args = ArgumentSet {
                positional: kind.positional(&obj.declared)?,
                options,
            };
            match self
                .client
                .execute(RpcCall::new(kind.object_class(), Verb::Modify, args))
                .await
            {
                Ok(_) => {}
                Err(error) if error.is_no_op() => {
                    debug!("server reports nothing changed, treating as success");
                }
                Err(error) => return Err(error.into()),
            }
        }

        if kind.supports_state_toggle() {
            if let Some(enabled) = diff.get_bool("enabled") {
                self.apply_state_toggle(obj, enabled).await;
            }
        }

        obj.declared.merge(diff);
        self.read(obj).await?;
        Ok(())
    }

    /// Delete the remote object.
    ///
    /// Any remote error is fatal; deleting an object that is already gone
    /// surfaces the server's rejection instead of succeeding silently.
    #[instrument(skip_all, fields(kind = %obj.kind, client = self.client.display_name()))]
    pub async fn delete(&self, obj: &mut ManagedObject) -> ReconcileResult<()> {
        let kind = obj.kind;
        let local_id = obj
            .local_id
            .clone()
            .ok_or(ReconcileError::MissingIdentifier { kind })?;

        let call = if let Some(tags) = kind.member_tags() {
            let id = MembershipId::decode(&local_id, tags)?;
            let args = ArgumentSet::positional([id.rule.clone()])
                .with_option(id.tag.member_class(), vec![id.member.clone()]);
            RpcCall::new(
                kind.object_class(),
                Verb::RemoveMember(id.tag.member_class()),
                args,
            )
        } else {
            let mut args = ArgumentSet::positional(kind.positional(&obj.declared)?);
            if kind == Kind::DnsRecord {
                if let Some((attribute, value)) =
                    record::records_option(&obj.declared, &obj.declared)?
                {
                    args.options.set(attribute, value);
                }
            }
            RpcCall::new(kind.object_class(), Verb::Del, args)
        };

        self.client.execute(call).await?;
        debug!(id = %local_id, "deleted remote object");
        obj.clear_remote_state();
        Ok(())
    }

    /// Issue the secondary enable/disable call. Failure is logged and
    /// swallowed; the primary operation has already succeeded.
    async fn apply_state_toggle(&self, obj: &ManagedObject, enabled: bool) {
        let kind = obj.kind;
        let target = match kind.positional(&obj.declared) {
            Ok(mut positional) if !positional.is_empty() => positional.remove(0),
            _ => {
                warn!("cannot determine state toggle target, skipping");
                return;
            }
        };
        let verb = if enabled { Verb::Enable } else { Verb::Disable };
        let call = RpcCall::new(kind.object_class(), verb, ArgumentSet::positional([target]));
        if let Err(error) = self.client.execute(call).await {
            warn!(
                code = error.error_code(),
                error = %error,
                "state toggle failed, continuing"
            );
        }
    }
}
