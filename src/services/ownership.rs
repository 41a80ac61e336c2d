//! Ownership-aware permission resolution
//!
//! Every owned entity is guarded by a [`ResourceTriplet`]: a global resource
//! for privileged roles, an owned resource for the record's creator and an
//! optional shared resource for its participants. For one caller, record and
//! action the effective attributes are the union of the triplet members that
//! apply.

use crate::auth::rbac::{Action, Permission, RbacSystem, ResourceTriplet, filter, union_attributes};
use crate::auth::types::{AuthenticatedUser, TokenValidator, validate_within};
use crate::config::AuthConfig;
use crate::utils::error::{HubError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Owner and participant lookups for business entities
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnershipLookup: Send + Sync {
    /// Creator of the record, or `None` when the record does not exist
    async fn owner_of(&self, entity: &str, id: i64) -> Result<Option<i64>>;

    /// Participation role of `user_id` in the record, if any
    async fn participant_role(&self, entity: &str, id: i64, user_id: i64) -> Result<Option<String>>;
}

/// How one entity type is guarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityAccess {
    /// Entity whose owner and participants are looked up
    pub entity: &'static str,
    /// Resources guarding the entity
    pub triplet: ResourceTriplet,
    /// Participation roles that grant shared access; `None` admits every participant
    pub qualifying_roles: Option<&'static [&'static str]>,
    /// Participation roles that grant shared create, update and delete;
    /// `None` falls back to `qualifying_roles`
    pub qualifying_writers: Option<&'static [&'static str]>,
}

impl EntityAccess {
    pub const fn new(entity: &'static str, triplet: ResourceTriplet) -> Self {
        Self {
            entity,
            triplet,
            qualifying_roles: None,
            qualifying_writers: None,
        }
    }

    pub const fn qualifying(mut self, roles: &'static [&'static str]) -> Self {
        self.qualifying_roles = Some(roles);
        self
    }

    /// Narrow shared writes to `roles`; reads keep `qualifying_roles`
    pub const fn qualifying_writes(mut self, roles: &'static [&'static str]) -> Self {
        self.qualifying_writers = Some(roles);
        self
    }

    /// Whether a participation role admits shared access for `action`
    pub fn qualifies(&self, action: Action, participant_role: &str) -> bool {
        let roles = match action {
            Action::Read => self.qualifying_roles,
            Action::Create | Action::Update | Action::Delete => {
                self.qualifying_writers.or(self.qualifying_roles)
            }
        };
        roles.is_none_or(|roles| roles.contains(&participant_role))
    }
}

/// Caller's relation to one record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Relation {
    pub is_owner: bool,
    pub is_qualifying_participant: bool,
}

/// Outcome of resolving a triplet for one caller and record
#[derive(Debug, Clone)]
pub struct ResolvedAccess {
    pub user: AuthenticatedUser,
    pub action: Action,
    pub relation: Relation,
    /// Effective allow-list
    pub attributes: Vec<String>,
}

impl ResolvedAccess {
    pub fn filter(&self, value: &serde_json::Value) -> serde_json::Value {
        filter::filter(value, &self.attributes)
    }
}

/// Resolves triplet permissions against record ownership
#[derive(Clone)]
pub struct OwnershipResolver {
    rbac: RbacSystem,
    validator: Arc<dyn TokenValidator>,
    lookup: Arc<dyn OwnershipLookup>,
    timeout: Duration,
}

impl std::fmt::Debug for OwnershipResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnershipResolver")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OwnershipResolver {
    pub fn new(rbac: RbacSystem, validator: Arc<dyn TokenValidator>, lookup: Arc<dyn OwnershipLookup>) -> Self {
        Self {
            rbac,
            validator,
            lookup,
            timeout: AuthConfig::default().validation_timeout(),
        }
    }

    /// Bound credential validation by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Authenticate `token`, then resolve the attributes it may use for
    /// `action` on the record (or on a record yet to be created)
    pub async fn filter_granted_attributes_for_action(
        &self,
        token: &str,
        record_id: Option<i64>,
        action: Action,
        access: &EntityAccess,
    ) -> Result<Vec<String>> {
        let user = validate_within(self.validator.as_ref(), token, self.timeout).await?;
        let resolved = self.resolve_for_user(&user, record_id, action, access).await?;
        Ok(resolved.attributes)
    }

    /// Resolve the attributes an authenticated caller may use
    pub async fn resolve_for_user(
        &self,
        user: &AuthenticatedUser,
        record_id: Option<i64>,
        action: Action,
        access: &EntityAccess,
    ) -> Result<ResolvedAccess> {
        let triplet = &access.triplet;
        let snapshot = self.rbac.snapshot();
        let global = snapshot.can(&user.roles, triplet.global, action);
        let owned = snapshot.can(&user.roles, triplet.owned, action);
        let shared = triplet
            .shared
            .map(|resource| snapshot.can(&user.roles, resource, action));

        let relation = match record_id {
            Some(id) => self.relation(user, id, action, access, shared.as_ref()).await?,
            None => Relation::default(),
        };

        let mut applicable: Vec<&Permission> = Vec::with_capacity(3);
        if global.granted {
            applicable.push(&global);
        }
        if owned.granted && relation.is_owner {
            applicable.push(&owned);
        }
        if let Some(shared) = shared.as_ref().filter(|p| p.granted && relation.is_qualifying_participant) {
            applicable.push(shared);
        }

        if applicable.is_empty() {
            warn!(
                "Denied {} on {} {:?} for user {} with roles {:?}",
                action, access.entity, record_id, user.id, user.roles
            );
            return Err(HubError::forbidden_action(format!(
                "Not allowed to {} this {}",
                action, access.entity
            )));
        }

        let attributes = union_attributes(applicable.iter().map(|p| p.attributes.as_slice()));
        debug!(
            "User {} may {} {} {:?} with {:?}",
            user.id, action, access.entity, record_id, attributes
        );

        Ok(ResolvedAccess {
            user: user.clone(),
            action,
            relation,
            attributes,
        })
    }

    async fn relation(
        &self,
        user: &AuthenticatedUser,
        record_id: i64,
        action: Action,
        access: &EntityAccess,
        shared: Option<&Permission>,
    ) -> Result<Relation> {
        let owner = self
            .lookup
            .owner_of(access.entity, record_id)
            .await?
            .ok_or_else(|| HubError::not_found(format!("{} {} not found", access.entity, record_id)))?;
        let is_owner = owner == user.id;

        // Participation only matters when the shared resource grants something
        let is_qualifying_participant = match shared {
            Some(permission) if permission.granted => self
                .lookup
                .participant_role(access.entity, record_id, user.id)
                .await?
                .is_some_and(|role| access.qualifies(action, &role)),
            _ => false,
        };

        Ok(Relation {
            is_owner,
            is_qualifying_participant,
        })
    }
}
