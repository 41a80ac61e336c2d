//! Service-level attribute sanitisation
//!
//! Business services re-derive the allow-list per record, so outputs only
//! carry what the caller may read and inputs only carry what the caller may
//! write.

use crate::auth::rbac::{Action, filter};
use crate::auth::types::AuthenticatedUser;
use crate::utils::error::{HubError, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::ownership::{EntityAccess, OwnershipResolver, ResolvedAccess};

/// Projects records and payloads onto ownership-aware allow-lists
#[derive(Debug, Clone)]
pub struct AttributeSanitizer {
    resolver: Arc<OwnershipResolver>,
}

impl AttributeSanitizer {
    pub fn new(resolver: Arc<OwnershipResolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Arc<OwnershipResolver> {
        &self.resolver
    }

    /// Authorise `action` on a record and return the value as the caller may see it
    pub async fn sanitize_output(
        &self,
        user: &AuthenticatedUser,
        access: &EntityAccess,
        record_id: i64,
        action: Action,
        value: &Value,
    ) -> Result<Value> {
        let resolved = self
            .resolver
            .resolve_for_user(user, Some(record_id), action, access)
            .await?;
        Ok(resolved.filter(value))
    }

    /// Sanitise a list of `(record id, value)` pairs, dropping records the
    /// caller may not see at all
    pub async fn sanitize_list(
        &self,
        user: &AuthenticatedUser,
        access: &EntityAccess,
        action: Action,
        records: Vec<(i64, Value)>,
    ) -> Result<Vec<Value>> {
        let total = records.len();
        let mut visible = Vec::with_capacity(total);

        for (record_id, value) in records {
            match self.sanitize_output(user, access, record_id, action, &value).await {
                Ok(projected) => visible.push(projected),
                Err(HubError::Authorization { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        debug!(
            "User {} sees {} of {} {} records",
            user.id,
            visible.len(),
            total,
            access.entity
        );
        Ok(visible)
    }

    /// Authorise `action` and strip payload attributes the caller may not set
    ///
    /// `record_id` is `None` for creation, where only the global resource applies.
    pub async fn sanitize_input(
        &self,
        user: &AuthenticatedUser,
        access: &EntityAccess,
        record_id: Option<i64>,
        action: Action,
        payload: &Value,
    ) -> Result<(ResolvedAccess, Value)> {
        if !payload.is_object() {
            return Err(HubError::bad_request("Request body must be a JSON object"));
        }

        let resolved = self
            .resolver
            .resolve_for_user(user, record_id, action, access)
            .await?;
        let sanitized = filter::filter(payload, &resolved.attributes);

        if let (Some(before), Some(after)) = (payload.as_object(), sanitized.as_object()) {
            let stripped: Vec<&String> = before.keys().filter(|k| !after.contains_key(*k)).collect();
            if !stripped.is_empty() {
                debug!(
                    "Stripped {:?} from {} {} payload of user {}",
                    stripped, action, access.entity, user.id
                );
            }
        }

        Ok((resolved, sanitized))
    }
}
