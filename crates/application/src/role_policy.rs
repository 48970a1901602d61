use std::sync::Arc;

use tracing::debug;

use tasklane_core::{AppError, AppResult, UserIdentity};
use tasklane_domain::UserId;

use crate::{RoleRepository, UserRepository};

/// Decides whether an authenticated subject may run administrative operations.
///
/// Resolves the subject's record and role on every call. Any lookup failure
/// counts as not privileged.
#[derive(Clone)]
pub struct RolePolicy {
    user_repository: Arc<dyn UserRepository>,
    role_repository: Arc<dyn RoleRepository>,
}

impl RolePolicy {
    /// Creates a policy over the credential store.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        role_repository: Arc<dyn RoleRepository>,
    ) -> Self {
        Self {
            user_repository,
            role_repository,
        }
    }

    /// Returns true only when the subject's role resolves to `admin`.
    pub async fn is_privileged(&self, subject: &str) -> bool {
        match self.resolve_admin(subject).await {
            Ok(is_admin) => is_admin,
            Err(error) => {
                debug!(error = %error, subject, "role resolution failed; treating as unprivileged");
                false
            }
        }
    }

    /// Fails with `Forbidden` unless the identity is privileged.
    pub async fn require_privileged(&self, actor: &UserIdentity) -> AppResult<()> {
        if self.is_privileged(actor.subject()).await {
            return Ok(());
        }

        Err(AppError::Forbidden(
            "administrator role required".to_owned(),
        ))
    }

    async fn resolve_admin(&self, subject: &str) -> AppResult<bool> {
        let user_id = UserId::parse(subject)?;
        let user = self
            .user_repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{subject}' not found")))?;
        let role = self
            .role_repository
            .find_by_id(user.role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{}' not found", user.role_id)))?;

        Ok(role.is_admin())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::Utc;
    use tasklane_domain::{MEMBER_ROLE_ID, Role, RoleId};
    use tokio::sync::Mutex;

    use super::*;
    use crate::UserRecord;

    #[derive(Default)]
    struct FakeUserRepository {
        users: Mutex<HashMap<String, UserRecord>>,
        fail: bool,
    }

    #[async_trait]
    impl UserRepository for FakeUserRepository {
        async fn find_by_id(&self, user_id: &UserId) -> AppResult<Option<UserRecord>> {
            if self.fail {
                return Err(AppError::Internal("store offline".to_owned()));
            }
            Ok(self.users.lock().await.get(user_id.as_str()).cloned())
        }

        async fn find_by_email(&self, _email: &str) -> AppResult<Option<UserRecord>> {
            Ok(None)
        }

        async fn find_all(&self) -> AppResult<Vec<UserRecord>> {
            Ok(Vec::new())
        }

        async fn create(&self, user: UserRecord) -> AppResult<()> {
            self.users
                .lock()
                .await
                .insert(user.id.as_str().to_owned(), user);
            Ok(())
        }

        async fn update(&self, _user: UserRecord) -> AppResult<()> {
            Ok(())
        }

        async fn delete(&self, _user_id: &UserId) -> AppResult<()> {
            Ok(())
        }
    }

    struct FakeRoleRepository {
        roles: Vec<Role>,
    }

    #[async_trait]
    impl RoleRepository for FakeRoleRepository {
        async fn find_by_id(&self, role_id: RoleId) -> AppResult<Option<Role>> {
            Ok(self.roles.iter().find(|role| role.id() == role_id).cloned())
        }

        async fn find_all(&self) -> AppResult<Vec<Role>> {
            Ok(self.roles.clone())
        }
    }

    fn record(id: &str, role_id: RoleId) -> UserRecord {
        UserRecord {
            id: UserId::parse(id).unwrap_or_default(),
            name: id.to_owned(),
            email: format!("{id}@example.com"),
            password_hash: "hash".to_owned(),
            role_id,
            timezone: "UTC".to_owned(),
            language: "en".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn roles() -> FakeRoleRepository {
        let roles = [
            Role::new(RoleId::new(1), "admin", "Administrators"),
            Role::new(MEMBER_ROLE_ID, "member", "Members"),
            Role::new(RoleId::new(3), "Admin", "Look-alike"),
        ]
        .into_iter()
        .filter_map(Result::ok)
        .collect();

        FakeRoleRepository { roles }
    }

    async fn policy_with(users: &[UserRecord], fail: bool) -> RolePolicy {
        let repository = FakeUserRepository {
            fail,
            ..FakeUserRepository::default()
        };
        for user in users {
            let _ = repository.create(user.clone()).await;
        }

        RolePolicy::new(Arc::new(repository), Arc::new(roles()))
    }

    #[tokio::test]
    async fn admin_role_is_privileged() {
        let policy = policy_with(&[record("alice", RoleId::new(1))], false).await;
        assert!(policy.is_privileged("alice").await);
    }

    #[tokio::test]
    async fn member_and_look_alike_roles_are_not_privileged() {
        let policy = policy_with(
            &[record("bob", MEMBER_ROLE_ID), record("eve", RoleId::new(3))],
            false,
        )
        .await;

        assert!(!policy.is_privileged("bob").await);
        assert!(!policy.is_privileged("eve").await);
    }

    #[tokio::test]
    async fn resolution_failures_fail_closed() {
        let dangling = policy_with(&[record("carol", RoleId::new(99))], false).await;
        assert!(!dangling.is_privileged("carol").await);
        assert!(!dangling.is_privileged("nobody").await);
        assert!(!dangling.is_privileged("  ").await);

        let offline = policy_with(&[record("alice", RoleId::new(1))], true).await;
        assert!(!offline.is_privileged("alice").await);
    }

    #[tokio::test]
    async fn require_privileged_maps_denial_to_forbidden() {
        let policy = policy_with(&[record("bob", MEMBER_ROLE_ID)], false).await;
        let result = policy.require_privileged(&UserIdentity::new("bob")).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
