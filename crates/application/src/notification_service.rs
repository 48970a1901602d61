use std::sync::Arc;

use tracing::info;

use tasklane_core::{AppError, AppResult, UserIdentity};
use tasklane_domain::{Notification, NotificationDefinitionInput, NotificationId, UserId};

use crate::{Clock, NotificationRepository, UserRepository};

/// Input for notifying a user.
#[derive(Debug, Clone, Default)]
pub struct CreateNotificationInput {
    /// Caller-chosen identifier; generated when absent.
    pub id: Option<String>,
    /// Category, for example `task_assigned`.
    pub kind: String,
    /// Human-readable text.
    pub message: String,
    /// Recipient.
    pub user_id: String,
}

/// Application service for user notifications.
#[derive(Clone)]
pub struct NotificationService {
    user_repository: Arc<dyn UserRepository>,
    notification_repository: Arc<dyn NotificationRepository>,
    clock: Arc<dyn Clock>,
}

impl NotificationService {
    /// Creates a new notification service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        notification_repository: Arc<dyn NotificationRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repository,
            notification_repository,
            clock,
        }
    }

    /// Stores an unread notification for an existing recipient.
    pub async fn create_notification(
        &self,
        input: CreateNotificationInput,
    ) -> AppResult<Notification> {
        let id = match input.id.as_deref() {
            Some(value) if !value.trim().is_empty() => NotificationId::parse(value)?,
            _ => NotificationId::new(),
        };
        let user_id = UserId::parse(input.user_id)?;
        if self.user_repository.find_by_id(&user_id).await?.is_none() {
            return Err(AppError::Validation(format!(
                "recipient '{user_id}' does not exist"
            )));
        }

        let notification = Notification::new(NotificationDefinitionInput {
            id,
            kind: input.kind,
            message: input.message,
            user_id,
            is_read: false,
            created_at: self.clock.now(),
        })?;

        self.notification_repository
            .create(notification.clone())
            .await?;

        info!(
            notification_id = %notification.id(),
            user_id = %notification.user_id(),
            "notification created"
        );
        Ok(notification)
    }

    /// Lists the caller's notifications, newest first.
    pub async fn list_notifications(&self, actor: &UserIdentity) -> AppResult<Vec<Notification>> {
        let user_id = UserId::parse(actor.subject())?;
        self.notification_repository.list_for_user(&user_id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tasklane_domain::MEMBER_ROLE_ID;

    use super::*;
    use crate::UserRecord;
    use crate::test_support::{FakeNotificationRepository, FakeUserRepository, FixedClock};

    struct Fixture {
        notifications: Arc<FakeNotificationRepository>,
        service: NotificationService,
    }

    async fn fixture() -> AppResult<Fixture> {
        let users = Arc::new(FakeUserRepository::default());
        let notifications = Arc::new(FakeNotificationRepository::default());
        let now = Utc::now();
        users
            .create(UserRecord {
                id: UserId::parse("bob")?,
                name: "Bob".to_owned(),
                email: "bob@example.com".to_owned(),
                password_hash: String::new(),
                role_id: MEMBER_ROLE_ID,
                timezone: "UTC".to_owned(),
                language: "en".to_owned(),
                created_at: now,
                updated_at: now,
            })
            .await?;

        Ok(Fixture {
            notifications: notifications.clone(),
            service: NotificationService::new(
                users,
                notifications,
                Arc::new(FixedClock::default()),
            ),
        })
    }

    fn notify(user_id: &str) -> CreateNotificationInput {
        CreateNotificationInput {
            kind: "task_assigned".to_owned(),
            message: "You were assigned to 'Ship release'".to_owned(),
            user_id: user_id.to_owned(),
            ..CreateNotificationInput::default()
        }
    }

    #[tokio::test]
    async fn recipient_sees_only_their_notifications() -> AppResult<()> {
        let fixture = fixture().await?;

        let created = fixture.service.create_notification(notify("bob")).await?;

        assert!(!created.is_read());
        let for_bob = fixture
            .service
            .list_notifications(&UserIdentity::new("bob"))
            .await?;
        let for_alice = fixture
            .service
            .list_notifications(&UserIdentity::new("alice"))
            .await?;
        assert_eq!(for_bob, vec![created]);
        assert!(for_alice.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_recipient_is_rejected() -> AppResult<()> {
        let fixture = fixture().await?;

        let result = fixture.service.create_notification(notify("ghost")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(fixture.notifications.notifications.lock().await.is_empty());
        Ok(())
    }
}
