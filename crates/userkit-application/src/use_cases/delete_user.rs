//! Account deletion

use std::sync::Arc;

use tracing::info;
use userkit_domain::errors::{DomainError, DomainResult};
use userkit_domain::repositories::{SessionRepository, UnitOfWork, UserRepository};
use userkit_domain::value_objects::UserId;

use crate::dto::DeleteUserRequest;
use crate::result::UseCaseResult;
use crate::use_cases::fail;

const USE_CASE: &str = "delete_user";

/// Delete an account and all of its sessions atomically
pub struct DeleteUserUseCase {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl DeleteUserUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            users,
            sessions,
            unit_of_work,
        }
    }

    pub async fn execute(&self, request: DeleteUserRequest) -> UseCaseResult<()> {
        let subject = request.user_id.clone();
        match self.run(request).await {
            Ok(()) => {
                info!(use_case = USE_CASE, user_id = %subject, "user deleted");
                UseCaseResult::success(())
            }
            Err(err) => fail(USE_CASE, &subject, err),
        }
    }

    async fn run(&self, request: DeleteUserRequest) -> DomainResult<()> {
        let id = UserId::parse(&request.user_id)?;
        if !self.users.exists(&id).await? {
            return Err(DomainError::UserNotFound { id: id.to_string() });
        }

        let tx = self.unit_of_work.begin().await?;
        let outcome = async {
            self.sessions.delete_by_user(&id).await?;
            self.users.delete(&id).await
        }
        .await;
        match outcome {
            Ok(()) => tx.commit().await,
            Err(err) => {
                tx.rollback().await?;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use userkit_domain::entities::UserSession;

    use super::*;
    use crate::use_cases::support::{fixture, seeded_user};

    #[tokio::test]
    async fn deletes_user_and_sessions() {
        let fx = fixture();
        let user = seeded_user(&fx, "a@example.com", "Alice", "sturdy pass 1").await;
        let session = UserSession::create(
            user.id().clone(),
            "hash".to_string(),
            Utc::now() + Duration::minutes(5),
        )
        .unwrap();
        fx.sessions.save(&session).await.unwrap();

        let result = DeleteUserUseCase::new(
            fx.users.clone(),
            fx.sessions.clone(),
            fx.unit_of_work.clone(),
        )
        .execute(DeleteUserRequest {
            user_id: user.id().to_string(),
        })
        .await;

        assert!(result.is_success());
        assert!(!fx.users.exists(user.id()).await.unwrap());
        assert!(fx.sessions.find_by_user(user.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let fx = fixture();
        let result = DeleteUserUseCase::new(
            fx.users.clone(),
            fx.sessions.clone(),
            fx.unit_of_work.clone(),
        )
        .execute(DeleteUserRequest {
            user_id: UserId::generate().to_string(),
        })
        .await;
        assert_eq!(result.error().unwrap().code, "USER_NOT_FOUND");
    }
}
