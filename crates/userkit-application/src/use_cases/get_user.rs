//! Single-user lookup

use std::sync::Arc;

use tracing::info;
use userkit_domain::errors::{DomainError, DomainResult};
use userkit_domain::repositories::UserRepository;
use userkit_domain::value_objects::UserId;

use crate::dto::{GetUserRequest, UserDto};
use crate::result::UseCaseResult;
use crate::use_cases::fail;

const USE_CASE: &str = "get_user";

/// Fetch one user by ID
pub struct GetUserUseCase {
    users: Arc<dyn UserRepository>,
}

impl GetUserUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, request: GetUserRequest) -> UseCaseResult<UserDto> {
        let subject = request.user_id.clone();
        match self.run(request).await {
            Ok(dto) => {
                info!(use_case = USE_CASE, user_id = %dto.id, "user fetched");
                UseCaseResult::success(dto)
            }
            Err(err) => fail(USE_CASE, &subject, err),
        }
    }

    async fn run(&self, request: GetUserRequest) -> DomainResult<UserDto> {
        let id = UserId::parse(&request.user_id)?;
        let user = self
            .users
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound { id: id.to_string() })?;
        Ok(UserDto::from_domain(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::support::{fixture, seeded_user};

    #[tokio::test]
    async fn finds_existing_user() {
        let fx = fixture();
        let user = seeded_user(&fx, "a@example.com", "Alice", "sturdy pass 1").await;

        let result = GetUserUseCase::new(fx.users.clone())
            .execute(GetUserRequest {
                user_id: user.id().to_string(),
            })
            .await;
        assert_eq!(result.into_data().unwrap().email, "a@example.com");
    }

    #[tokio::test]
    async fn absent_user_is_not_found() {
        let fx = fixture();
        let result = GetUserUseCase::new(fx.users.clone())
            .execute(GetUserRequest {
                user_id: UserId::generate().to_string(),
            })
            .await;
        assert_eq!(result.error().unwrap().code, "USER_NOT_FOUND");
    }
}
