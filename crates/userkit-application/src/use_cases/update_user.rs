//! Profile update

use std::sync::Arc;

use tracing::info;
use userkit_domain::entities::User;
use userkit_domain::errors::{DomainError, DomainResult};
use userkit_domain::repositories::UserRepository;
use userkit_domain::value_objects::{Email, UserId};

use crate::dto::{UpdateUserRequest, UserDto};
use crate::result::UseCaseResult;
use crate::use_cases::fail;

const USE_CASE: &str = "update_user";

/// Change a user's name and/or email
pub struct UpdateUserUseCase {
    users: Arc<dyn UserRepository>,
}

impl UpdateUserUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, request: UpdateUserRequest) -> UseCaseResult<UserDto> {
        let subject = request.user_id.clone();
        match self.run(request).await {
            Ok(user) => {
                info!(use_case = USE_CASE, user_id = %user.id(), "user updated");
                UseCaseResult::success(UserDto::from_domain(&user))
            }
            Err(err) => fail(USE_CASE, &subject, err),
        }
    }

    async fn run(&self, request: UpdateUserRequest) -> DomainResult<User> {
        let id = UserId::parse(&request.user_id)?;
        let user = self
            .users
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound { id: id.to_string() })?;

        let email = match &request.email {
            Some(raw) => {
                let email = Email::parse(raw)?;
                // Re-registering the current address is a no-op, not a
                // conflict.
                if email != *user.email() {
                    if let Some(other) = self.users.find_by_email(&email).await? {
                        if other.id() != user.id() {
                            return Err(DomainError::EmailAlreadyExists {
                                email: email.to_string(),
                            });
                        }
                    }
                }
                Some(email)
            }
            None => None,
        };

        let updated = user.with_profile(request.name.as_deref(), email)?;
        self.users.update(&updated).await?;
        Ok(updated)
    }
}
