//! User registration

use std::sync::Arc;

use tracing::info;
use userkit_domain::entities::User;
use userkit_domain::errors::{DomainError, DomainResult};
use userkit_domain::ports::HashService;
use userkit_domain::repositories::UserRepository;
use userkit_domain::services::PasswordPolicy;
use userkit_domain::value_objects::Email;

use crate::dto::{CreateUserRequest, UserDto};
use crate::result::UseCaseResult;
use crate::use_cases::fail;

const USE_CASE: &str = "create_user";

/// Register a new user account
pub struct CreateUserUseCase {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn HashService>,
    policy: PasswordPolicy,
}

impl CreateUserUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn HashService>,
        policy: PasswordPolicy,
    ) -> Self {
        Self {
            users,
            hasher,
            policy,
        }
    }

    pub async fn execute(&self, request: CreateUserRequest) -> UseCaseResult<UserDto> {
        let subject = request.email.clone();
        match self.run(request).await {
            Ok(user) => {
                info!(use_case = USE_CASE, user_id = %user.id(), "user created");
                UseCaseResult::success(UserDto::from_domain(&user))
            }
            Err(err) => fail(USE_CASE, &subject, err),
        }
    }

    async fn run(&self, request: CreateUserRequest) -> DomainResult<User> {
        let email = Email::parse(&request.email)?;
        self.policy.check(&request.password)?;

        // Uniqueness is checked before hashing so the caller gets the
        // business error rather than a storage constraint violation.
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailAlreadyExists {
                email: email.to_string(),
            });
        }

        let hash = self.hasher.generate_hash(&request.password).await?;
        let user = User::create(email, &request.name, hash)?;
        self.users.save(&user).await?;
        Ok(user)
    }
}
