//! Current-user lookup

use std::sync::Arc;

use tracing::info;
use userkit_domain::errors::{DomainError, DomainResult};
use userkit_domain::ports::AuthProvider;

use crate::dto::CurrentUserDto;
use crate::result::UseCaseResult;
use crate::use_cases::fail;

const USE_CASE: &str = "get_current_user";

/// Resolve the user attached to the current request
pub struct GetCurrentUserUseCase {
    auth: Arc<dyn AuthProvider>,
}

impl GetCurrentUserUseCase {
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self { auth }
    }

    pub async fn execute(&self) -> UseCaseResult<CurrentUserDto> {
        match self.run().await {
            Ok(user) => {
                info!(use_case = USE_CASE, user_id = %user.id, "current user resolved");
                UseCaseResult::success(user)
            }
            Err(err) => fail(USE_CASE, "current-session", err),
        }
    }

    async fn run(&self) -> DomainResult<CurrentUserDto> {
        let user = self
            .auth
            .current_user()
            .await?
            .ok_or(DomainError::NotAuthenticated)?;
        Ok(CurrentUserDto::from_domain(&user))
    }
}
