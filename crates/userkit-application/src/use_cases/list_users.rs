//! User listing

use std::sync::Arc;

use tracing::info;
use userkit_domain::errors::DomainResult;
use userkit_domain::repositories::UserRepository;

use crate::dto::UserDto;
use crate::result::UseCaseResult;
use crate::use_cases::fail;

const USE_CASE: &str = "list_users";

/// List every user, oldest first
pub struct ListUsersUseCase {
    users: Arc<dyn UserRepository>,
}

impl ListUsersUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn execute(&self) -> UseCaseResult<Vec<UserDto>> {
        match self.run().await {
            Ok(users) => {
                info!(use_case = USE_CASE, count = users.len(), "users listed");
                UseCaseResult::success(users)
            }
            Err(err) => fail(USE_CASE, "all", err),
        }
    }

    async fn run(&self) -> DomainResult<Vec<UserDto>> {
        let users = self.users.find_all().await?;
        Ok(users.iter().map(UserDto::from_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::support::{fixture, seeded_user};

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let fx = fixture();
        let result = ListUsersUseCase::new(fx.users.clone()).execute().await;
        assert_eq!(result.into_data().unwrap(), vec![]);
    }

    #[tokio::test]
    async fn lists_users_in_creation_order() {
        let fx = fixture();
        seeded_user(&fx, "first@example.com", "First", "sturdy pass 1").await;
        seeded_user(&fx, "second@example.com", "Second", "sturdy pass 1").await;

        let users = ListUsersUseCase::new(fx.users.clone())
            .execute()
            .await
            .into_data()
            .unwrap();
        let emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["first@example.com", "second@example.com"]);
    }
}
