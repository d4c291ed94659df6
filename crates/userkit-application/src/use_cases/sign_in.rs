//! Password sign-in

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;
use userkit_domain::entities::UserSession;
use userkit_domain::errors::{DomainError, DomainResult};
use userkit_domain::ports::{HashService, TokenSource};
use userkit_domain::repositories::{SessionRepository, UserRepository};
use userkit_domain::value_objects::Email;

use crate::dto::{SignInRequest, SignInResponse, UserDto};
use crate::result::UseCaseResult;
use crate::use_cases::fail;

const USE_CASE: &str = "sign_in";

/// Authenticate with email and password, issuing a new session
///
/// Every rejection surfaces the same `AUTHENTICATION_FAILED` code, and
/// an unknown email still pays for a full hash comparison, so callers
/// cannot tell registered addresses from unregistered ones.
pub struct SignInUseCase {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    hasher: Arc<dyn HashService>,
    tokens: Arc<dyn TokenSource>,
    access_token_ttl_minutes: u32,
}

impl SignInUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        hasher: Arc<dyn HashService>,
        tokens: Arc<dyn TokenSource>,
        access_token_ttl_minutes: u32,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            tokens,
            access_token_ttl_minutes,
        }
    }

    pub async fn execute(&self, request: SignInRequest) -> UseCaseResult<SignInResponse> {
        let subject = request.email.clone();
        match self.run(request).await {
            Ok(response) => {
                info!(
                    use_case = USE_CASE,
                    user_id = %response.user.id,
                    session_id = %response.session_id,
                    "signed in"
                );
                UseCaseResult::success(response)
            }
            Err(err) => fail(USE_CASE, &subject, err),
        }
    }

    async fn run(&self, request: SignInRequest) -> DomainResult<SignInResponse> {
        // A malformed email cannot belong to any account; reporting it
        // as a credential failure keeps the error surface uniform.
        let email = Email::parse(&request.email).map_err(|_| DomainError::AuthenticationFailed)?;

        let user = self.users.find_by_email(&email).await?;
        let verified = match &user {
            Some(user) => {
                self.hasher
                    .compare_hash(&request.password, user.password_hash())
                    .await?
            }
            None => {
                // Burn the same hashing work as the found path.
                self.hasher
                    .compare_hash(&request.password, &self.hasher.dummy_hash())
                    .await?;
                false
            }
        };
        let user = match (user, verified) {
            (Some(user), true) => user,
            _ => return Err(DomainError::AuthenticationFailed),
        };

        let access_token = self.tokens.generate_token();
        let access_token_hash = self.hasher.generate_hash(&access_token).await?;
        let expires_at = Utc::now() + Duration::minutes(self.access_token_ttl_minutes as i64);
        let session = UserSession::create(user.id().clone(), access_token_hash, expires_at)?;
        self.sessions.save(&session).await?;

        Ok(SignInResponse {
            user: UserDto::from_domain(&user),
            session_id: session.id().to_string(),
            access_token,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::support::{fixture, seeded_user, Fixture};

    fn use_case(fx: &Fixture) -> SignInUseCase {
        SignInUseCase::new(
            fx.users.clone(),
            fx.sessions.clone(),
            fx.hasher.clone(),
            fx.tokens.clone(),
            60,
        )
    }

    #[tokio::test]
    async fn valid_credentials_issue_a_session() {
        let fx = fixture();
        let user = seeded_user(&fx, "a@example.com", "Alice", "sturdy pass 1").await;

        let result = use_case(&fx)
            .execute(SignInRequest {
                email: "a@example.com".to_string(),
                password: "sturdy pass 1".to_string(),
            })
            .await;

        let response = result.into_data().unwrap();
        assert_eq!(response.user.id, user.id().to_string());
        assert!(!response.access_token.is_empty());
        assert!(response.expires_at > Utc::now());

        // The stored session carries a hash, never the raw token.
        let sessions = fx.sessions.find_by_user(user.id()).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_ne!(sessions[0].access_token_hash(), response.access_token);
        assert!(fx
            .hasher
            .compare_hash(&response.access_token, sessions[0].access_token_hash())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn wrong_password_fails_uniformly() {
        let fx = fixture();
        seeded_user(&fx, "a@example.com", "Alice", "sturdy pass 1").await;

        let result = use_case(&fx)
            .execute(SignInRequest {
                email: "a@example.com".to_string(),
                password: "wrong pass 1".to_string(),
            })
            .await;
        assert_eq!(result.error().unwrap().code, "AUTHENTICATION_FAILED");
    }

    #[tokio::test]
    async fn unknown_email_fails_with_the_same_code() {
        let fx = fixture();
        let result = use_case(&fx)
            .execute(SignInRequest {
                email: "nobody@example.com".to_string(),
                password: "sturdy pass 1".to_string(),
            })
            .await;
        assert_eq!(result.error().unwrap().code, "AUTHENTICATION_FAILED");
    }

    #[tokio::test]
    async fn malformed_email_fails_with_the_same_code() {
        let fx = fixture();
        let result = use_case(&fx)
            .execute(SignInRequest {
                email: "not an email".to_string(),
                password: "sturdy pass 1".to_string(),
            })
            .await;
        assert_eq!(result.error().unwrap().code, "AUTHENTICATION_FAILED");
    }

    #[tokio::test]
    async fn repeated_sign_in_creates_distinct_sessions() {
        let fx = fixture();
        let user = seeded_user(&fx, "a@example.com", "Alice", "sturdy pass 1").await;
        let use_case = use_case(&fx);
        let request = SignInRequest {
            email: "a@example.com".to_string(),
            password: "sturdy pass 1".to_string(),
        };

        let first = use_case.execute(request.clone()).await.into_data().unwrap();
        let second = use_case.execute(request).await.into_data().unwrap();
        assert_ne!(first.session_id, second.session_id);
        assert_ne!(first.access_token, second.access_token);
        assert_eq!(fx.sessions.find_by_user(user.id()).await.unwrap().len(), 2);
    }
}
