//! Password reset issuance

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;
use userkit_domain::entities::UserSession;
use userkit_domain::errors::DomainResult;
use userkit_domain::ports::{HashService, TokenSource};
use userkit_domain::repositories::{SessionRepository, UserRepository};
use userkit_domain::value_objects::Email;

use crate::dto::{RequestPasswordResetRequest, RequestPasswordResetResponse};
use crate::result::UseCaseResult;
use crate::use_cases::fail;

const USE_CASE: &str = "request_password_reset";

/// Issue a password reset token for an email address
///
/// Succeeds whether or not the address is registered; for an unknown
/// address the response simply carries no token, so the operation
/// does not reveal which accounts exist. The raw reset token is
/// returned once for out-of-band delivery and only its hash is stored.
pub struct RequestPasswordResetUseCase {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    hasher: Arc<dyn HashService>,
    tokens: Arc<dyn TokenSource>,
    reset_token_ttl_minutes: u32,
}

impl RequestPasswordResetUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        hasher: Arc<dyn HashService>,
        tokens: Arc<dyn TokenSource>,
        reset_token_ttl_minutes: u32,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            tokens,
            reset_token_ttl_minutes,
        }
    }

    pub async fn execute(
        &self,
        request: RequestPasswordResetRequest,
    ) -> UseCaseResult<RequestPasswordResetResponse> {
        let subject = request.email.clone();
        match self.run(request).await {
            Ok(response) => {
                if let Some(session_id) = &response.session_id {
                    info!(use_case = USE_CASE, session_id = %session_id, "reset token issued");
                }
                UseCaseResult::success(response)
            }
            Err(err) => fail(USE_CASE, &subject, err),
        }
    }

    async fn run(
        &self,
        request: RequestPasswordResetRequest,
    ) -> DomainResult<RequestPasswordResetResponse> {
        let empty = RequestPasswordResetResponse {
            session_id: None,
            reset_token: None,
            expires_at: None,
        };
        let email = match Email::parse(&request.email) {
            Ok(email) => email,
            Err(_) => return Ok(empty),
        };
        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => return Ok(empty),
        };

        let reset_token = self.tokens.generate_token();
        let reset_token_hash = self.hasher.generate_hash(&reset_token).await?;
        let expires_at = Utc::now() + Duration::minutes(self.reset_token_ttl_minutes as i64);

        // Attach to the newest session if one exists; otherwise open a
        // reset-only session whose access token is born expired and can
        // never authenticate.
        let existing = self.sessions.find_by_user(user.id()).await?.pop();
        let session_id = match existing {
            Some(session) => {
                let session = session.with_reset_token(reset_token_hash, expires_at)?;
                self.sessions.update(&session).await?;
                session.id().clone()
            }
            None => {
                let placeholder = self.hasher.generate_hash(&self.tokens.generate_token()).await?;
                let session = UserSession::create(user.id().clone(), placeholder, Utc::now())?
                    .with_reset_token(reset_token_hash, expires_at)?;
                self.sessions.save(&session).await?;
                session.id().clone()
            }
        };

        Ok(RequestPasswordResetResponse {
            session_id: Some(session_id.to_string()),
            reset_token: Some(reset_token),
            expires_at: Some(expires_at),
        })
    }
}
