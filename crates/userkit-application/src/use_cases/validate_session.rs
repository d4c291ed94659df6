//! Access token validation

use std::sync::Arc;

use tracing::info;
use userkit_domain::errors::{DomainError, DomainResult};
use userkit_domain::ports::HashService;
use userkit_domain::repositories::SessionRepository;
use userkit_domain::value_objects::SessionId;

use crate::dto::{ValidateSessionRequest, ValidateSessionResponse};
use crate::result::UseCaseResult;
use crate::use_cases::fail;

const USE_CASE: &str = "validate_session";

/// Check a presented access token against its session
///
/// An unknown session and a wrong token both fail with
/// `AUTHENTICATION_FAILED`; only a session whose token matched but has
/// run out reports `TOKEN_EXPIRED`.
pub struct ValidateSessionUseCase {
    sessions: Arc<dyn SessionRepository>,
    hasher: Arc<dyn HashService>,
}

impl ValidateSessionUseCase {
    pub fn new(sessions: Arc<dyn SessionRepository>, hasher: Arc<dyn HashService>) -> Self {
        Self { sessions, hasher }
    }

    pub async fn execute(
        &self,
        request: ValidateSessionRequest,
    ) -> UseCaseResult<ValidateSessionResponse> {
        let subject = request.session_id.clone();
        match self.run(request).await {
            Ok(response) => {
                info!(
                    use_case = USE_CASE,
                    session_id = %subject,
                    user_id = %response.user_id,
                    "session validated"
                );
                UseCaseResult::success(response)
            }
            Err(err) => fail(USE_CASE, &subject, err),
        }
    }

    async fn run(&self, request: ValidateSessionRequest) -> DomainResult<ValidateSessionResponse> {
        let id =
            SessionId::parse(&request.session_id).map_err(|_| DomainError::AuthenticationFailed)?;
        let session = self
            .sessions
            .find_by_id(&id)
            .await?
            .ok_or(DomainError::AuthenticationFailed)?;

        let matches = self
            .hasher
            .compare_hash(&request.access_token, session.access_token_hash())
            .await?;
        if !matches {
            return Err(DomainError::AuthenticationFailed);
        }
        if !session.is_access_token_valid() {
            return Err(DomainError::TokenExpired);
        }

        Ok(ValidateSessionResponse {
            user_id: session.user_id().to_string(),
            expires_at: session.access_token_expire_at(),
        })
    }
}
