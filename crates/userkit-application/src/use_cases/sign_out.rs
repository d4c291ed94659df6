//! Sign-out

use std::sync::Arc;

use tracing::info;
use userkit_domain::errors::DomainResult;
use userkit_domain::repositories::SessionRepository;
use userkit_domain::value_objects::SessionId;

use crate::dto::SignOutRequest;
use crate::result::UseCaseResult;
use crate::use_cases::fail;

const USE_CASE: &str = "sign_out";

/// Terminate a session
///
/// Idempotent: signing out a session that no longer exists succeeds, so
/// double-submits and already-expired sessions behave the same as the
/// first sign-out.
pub struct SignOutUseCase {
    sessions: Arc<dyn SessionRepository>,
}

impl SignOutUseCase {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn execute(&self, request: SignOutRequest) -> UseCaseResult<()> {
        let subject = request.session_id.clone();
        match self.run(request).await {
            Ok(()) => {
                info!(use_case = USE_CASE, session_id = %subject, "signed out");
                UseCaseResult::success(())
            }
            Err(err) => fail(USE_CASE, &subject, err),
        }
    }

    async fn run(&self, request: SignOutRequest) -> DomainResult<()> {
        let id = SessionId::parse(&request.session_id)?;
        if self.sessions.find_by_id(&id).await?.is_some() {
            self.sessions.delete(&id).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use userkit_domain::entities::UserSession;
    use userkit_domain::value_objects::UserId;

    use super::*;
    use crate::use_cases::support::fixture;

    #[tokio::test]
    async fn deletes_existing_session() {
        let fx = fixture();
        let session = UserSession::create(
            UserId::generate(),
            "hash".to_string(),
            Utc::now() + Duration::minutes(5),
        )
        .unwrap();
        fx.sessions.save(&session).await.unwrap();

        let result = SignOutUseCase::new(fx.sessions.clone())
            .execute(SignOutRequest {
                session_id: session.id().to_string(),
            })
            .await;
        assert!(result.is_success());
        assert!(fx.sessions.find_by_id(session.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn absent_session_still_succeeds() {
        let fx = fixture();
        let result = SignOutUseCase::new(fx.sessions.clone())
            .execute(SignOutRequest {
                session_id: SessionId::generate().to_string(),
            })
            .await;
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn malformed_session_id_is_rejected() {
        let fx = fixture();
        let result = SignOutUseCase::new(fx.sessions.clone())
            .execute(SignOutRequest {
                session_id: "###".to_string(),
            })
            .await;
        assert_eq!(result.error().unwrap().code, "INVALID_ID");
    }
}
