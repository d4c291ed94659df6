//! Password reset completion

use std::sync::Arc;

use tracing::info;
use userkit_domain::errors::{DomainError, DomainResult};
use userkit_domain::ports::HashService;
use userkit_domain::repositories::{SessionRepository, UnitOfWork, UserRepository};
use userkit_domain::services::PasswordPolicy;
use userkit_domain::value_objects::SessionId;

use crate::dto::ResetPasswordRequest;
use crate::result::UseCaseResult;
use crate::use_cases::fail;

const USE_CASE: &str = "reset_password";

/// Redeem a reset token and set a new password
///
/// A missing session, an absent reset token, and a hash mismatch all
/// report `INVALID_TOKEN`; a token that matched but ran out reports
/// `TOKEN_EXPIRED`. The password update and the token clearing happen
/// inside one transaction, and the token is single-use.
pub struct ResetPasswordUseCase {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
    hasher: Arc<dyn HashService>,
    policy: PasswordPolicy,
}

impl ResetPasswordUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
        hasher: Arc<dyn HashService>,
        policy: PasswordPolicy,
    ) -> Self {
        Self {
            users,
            sessions,
            unit_of_work,
            hasher,
            policy,
        }
    }

    pub async fn execute(&self, request: ResetPasswordRequest) -> UseCaseResult<()> {
        let subject = request.session_id.clone();
        match self.run(request).await {
            Ok(()) => {
                info!(use_case = USE_CASE, session_id = %subject, "password reset");
                UseCaseResult::success(())
            }
            Err(err) => fail(USE_CASE, &subject, err),
        }
    }

    async fn run(&self, request: ResetPasswordRequest) -> DomainResult<()> {
        let invalid = || DomainError::InvalidToken {
            reason: "reset token is not valid for this session".to_string(),
        };

        let id = SessionId::parse(&request.session_id).map_err(|_| invalid())?;
        let session = self.sessions.find_by_id(&id).await?.ok_or_else(invalid)?;
        let stored_hash = session.reset_token_hash().ok_or_else(invalid)?;

        let matches = self
            .hasher
            .compare_hash(&request.reset_token, stored_hash)
            .await?;
        if !matches {
            return Err(invalid());
        }
        if !session.is_reset_token_valid() {
            return Err(DomainError::TokenExpired);
        }

        self.policy.check(&request.new_password)?;
        let user = self
            .users
            .find_by_id(session.user_id())
            .await?
            .ok_or_else(|| DomainError::UserNotFound {
                id: session.user_id().to_string(),
            })?;

        let new_hash = self.hasher.generate_hash(&request.new_password).await?;
        let updated_user = user.with_password_hash(new_hash)?;
        let spent_session = session.without_reset_token();

        let tx = self.unit_of_work.begin().await?;
        let outcome = async {
            self.users.update(&updated_user).await?;
            self.sessions.update(&spent_session).await
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
