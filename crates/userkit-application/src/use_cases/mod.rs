//! Use cases
//!
//! One struct per operation, each with a single async `execute` entry
//! point. `execute` is total: every error becomes a
//! [`UseCaseResult::Failure`](crate::result::UseCaseResult) and
//! internal faults are logged with their cause but surfaced to the
//! caller only as `UNEXPECTED_ERROR`.

mod create_user;
mod delete_user;
mod get_current_user;
mod get_user;
mod list_users;
mod request_password_reset;
mod reset_password;
mod sign_in;
mod sign_out;
mod update_user;
mod validate_session;

pub use create_user::CreateUserUseCase;
pub use delete_user::DeleteUserUseCase;
pub use get_current_user::GetCurrentUserUseCase;
pub use get_user::GetUserUseCase;
pub use list_users::ListUsersUseCase;
pub use request_password_reset::RequestPasswordResetUseCase;
pub use reset_password::ResetPasswordUseCase;
pub use sign_in::SignInUseCase;
pub use sign_out::SignOutUseCase;
pub use update_user::UpdateUserUseCase;
pub use validate_session::ValidateSessionUseCase;

use tracing::{error, warn};
use userkit_domain::errors::DomainError;

use crate::result::UseCaseResult;

/// Log a domain error and convert it into a failure outcome
///
/// Every record carries the use case name, a correlation subject (the
/// identifier or address the request targeted), and the error code.
/// Internal faults are logged at error level with their full reason;
/// business failures at warn level.
fn fail<T>(use_case: &'static str, subject: &str, err: DomainError) -> UseCaseResult<T> {
    if err.is_internal() {
        error!(use_case, subject, code = err.code(), reason = %err, "use case failed");
    } else {
        warn!(use_case, subject, code = err.code(), "use case rejected");
    }
    UseCaseResult::from_domain_error(&err)
}
