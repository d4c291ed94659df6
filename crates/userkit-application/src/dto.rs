//! Request and response types for the use cases
//!
//! Presentation-safe shapes: identifiers are plain strings, password
//! hashes never appear.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use userkit_domain::entities::{User, UserSession};
use userkit_domain::ports::AuthenticatedUser;

/// User as exposed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserDto {
    pub fn from_domain(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Session as exposed to callers (no token hashes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDto {
    pub id: String,
    pub user_id: String,
    pub access_token_expire_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl SessionDto {
    pub fn from_domain(session: &UserSession) -> Self {
        Self {
            id: session.id().to_string(),
            user_id: session.user_id().to_string(),
            access_token_expire_at: session.access_token_expire_at(),
            created_at: session.created_at(),
        }
    }
}

/// The user attached to the current request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUserDto {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl CurrentUserDto {
    pub fn from_domain(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.to_string(),
            name: user.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub user_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Successful sign-in: the raw access token is returned exactly once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    pub user: UserDto,
    pub session_id: String,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignOutRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateSessionRequest {
    pub session_id: String,
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateSessionResponse {
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestPasswordResetRequest {
    pub email: String,
}

/// Reset issuance: all fields absent when the email is not registered,
/// so callers cannot tell registered addresses from unregistered ones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestPasswordResetResponse {
    pub session_id: Option<String>,
    pub reset_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub session_id: String,
    pub reset_token: String,
    pub new_password: String,
}
