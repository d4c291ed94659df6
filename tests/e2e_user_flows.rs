//! End-to-end account lifecycle flows
//!
//! Each test builds a fresh container stack and drives the use cases
//! the way a host application would, asserting only on the public
//! request/response surface.

use userkit_application::dto::{
    CreateUserRequest, DeleteUserRequest, GetUserRequest, RequestPasswordResetRequest,
    ResetPasswordRequest, SignInRequest, UpdateUserRequest, ValidateSessionRequest,
};
use userkit_application::use_cases::{
    CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase,
    RequestPasswordResetUseCase, ResetPasswordUseCase, SignInUseCase, UpdateUserUseCase,
    ValidateSessionUseCase,
};
use userkit_config::types::AppConfig;
use userkit_di::tiers::initialize;
use userkit_di::Container;

use std::sync::Arc;

const PASSWORD: &str = "original pass 1";

async fn sign_up(app: &Arc<Container>, email: &str, name: &str) -> String {
    app.resolve::<CreateUserUseCase>()
        .unwrap()
        .execute(CreateUserRequest {
            email: email.to_string(),
            name: name.to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .into_data()
        .unwrap()
        .id
}

#[tokio::test]
async fn full_account_lifecycle() {
    let app = initialize(AppConfig::default()).unwrap();
    let user_id = sign_up(&app, "lifecycle@example.com", "Lifecycle").await;

    // sign in and validate the issued session
    let signed_in = app
        .resolve::<SignInUseCase>()
        .unwrap()
        .execute(SignInRequest {
            email: "lifecycle@example.com".to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .into_data()
        .unwrap();
    let validated = app
        .resolve::<ValidateSessionUseCase>()
        .unwrap()
        .execute(ValidateSessionRequest {
            session_id: signed_in.session_id.clone(),
            access_token: signed_in.access_token.clone(),
        })
        .await
        .into_data()
        .unwrap();
    assert_eq!(validated.user_id, user_id);

    // update the profile
    let updated = app
        .resolve::<UpdateUserUseCase>()
        .unwrap()
        .execute(UpdateUserRequest {
            user_id: user_id.clone(),
            name: Some("Renamed".to_string()),
            email: None,
        })
        .await
        .into_data()
        .unwrap();
    assert_eq!(updated.name, "Renamed");

    // delete the account; the session dies with it
    let deleted = app
        .resolve::<DeleteUserUseCase>()
        .unwrap()
        .execute(DeleteUserRequest {
            user_id: user_id.clone(),
        })
        .await;
    assert!(deleted.is_success());

    let gone = app
        .resolve::<GetUserUseCase>()
        .unwrap()
        .execute(GetUserRequest { user_id })
        .await;
    assert_eq!(gone.error().unwrap().code, "USER_NOT_FOUND");

    let stale = app
        .resolve::<ValidateSessionUseCase>()
        .unwrap()
        .execute(ValidateSessionRequest {
            session_id: signed_in.session_id,
            access_token: signed_in.access_token,
        })
        .await;
    assert_eq!(stale.error().unwrap().code, "AUTHENTICATION_FAILED");
}

#[tokio::test]
async fn password_reset_flow() {
    let app = initialize(AppConfig::default()).unwrap();
    sign_up(&app, "reset@example.com", "Resetter").await;

    let issued = app
        .resolve::<RequestPasswordResetUseCase>()
        .unwrap()
        .execute(RequestPasswordResetRequest {
            email: "reset@example.com".to_string(),
        })
        .await
        .into_data()
        .unwrap();
    let session_id = issued.session_id.unwrap();
    let reset_token = issued.reset_token.unwrap();

    let reset = app
        .resolve::<ResetPasswordUseCase>()
        .unwrap()
        .execute(ResetPasswordRequest {
            session_id,
            reset_token,
            new_password: "replacement pass 2".to_string(),
        })
        .await;
    assert!(reset.is_success());

    // the old password no longer signs in, the new one does
    let sign_in = app.resolve::<SignInUseCase>().unwrap();
    let old = sign_in
        .execute(SignInRequest {
            email: "reset@example.com".to_string(),
            password: PASSWORD.to_string(),
        })
        .await;
    assert_eq!(old.error().unwrap().code, "AUTHENTICATION_FAILED");

    let new = sign_in
        .execute(SignInRequest {
            email: "reset@example.com".to_string(),
            password: "replacement pass 2".to_string(),
        })
        .await;
    assert!(new.is_success());
}

#[tokio::test]
async fn reset_request_does_not_reveal_unknown_accounts() {
    let app = initialize(AppConfig::default()).unwrap();
    sign_up(&app, "known@example.com", "Known").await;

    let unknown = app
        .resolve::<RequestPasswordResetUseCase>()
        .unwrap()
        .execute(RequestPasswordResetRequest {
            email: "unknown@example.com".to_string(),
        })
        .await;
    assert!(unknown.is_success());
    assert!(unknown.into_data().unwrap().reset_token.is_none());
}

#[tokio::test]
async fn duplicate_sign_up_is_rejected_listing_stays_consistent() {
    let app = initialize(AppConfig::default()).unwrap();
    sign_up(&app, "solo@example.com", "Solo").await;

    let duplicate = app
        .resolve::<CreateUserUseCase>()
        .unwrap()
        .execute(CreateUserRequest {
            email: "SOLO@example.com".to_string(),
            name: "Imposter".to_string(),
            password: PASSWORD.to_string(),
        })
        .await;
    assert_eq!(duplicate.error().unwrap().code, "EMAIL_ALREADY_EXISTS");

    let listed = app
        .resolve::<ListUsersUseCase>()
        .unwrap()
        .execute()
        .await
        .into_data()
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].email, "solo@example.com");
}
