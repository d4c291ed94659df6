//! Standard tier wiring
//!
//! Builds the four-tier container stack over the in-memory
//! infrastructure. Nothing happens at import time; hosts call
//! [`initialize`] explicitly and hold on to the returned application
//! tier. Hosts that bring their own infrastructure (a database-backed
//! repository, a real session layer) can register it on a tier before
//! the application factories first resolve.

use std::sync::Arc;

use tracing::info;
use userkit_application::use_cases::{
    CreateUserUseCase, DeleteUserUseCase, GetCurrentUserUseCase, GetUserUseCase, ListUsersUseCase,
    RequestPasswordResetUseCase, ResetPasswordUseCase, SignInUseCase, SignOutUseCase,
    UpdateUserUseCase, ValidateSessionUseCase,
};
use userkit_common::logging::{self, LogLevel, LogOptions};
use userkit_config::types::AppConfig;
use userkit_domain::ports::{AuthProvider, HashService, TokenSource};
use userkit_domain::repositories::{SessionRepository, UnitOfWork, UserRepository};
use userkit_domain::services::PasswordPolicy;
use userkit_persistence::auth::StaticAuthProvider;
use userkit_persistence::memory::{
    InMemorySessionRepository, InMemoryUnitOfWork, InMemoryUserRepository,
};
use userkit_security::hash::Argon2HashService;
use userkit_security::token::RandomTokenSource;

use crate::{Container, ContainerError, DiResult};

/// Build the core → infrastructure → domain → application tier stack
///
/// Returns the application tier; outer tiers stay reachable through the
/// parent chain. Use cases are registered as lazy factories, so an
/// unused use case never constructs its dependency graph.
pub fn initialize(config: AppConfig) -> DiResult<Arc<Container>> {
    let core = build_core(config)?;
    let infrastructure = build_infrastructure(&core);
    let domain = build_domain(&infrastructure)?;
    let application = build_application(&domain);
    info!(tier = application.name(), "container stack initialized");
    Ok(application)
}

fn build_core(config: AppConfig) -> DiResult<Arc<Container>> {
    logging::init(LogOptions {
        print: config.logging.print,
        level: LogLevel::parse(&config.logging.level),
    })
    .map_err(|err| ContainerError::FactoryFailed {
        service_type: "logging".to_string(),
        message: err.to_string(),
    })?;

    let core = Container::root("core");
    core.register_instance(Arc::new(config));
    Ok(core)
}

fn build_infrastructure(core: &Arc<Container>) -> Arc<Container> {
    let infrastructure = core.child("infrastructure");

    let hasher = Arc::new(Argon2HashService::new());
    infrastructure.register_trait::<dyn HashService>(hasher);
    infrastructure.register_trait::<dyn TokenSource>(Arc::new(RandomTokenSource::new()));
    infrastructure.register_trait::<dyn UserRepository>(Arc::new(InMemoryUserRepository::new()));
    infrastructure
        .register_trait::<dyn SessionRepository>(Arc::new(InMemorySessionRepository::new()));
    infrastructure.register_trait::<dyn UnitOfWork>(Arc::new(InMemoryUnitOfWork::new()));

    // Registered both concretely (so hosts can install the current
    // user) and as the port the use cases consume.
    let auth = Arc::new(StaticAuthProvider::new());
    infrastructure.register_instance(auth.clone());
    infrastructure.register_trait::<dyn AuthProvider>(auth);

    infrastructure
}

fn build_domain(infrastructure: &Arc<Container>) -> DiResult<Arc<Container>> {
    let domain = infrastructure.child("domain");
    let config = domain.resolve::<AppConfig>()?;
    domain.register_instance(Arc::new(PasswordPolicy::new(config.auth.min_password_length)));
    Ok(domain)
}

fn build_application(domain: &Arc<Container>) -> Arc<Container> {
    let application = domain.child("application");

    application.register(|c| {
        Ok(Arc::new(CreateUserUseCase::new(
            c.resolve_trait::<dyn UserRepository>()?,
            c.resolve_trait::<dyn HashService>()?,
            (*c.resolve::<PasswordPolicy>()?).clone(),
        )))
    });
    application.register(|c| {
        Ok(Arc::new(UpdateUserUseCase::new(
            c.resolve_trait::<dyn UserRepository>()?,
        )))
    });
    application.register(|c| {
        Ok(Arc::new(DeleteUserUseCase::new(
            c.resolve_trait::<dyn UserRepository>()?,
            c.resolve_trait::<dyn SessionRepository>()?,
            c.resolve_trait::<dyn UnitOfWork>()?,
        )))
    });
    application.register(|c| {
        Ok(Arc::new(GetUserUseCase::new(
            c.resolve_trait::<dyn UserRepository>()?,
        )))
    });
    application.register(|c| {
        Ok(Arc::new(ListUsersUseCase::new(
            c.resolve_trait::<dyn UserRepository>()?,
        )))
    });
    application.register(|c| {
        let config = c.resolve::<AppConfig>()?;
        Ok(Arc::new(SignInUseCase::new(
            c.resolve_trait::<dyn UserRepository>()?,
            c.resolve_trait::<dyn SessionRepository>()?,
            c.resolve_trait::<dyn HashService>()?,
            c.resolve_trait::<dyn TokenSource>()?,
            config.auth.access_token_ttl_minutes,
        )))
    });
    application.register(|c| {
        Ok(Arc::new(SignOutUseCase::new(
            c.resolve_trait::<dyn SessionRepository>()?,
        )))
    });
    application.register(|c| {
        Ok(Arc::new(GetCurrentUserUseCase::new(
            c.resolve_trait::<dyn AuthProvider>()?,
        )))
    });
    application.register(|c| {
        Ok(Arc::new(ValidateSessionUseCase::new(
            c.resolve_trait::<dyn SessionRepository>()?,
            c.resolve_trait::<dyn HashService>()?,
        )))
    });
    application.register(|c| {
        let config = c.resolve::<AppConfig>()?;
        Ok(Arc::new(RequestPasswordResetUseCase::new(
            c.resolve_trait::<dyn UserRepository>()?,
            c.resolve_trait::<dyn SessionRepository>()?,
            c.resolve_trait::<dyn HashService>()?,
            c.resolve_trait::<dyn TokenSource>()?,
            config.auth.reset_token_ttl_minutes,
        )))
    });
    application.register(|c| {
        Ok(Arc::new(ResetPasswordUseCase::new(
            c.resolve_trait::<dyn UserRepository>()?,
            c.resolve_trait::<dyn SessionRepository>()?,
            c.resolve_trait::<dyn UnitOfWork>()?,
            c.resolve_trait::<dyn HashService>()?,
            (*c.resolve::<PasswordPolicy>()?).clone(),
        )))
    });

    application
}
