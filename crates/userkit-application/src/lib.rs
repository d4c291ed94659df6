//! userkit application layer
//!
//! Use cases orchestrating domain entities and infrastructure ports.
//! Every use case exposes a single `execute` entry point that is total:
//! it returns a [`result::UseCaseResult`] for both outcomes and never
//! lets an error escape. Domain validation raises
//! [`userkit_domain::DomainError`] eagerly; the use-case boundary
//! converts it into a failure value carrying the same message and code.

pub mod dto;
pub mod result;
pub mod use_cases;

pub use dto::*;
pub use result::{combine2, combine3, combine_results, FailureDetail, UseCaseResult};
pub use use_cases::*;
