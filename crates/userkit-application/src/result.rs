//! Use case outcome type
//!
//! The tagged union returned by every use case. Exactly one variant is
//! ever constructed and values are immutable after construction.
//! Failures carry a human-readable message for logs and a stable
//! upper-snake code for programmatic branching; callers must branch on
//! the code, never on the message.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use userkit_domain::errors::DomainError;

/// Code used when an internal fault is surfaced to the caller
pub const UNEXPECTED_ERROR: &str = "UNEXPECTED_ERROR";

/// Message used when an internal fault is surfaced to the caller
const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Failure payload of a use case outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureDetail {
    pub message: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, serde_json::Value>>,
}

/// Outcome of a use case invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UseCaseResult<T> {
    Success { data: T },
    Failure { error: FailureDetail },
}

impl<T> UseCaseResult<T> {
    /// Build a success carrying `data`
    pub fn success(data: T) -> Self {
        UseCaseResult::Success { data }
    }

    /// Build a failure from a message and a stable code
    pub fn failure(message: impl Into<String>, code: impl Into<String>) -> Self {
        UseCaseResult::Failure {
            error: FailureDetail {
                message: message.into(),
                code: code.into(),
                details: None,
            },
        }
    }

    /// Build a failure carrying structured details
    pub fn failure_with_details(
        message: impl Into<String>,
        code: impl Into<String>,
        details: BTreeMap<String, serde_json::Value>,
    ) -> Self {
        UseCaseResult::Failure {
            error: FailureDetail {
                message: message.into(),
                code: code.into(),
                details: Some(details),
            },
        }
    }

    /// Boundary conversion from a domain error
    ///
    /// Business errors keep their message and code. Internal faults are
    /// replaced by a generic message and [`UNEXPECTED_ERROR`] so no
    /// infrastructure detail leaks to the caller.
    pub fn from_domain_error(error: &DomainError) -> Self {
        if error.is_internal() {
            Self::failure(UNEXPECTED_ERROR_MESSAGE, UNEXPECTED_ERROR)
        } else {
            Self::failure(error.to_string(), error.code())
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UseCaseResult::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, UseCaseResult::Failure { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            UseCaseResult::Success { data } => Some(data),
            UseCaseResult::Failure { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            UseCaseResult::Success { data } => Some(data),
            UseCaseResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&FailureDetail> {
        match self {
            UseCaseResult::Success { .. } => None,
            UseCaseResult::Failure { error } => Some(error),
        }
    }

    /// Map the success data, leaving failures untouched
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> UseCaseResult<U> {
        match self {
            UseCaseResult::Success { data } => UseCaseResult::Success { data: f(data) },
            UseCaseResult::Failure { error } => UseCaseResult::Failure { error },
        }
    }
}

impl<T> From<Result<T, DomainError>> for UseCaseResult<T> {
    fn from(result: Result<T, DomainError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::from_domain_error(&error),
        }
    }
}

/// Fold a list of outcomes into one
///
/// Fail-fast: the first failure, left to right, is returned unchanged.
/// Otherwise the success data values are collected in input order.
pub fn combine_results<T>(results: Vec<UseCaseResult<T>>) -> UseCaseResult<Vec<T>> {
    let mut data = Vec::with_capacity(results.len());
    for result in results {
        match result {
            UseCaseResult::Success { data: value } => data.push(value),
            UseCaseResult::Failure { error } => return UseCaseResult::Failure { error },
        }
    }
    UseCaseResult::success(data)
}

/// Combine two outcomes of different types, fail-fast left to right
pub fn combine2<A, B>(a: UseCaseResult<A>, b: UseCaseResult<B>) -> UseCaseResult<(A, B)> {
    match (a, b) {
        (UseCaseResult::Success { data: a }, UseCaseResult::Success { data: b }) => {
            UseCaseResult::success((a, b))
        }
        (UseCaseResult::Failure { error }, _) => UseCaseResult::Failure { error },
        (_, UseCaseResult::Failure { error }) => UseCaseResult::Failure { error },
    }
}

/// Combine three outcomes of different types, fail-fast left to right
pub fn combine3<A, B, C>(
    a: UseCaseResult<A>,
    b: UseCaseResult<B>,
    c: UseCaseResult<C>,
) -> UseCaseResult<(A, B, C)> {
    combine2(combine2(a, b), c).map(|((a, b), c)| (a, b, c))
}
