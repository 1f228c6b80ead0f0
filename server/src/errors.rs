//! Error handling: how errors are mapped to problem responses.
//!
//! Each error type declares `(kind, title, status)` triples next to its
//! definition; the declarations are collected into one table, built on first
//! use and immutable after. [`respond`] looks the kind up in that table and
//! falls through to a generic 500 problem for kinds with no declaration, so
//! every escaped error yields a structured body.

use std::{collections::HashMap, sync::LazyLock};

use axum::{http::StatusCode, response::Response};

use crate::problem::Problem;

/// Title used for error kinds with no mapping declaration.
const FALLBACK_TITLE: &str = "a problem occurred";

/// Error that can escape request handling and be rendered as a problem.
pub trait ProblemSource: std::error::Error {
    /// Stable tag naming this error's kind. Drives the mapping lookup and
    /// the problem `type` urn, so it must not change between releases.
    fn kind(&self) -> &'static str;
}

/// Declared title and status for one error kind.
#[derive(Debug, Clone, Copy)]
pub struct Mapping {
    pub title: &'static str,
    pub status: StatusCode,
}

static MAPPINGS: LazyLock<HashMap<&'static str, Mapping>> = LazyLock::new(|| {
    let declarations = [crate::api::PROBLEM_MAPPINGS];

    let mut by_kind = HashMap::new();
    for (kind, mapping) in declarations.into_iter().flatten() {
        let clash = by_kind.insert(*kind, *mapping);
        debug_assert!(clash.is_none(), "duplicate mapping for kind {kind}");
    }
    by_kind
});

/// Looks up the declared mapping for an error kind, if any.
pub(crate) fn lookup(kind: &str) -> Option<Mapping> {
    MAPPINGS.get(kind).copied()
}

/// Renders an escaped error as a problem response.
///
/// Infallible by construction: both arms build a complete [`Problem`] and
/// the serialization path cannot fail for it.
pub fn respond(error: &dyn ProblemSource) -> Response {
    use axum::response::IntoResponse as _;

    let kind = error.kind();
    let problem = match lookup(kind) {
        Some(mapping) => Problem::new(kind, mapping.title, mapping.status, error.to_string()),
        None => Problem::new(
            kind,
            FALLBACK_TITLE,
            StatusCode::INTERNAL_SERVER_ERROR,
            error.to_string(),
        ),
    };
    problem.into_response()
}

/// DerivingVia for implementing IntoResponse for an error type based on its
/// problem mapping.
#[macro_export]
macro_rules! problem_response {
    ($name:ident) => {
        impl ::axum::response::IntoResponse for $name {
            fn into_response(self) -> ::axum::response::Response {
                $crate::errors::respond(&self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use axum::http::header::CONTENT_TYPE;
    use uuid::Uuid;

    use super::*;
    use crate::{api::ApiError, problem::APPLICATION_PROBLEM_JSON};

    #[derive(Debug, thiserror::Error)]
    #[error("spontaneous combustion")]
    struct Unheard;

    impl ProblemSource for Unheard {
        fn kind(&self) -> &'static str {
            "Unheard"
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn mapped_error_uses_its_declaration() {
        let guid = Uuid::new_v4();
        let error = ApiError::SipNotFound(guid);

        let response = respond(&error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            APPLICATION_PROBLEM_JSON
        );

        let body = body_json(response).await;
        assert_eq!(body["title"], "Not Found");
        assert_eq!(body["status"], 404);
        assert_eq!(body["detail"], format!("sip {guid} not found"));
        assert_eq!(body["type"], "urn:problem:SipNotFound");
    }

    #[tokio::test]
    async fn unmapped_error_falls_through_to_500() {
        let response = respond(&Unheard);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            APPLICATION_PROBLEM_JSON
        );

        let body = body_json(response).await;
        assert_eq!(body["title"], "a problem occurred");
        assert_eq!(body["status"], 500);
        assert_eq!(body["detail"], "spontaneous combustion");
        assert_eq!(body["type"], "urn:problem:Unheard");
    }

    #[test]
    fn lookup_misses_undeclared_kinds() {
        assert!(lookup("SipNotFound").is_some());
        assert!(lookup("Unheard").is_none());
    }
}
