//! The `application/problem+json` response body.
//!
//! Every error that escapes a handler is rendered as one of these; see
//! [`crate::errors`] for how an error kind picks its title and status.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Content type for problem responses.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

const URN_PROBLEM_PREFIX: &str = "urn:problem:";
const URN_PROBLEM_INSTANCE_PREFIX: &str = "urn:problem-instance:";

/// Longest `detail` we will serialize. Anything past this is cut; the rest
/// of the document is unaffected.
const MAX_DETAIL_LEN: usize = 4096;

/// Serializes the status as its bare numeric code.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde wants &T here
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

/// A problem document describing one failed request.
///
/// Immutable once constructed; [`Problem::new`] fills every field, including
/// a freshly generated `instance` token, so no two problems ever share one.
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    /// Identifies the problem class. Stable: derived from the error's kind
    /// tag alone, so the same kind always yields the same value.
    #[serde(rename = "type")]
    type_urn: String,
    /// Short human-readable summary of the problem class.
    title: String,
    /// Status code for this occurrence.
    #[serde(serialize_with = "serialize_status_code")]
    status: StatusCode,
    /// Explanation specific to this occurrence.
    detail: String,
    /// Identifies this occurrence. Random, never reused.
    instance: String,
}

impl Problem {
    pub fn new(
        kind: &str,
        title: impl Into<String>,
        status: StatusCode,
        detail: impl Into<String>,
    ) -> Problem {
        Problem {
            type_urn: format!("{URN_PROBLEM_PREFIX}{kind}"),
            title: title.into(),
            status,
            detail: truncate_detail(detail.into()),
            instance: format!("{URN_PROBLEM_INSTANCE_PREFIX}{}", Uuid::new_v4()),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Caps `detail` at [`MAX_DETAIL_LEN`] bytes without splitting a character.
fn truncate_detail(mut detail: String) -> String {
    if detail.len() > MAX_DETAIL_LEN {
        let mut end = MAX_DETAIL_LEN;
        while !detail.is_char_boundary(end) {
            end -= 1;
        }
        detail.truncate(end);
    }
    detail
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status;
        let mut response = Json(self).into_response();
        *response.status_mut() = status;
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        response
    }
}
