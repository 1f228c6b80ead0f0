//! The sip API implementation.

use axum::{
    Json, extract,
    http::StatusCode,
    routing::put,
};
use chrono::Utc;
use storage::{SipEntity, SipFetchError, SipStore};
use uuid::Uuid;

use crate::{
    AppState,
    errors::{Mapping, ProblemSource},
    problem_response,
};

pub fn make_router() -> axum::Router<AppState> {
    axum::Router::new().route("/sips/{guid}", put(put_sip).get(get_sip))
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PutSipBody {
    title: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    source_uri: Option<String>,
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Sip {
    guid: Uuid,
    title: String,
    text: Option<String>,
    source_uri: Option<String>,
    stored_at: chrono::DateTime<Utc>,
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum ApiError {
    #[error("sip {0} not found")]
    SipNotFound(Uuid),
    #[error("invalid sip guid: {0:?}")]
    InvalidGuid(String),
    #[error("internal error: {0}")]
    InternalError(axum::BoxError),
}

impl ProblemSource for ApiError {
    fn kind(&self) -> &'static str {
        match self {
            Self::SipNotFound(_) => "SipNotFound",
            Self::InvalidGuid(_) => "InvalidGuid",
            Self::InternalError(_) => "InternalError",
        }
    }
}

/// Problem mappings declared for this module's error kinds.
///
/// `InternalError` has no entry: wrapped unknowns take the generic 500 arm.
pub(crate) const PROBLEM_MAPPINGS: &[(&str, Mapping)] = &[
    (
        "SipNotFound",
        Mapping {
            title: "Not Found",
            status: StatusCode::NOT_FOUND,
        },
    ),
    (
        "InvalidGuid",
        Mapping {
            title: "Bad Request",
            status: StatusCode::BAD_REQUEST,
        },
    ),
];

problem_response!(ApiError);

impl ApiError {
    pub(crate) fn internal(err: impl Into<axum::BoxError>) -> Self {
        Self::InternalError(err.into())
    }

    // This is not a From impl because only the handler knows which guid the
    // fetch was for.
    pub(crate) fn from_fetch_error(guid: Uuid, err: SipFetchError) -> ApiError {
        match err {
            SipFetchError::NotFound(_) => ApiError::SipNotFound(guid),
            e => Self::internal(e),
        }
    }
}

fn parse_guid(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidGuid(raw.to_owned()))
}

fn to_entity(guid: Uuid, body: PutSipBody) -> SipEntity {
    SipEntity {
        guid,
        title: body.title,
        text: body.text,
        source_uri: body.source_uri,
        stored_at: Utc::now(),
    }
}

fn to_sip(entity: SipEntity) -> Sip {
    Sip {
        guid: entity.guid,
        title: entity.title,
        text: entity.text,
        source_uri: entity.source_uri,
        stored_at: entity.stored_at,
    }
}

/// PUT `/v0/sips/:guid`
///
/// Stores the sip in the body under the guid in the path, replacing any
/// previous revision of it.
#[tracing::instrument(level = "info", skip(state, body))]
async fn put_sip(
    extract::State(state): extract::State<AppState>,
    extract::Path(guid): extract::Path<String>,
    Json(body): Json<PutSipBody>,
) -> Result<StatusCode, ApiError> {
    let guid = parse_guid(&guid)?;

    state
        .store
        .store(to_entity(guid, body))
        .await
        .map_err(ApiError::internal)?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET `/v0/sips/:guid`
#[tracing::instrument(level = "info", skip(state))]
async fn get_sip(
    extract::State(state): extract::State<AppState>,
    extract::Path(guid): extract::Path<String>,
) -> Result<Json<Sip>, ApiError> {
    let guid = parse_guid(&guid)?;

    let entity = state
        .store
        .fetch(guid)
        .await
        .map_err(|e| ApiError::from_fetch_error(guid, e))?;

    Ok(Json(to_sip(entity)))
}
