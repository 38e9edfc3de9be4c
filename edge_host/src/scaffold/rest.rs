use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::scaffold::{access_log::AccessLogId, pretty::Pretty};

#[derive(Serialize, Copy, Clone, Eq, PartialEq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum RestStatus {
    Ok,
    BadRequest,
}

pub struct RestResponse<B = ()> {
    status: RestStatus,
    access_id: Uuid,
    body: Option<B>,
}

impl<B> RestResponse<B> {
    pub fn ok(access_id: Uuid, body: B) -> Self {
        Self {
            status: RestStatus::Ok,
            access_id,
            body: Some(body),
        }
    }

    pub fn fail(status: RestStatus, access_id: Uuid) -> Self {
        debug_assert_ne!(status, RestStatus::Ok);

        Self {
            status,
            access_id,
            body: None,
        }
    }
}

impl<B> IntoResponse for RestResponse<B>
where
    B: Serialize,
{
    fn into_response(self) -> Response {
        let Self {
            status,
            access_id,
            body,
        } = self;

        let json_body = match body {
            Some(body) => json!({
                "status": status,
                "access_id": access_id,
                "body": body,
            }),
            None => json!({
                "status": status,
                "access_id": access_id,
            }),
        };

        (StatusCode::OK, Json(json_body)).into_response()
    }
}

/// Json body extractor that rejects with a `bad_request` envelope.
#[derive(Clone, Debug)]
pub struct RestJson<T>(pub T);

impl<T, S> FromRequest<S> for RestJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RestResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let access_id = req
            .extensions()
            .get::<AccessLogId>()
            .map(|v| v.uuid())
            .unwrap_or_else(Uuid::nil);

        match Json::<T>::from_request(req, state).await {
            Ok(Json(v)) => Ok(RestJson(v)),
            Err(err) => {
                info!(err=?Pretty(err), "parse json error");
                Err(RestResponse::fail(RestStatus::BadRequest, access_id))
            }
        }
    }
}
