use axum::Extension;
use edge_headers::{EdgeEvent, EdgeResponse, handler};
use tracing::{info, instrument};

use crate::scaffold::{
    access_log::AccessLogId,
    pretty::Pretty,
    rest::{RestJson, RestResponse, RestStatus},
};

/// Run the edge response handler on a posted event.
#[instrument("invoke", skip_all)]
pub async fn invoke(
    Extension(access_id): Extension<AccessLogId>,
    RestJson(event): RestJson<EdgeEvent>,
) -> RestResponse<EdgeResponse> {
    match handler(event).await {
        Ok(response) => {
            info!(headers = response.headers.len(), "event handled");
            RestResponse::ok(access_id.uuid(), response)
        }
        Err(err) => {
            info!(err = %Pretty(err), "reject event");
            RestResponse::fail(RestStatus::BadRequest, access_id.uuid())
        }
    }
}
