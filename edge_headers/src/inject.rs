use thiserror::Error;
use tracing::debug;

use crate::{
    constants::security_headers,
    model::{EdgeEvent, EdgeResponse, ResponseHeaders},
};

#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum InjectError {
    #[error("edge event carries no record")]
    NoRecord,
    #[error("edge record carries no response")]
    NoResponse,
}

/// Insert every security header, replacing whatever the map already holds
/// under the same name.
pub fn inject_headers(headers: &mut ResponseHeaders) {
    for (name, set) in security_headers() {
        headers.insert((*name).to_owned(), (*set).clone());
    }
}

pub fn inject(response: &mut EdgeResponse) -> &mut EdgeResponse {
    inject_headers(&mut response.headers);
    response
}

/// Amend `Records[0].cf.response` in place and hand it back.
pub fn inject_event(event: &mut EdgeEvent) -> Result<&mut EdgeResponse, InjectError> {
    let record = event.records.first_mut().ok_or(InjectError::NoRecord)?;
    let response = record.cf.response.as_mut().ok_or(InjectError::NoResponse)?;
    Ok(inject(response))
}

/// Edge function entry: takes the whole event and returns its amended
/// response.
pub async fn handler(event: EdgeEvent) -> Result<EdgeResponse, InjectError> {
    let record = event.records.into_iter().next().ok_or(InjectError::NoRecord)?;
    let mut response = record.cf.response.ok_or(InjectError::NoResponse)?;
    inject(&mut response);
    debug!(headers = response.headers.len(), "security headers injected");
    Ok(response)
}
