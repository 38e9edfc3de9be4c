//! Security response headers for CDN edge response events.
//!
//! The header set is fixed: [`inject`] overwrites the same ten entries on
//! every response it sees, whatever the response already carries.

pub mod constants;
pub mod inject;
pub mod model;

pub use constants::security_headers;
pub use inject::{InjectError, handler, inject, inject_event, inject_headers};
pub use model::{CfPayload, EdgeEvent, EdgeRecord, EdgeResponse, HeaderEntry, HeaderSet, ResponseHeaders};
