use std::sync::Arc;

/// Host-wide settings shared by the request layers.
#[derive(Clone, Default)]
pub struct HostState {
    remote_header: Option<Arc<str>>,
}

impl HostState {
    pub fn new(remote_header: Option<String>) -> Self {
        Self {
            remote_header: remote_header.map(Arc::from),
        }
    }

    /// Header carrying the client address when running behind a proxy.
    pub fn remote_header(&self) -> Option<&str> {
        self.remote_header.as_deref()
    }
}
