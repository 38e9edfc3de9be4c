pub mod access_log;
pub mod pretty;
pub mod quit_sig;
pub mod remote_addr;
pub mod rest;
pub mod security_headers;
pub mod tracing_output;
