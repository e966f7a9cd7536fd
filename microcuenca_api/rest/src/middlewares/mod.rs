pub mod client_ip;
pub mod cors;
pub mod error_details;
pub mod panic_handler;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod trace;
