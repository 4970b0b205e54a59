//! HTTP protocol layer module
//!
//! Response builders plus content-type determination, decoupled from the
//! resolution logic.

pub mod mime;
pub mod response;
pub mod sniff;

// Re-export commonly used builders
pub use response::{build_content_response, build_not_found_response, build_redirect_response};
