// Security helpers for keeping credential material out of logs
//
// Tokens and client secrets are masked before they reach any log line or
// error metadata returned to the calling agent.

pub mod redact;

pub use redact::{is_sensitive_key, mask_secret, redact_json};
