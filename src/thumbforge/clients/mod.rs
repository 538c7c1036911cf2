//! Concrete [`GenerativeBackend`](crate::backend::GenerativeBackend) transports.

pub mod gemini;
pub mod http_pool;
