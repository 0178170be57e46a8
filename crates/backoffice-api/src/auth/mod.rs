//! Session handling
//!
//! Sessions are issued by the external auth provider as HS256 JWTs signed with
//! the shared `AUTH_SECRET`. This service only verifies them.

pub mod middleware;
pub mod session;

pub use middleware::session_middleware;
pub use session::{CallerIdentity, MaybeCaller, SessionClaims, SessionVerifier};
