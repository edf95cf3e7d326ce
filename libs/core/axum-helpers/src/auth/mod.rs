//! Stateless JWT authentication.
//!
//! Customer sessions are plain HS256 JWTs with a 30-day lifetime. There is no
//! server-side session store: possession of a token with a valid signature and
//! unexpired `exp` claim is the whole session.

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{AuthError, JwtAuth, JwtClaims, RefreshClaims, TOKEN_TTL_DAYS};
pub use middleware::jwt_auth_middleware;
