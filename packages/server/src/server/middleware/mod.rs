// HTTP middleware
pub mod jwt_auth;
pub mod rate_limit;
pub mod security_headers;

pub use jwt_auth::*;
pub use rate_limit::*;
pub use security_headers::*;
