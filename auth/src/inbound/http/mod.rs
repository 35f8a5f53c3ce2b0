pub mod middleware;

pub use middleware::require_api_key;
pub use middleware::require_user;
pub use middleware::AuthenticatedUser;
