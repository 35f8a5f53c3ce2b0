pub mod errors;
pub mod service;

pub use errors::SessionError;
pub use service::SessionService;
