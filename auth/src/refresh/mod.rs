pub mod errors;
pub mod ports;
pub mod token;

pub use errors::RefreshTokenError;
pub use errors::StoreError;
pub use ports::RefreshTokenStore;
pub use token::RefreshToken;
pub use token::RefreshTokenRecord;
