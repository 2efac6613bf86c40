pub mod context;
pub mod jwt;

pub use context::AuthContext;
pub use jwt::{mint_access_token, verify_access_token, Claims};
