//! Credential handling and token lifecycle for the chirpr API.
//!
//! Everything here is synchronous and side-effect free apart from drawing
//! randomness: hashing is CPU-bound, token validation is O(1), and nothing
//! touches the database. Refresh-token persistence belongs to the storage
//! crate; this crate only mints the opaque string.

mod bearer;
mod error;
mod password;
mod refresh;
mod token;

pub use bearer::bearer_token;
pub use error::{AuthError, Result};
pub use password::{hash_password, verify_password};
pub use refresh::make_refresh_token;
pub use token::{ACCESS_TOKEN_ISSUER, Claims, make_access_token, validate_access_token};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AuthError, Result, bearer_token, hash_password, make_access_token, make_refresh_token,
        validate_access_token, verify_password,
    };
}
