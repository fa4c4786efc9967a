use rand_core::{OsRng, RngCore};

use crate::error::{AuthError, Result};

/// Generate an opaque refresh token: 256 bits from the OS CSPRNG, hex-encoded
/// to 64 lowercase characters.
///
/// The token carries no metadata; owner, expiry and revocation state live
/// only in the persisted record keyed by this string.
pub fn make_refresh_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))?;

    Ok(hex::encode(bytes))
}
