//! PEM key material loading.
//!
//! Private keys may be PKCS#1 (`RSA PRIVATE KEY`) or PKCS#8 (`PRIVATE KEY`);
//! public keys may be PKCS#1 (`RSA PUBLIC KEY`) or SPKI (`PUBLIC KEY`).

use std::fs;
use std::path::Path;

use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::KeyError;

/// Load the RSA private key used to sign tokens.
///
/// # Errors
/// * `Unreadable` - File is missing or cannot be read
/// * `Malformed` - File is not a PEM encoded RSA private key
pub fn load_signing_key(path: impl AsRef<Path>) -> Result<EncodingKey, KeyError> {
    let path = path.as_ref();
    let pem = read_key_file(path)?;

    EncodingKey::from_rsa_pem(&pem).map_err(|e| KeyError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load the RSA public key used to verify tokens.
///
/// # Errors
/// * `Unreadable` - File is missing or cannot be read
/// * `Malformed` - File is not a PEM encoded RSA public key
pub fn load_verification_key(path: impl AsRef<Path>) -> Result<DecodingKey, KeyError> {
    let path = path.as_ref();
    let pem = read_key_file(path)?;

    DecodingKey::from_rsa_pem(&pem).map_err(|e| KeyError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn read_key_file(path: &Path) -> Result<Vec<u8>, KeyError> {
    fs::read(path).map_err(|source| KeyError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}
