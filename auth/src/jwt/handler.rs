use std::path::Path;

use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;
use super::errors::KeyError;
use super::keys;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type so the gateway can define its own payload.
/// Tokens are signed with an RSA private key (RS256) and verified with the
/// matching public key. Any other algorithm named in a token header is
/// rejected, as is a token without an `exp` claim.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a handler from PEM encoded key material.
    ///
    /// # Arguments
    /// * `private_pem` - RSA private key (PKCS#1 or PKCS#8)
    /// * `public_pem` - Matching RSA public key
    ///
    /// # Errors
    /// * `Malformed` - Either key is not a PEM encoded RSA key
    pub fn from_rsa_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, KeyError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem).map_err(|e| KeyError::Malformed {
            path: "<memory>".into(),
            reason: e.to_string(),
        })?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem).map_err(|e| KeyError::Malformed {
            path: "<memory>".into(),
            reason: e.to_string(),
        })?;

        Ok(Self::from_keys(encoding_key, decoding_key))
    }

    /// Create a handler from PEM files on disk.
    ///
    /// # Errors
    /// * `Unreadable` - A key file is missing or cannot be read
    /// * `Malformed` - A key file does not hold a PEM encoded RSA key
    pub fn from_rsa_pem_files(
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
    ) -> Result<Self, KeyError> {
        let encoding_key = keys::load_signing_key(private_key_path)?;
        let decoding_key = keys::load_verification_key(public_key_path)?;

        Ok(Self::from_keys(encoding_key, decoding_key))
    }

    fn from_keys(encoding_key: EncodingKey, decoding_key: DecodingKey) -> Self {
        Self {
            encoding_key,
            decoding_key,
            algorithm: Algorithm::RS256,
        }
    }

    /// Encode claims into a signed JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT.
    ///
    /// Expiry is checked without leeway: a token is rejected the second its
    /// `exp` has passed.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidAlgorithm` - Header names an algorithm other than RS256
    /// * `InvalidSignature` - Signature does not match the public key
    /// * `InvalidToken` - Token is malformed or misses required claims
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidAlgorithm => JwtError::InvalidAlgorithm,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
