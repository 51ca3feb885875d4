use auth::Claims;
use auth::JwtError;
use auth::JwtHandler;

use crate::authentication::errors::TokenError;
use crate::authentication::ports::TokenSigner;

impl TokenSigner for JwtHandler {
    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        self.encode(claims).map_err(TokenError::from)
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode(token).map_err(TokenError::from)
    }
}

impl From<JwtError> for TokenError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingFailed(msg) => TokenError::SigningFailed(msg),
            JwtError::TokenExpired => TokenError::Expired,
            JwtError::InvalidAlgorithm | JwtError::InvalidSignature | JwtError::InvalidToken(_) => {
                TokenError::Invalid(err.to_string())
            }
        }
    }
}
