//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use purchase_core::config::AuthConfig;
use purchase_core::error::AppError;

use super::claims::Claims;

/// Verifies bearer tokens and yields their subject.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;
        // `exp` is checked when present but not demanded.
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify `token` and return its subject.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        let claims = self.decode_token(token)?;
        if claims.sub.is_empty() {
            return Err(AppError::unauthorized("empty claims"));
        }
        Ok(claims.sub)
    }

    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("token expired")
                    }
                    _ => {
                        tracing::debug!(error = %e, "Rejected bearer token");
                        AppError::unauthorized("invalid token")
                    }
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use purchase_core::ErrorKind;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            jwt_ttl_minutes: 10,
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let cfg = config("signing-key");
        let token = JwtEncoder::new(&cfg).issue("user-1").unwrap();
        assert_eq!(JwtDecoder::new(&cfg).verify(&token).unwrap(), "user-1");
    }

    #[test]
    fn test_token_without_exp_is_accepted() {
        let cfg = config("signing-key");
        let token = JwtEncoder::new(&cfg)
            .sign(&Claims {
                sub: "user-2".to_string(),
                iat: None,
                exp: None,
            })
            .unwrap();
        assert_eq!(JwtDecoder::new(&cfg).verify(&token).unwrap(), "user-2");
    }

    #[test]
    fn test_expired_token() {
        let cfg = config("signing-key");
        let token = JwtEncoder::new(&cfg)
            .sign(&Claims {
                sub: "user-3".to_string(),
                iat: None,
                exp: Some(Utc::now().timestamp() - 3600),
            })
            .unwrap();
        let err = JwtDecoder::new(&cfg).verify(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message, "token expired");
    }

    #[test]
    fn test_wrong_secret() {
        let token = JwtEncoder::new(&config("one")).issue("user-4").unwrap();
        let err = JwtDecoder::new(&config("two")).verify(&token).unwrap_err();
        assert_eq!(err.message, "invalid token");
    }

    #[test]
    fn test_garbage() {
        let err = JwtDecoder::new(&config("k")).verify("not.a.jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_empty_subject() {
        let cfg = config("signing-key");
        let token = JwtEncoder::new(&cfg)
            .sign(&Claims {
                sub: String::new(),
                iat: None,
                exp: None,
            })
            .unwrap();
        let err = JwtDecoder::new(&cfg).verify(&token).unwrap_err();
        assert_eq!(err.message, "empty claims");
    }
}
