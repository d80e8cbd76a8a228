use anyhow::{Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use bruger_common::models::auth::Claims;
use jsonwebtoken::{errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};

/// Why a token was rejected. Handlers must collapse every variant into the
/// same 401 response; the distinction exists for logging and tests only.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token expired")]
    Expired,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("malformed token")]
    Malformed,
}

/// Hash a password using argon2id
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash. A hash that does not parse
/// counts as a mismatch, never an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Create an access token (JWT) for the given user
pub fn issue_access_token(
    user_id: i64,
    email: &str,
    jwt_secret: &str,
    ttl_minutes: i64,
) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat: now,
        exp: now + ttl_minutes * 60,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .context("Failed to create access token")
}

/// Validate an access token and return its claims. Expiry is checked
/// against the wall clock with no leeway.
pub fn verify_access_token(token: &str, jwt_secret: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::default();
    validation.leeway = 0;
    match jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Ok(data.claims),
        Err(e) => Err(match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::Malformed,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify_correct() {
        let password = "my-secure-password";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash));
    }

    #[test]
    fn test_password_verify_wrong() {
        let hash = hash_password("correct-password").unwrap();
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_password_different_salts() {
        let password = "same-password";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();
        assert_ne!(hash1, hash2);
        // Both still verify
        assert!(verify_password(password, &hash1));
        assert!(verify_password(password, &hash2));
    }

    #[test]
    fn test_password_verify_malformed_hash_is_false() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn test_jwt_create_and_validate() {
        let secret = "test-jwt-secret";
        let token = issue_access_token(123, "test@example.com", secret, 60).unwrap();
        let claims = verify_access_token(&token, secret).unwrap();
        assert_eq!(claims.sub, 123);
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_jwt_wrong_secret_fails() {
        let token = issue_access_token(123, "test@example.com", "secret-1", 60).unwrap();
        let result = verify_access_token(&token, "secret-2");
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_jwt_expired_fails() {
        let secret = "test-jwt-secret";
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 123,
            email: "test@example.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();
        let result = verify_access_token(&token, secret);
        assert!(matches!(result, Err(AuthError::Expired)));
    }

    #[test]
    fn test_jwt_garbage_is_malformed() {
        let result = verify_access_token("not-even-a-jwt", "secret");
        assert!(matches!(result, Err(AuthError::Malformed)));
    }

    #[test]
    fn test_jwt_tampered_payload_fails() {
        let secret = "test-jwt-secret";
        let token = issue_access_token(123, "test@example.com", secret, 60).unwrap();
        // Swap the payload segment for a different one; the signature no
        // longer matches
        let other = issue_access_token(456, "other@example.com", secret, 60).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);
        let result = verify_access_token(&tampered, secret);
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }
}
