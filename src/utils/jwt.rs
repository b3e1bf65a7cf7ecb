use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ADMIN_ROLES: [&str; 2] = ["admin", "superadmin"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // admin id
    pub email: String,
    pub role: String, // "admin" or "superadmin"
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        ADMIN_ROLES.contains(&self.role.as_str())
    }
}

/// Verifies admin tokens issued by the auth service sharing `secret`
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, token_expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expires_in,
        }
    }

    pub fn issue_admin_token(&self, admin_id: &str, email: &str, role: &str) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.token_expires_in);

        let claims = Claims {
            sub: admin_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }

    /// Valid signature, unexpired, and an admin role
    pub fn verify_admin_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.verify_token(token)?;

        if !claims.is_admin() {
            return Err(AppError::Forbidden);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_token_round_trip() {
        let jwt = JwtService::new("test-secret", 3600);
        let token = jwt.issue_admin_token("1", "admin@example.com", "superadmin").unwrap();
        let claims = jwt.verify_admin_token(&token).unwrap();
        assert_eq!(claims.email, "admin@example.com");
        assert!(claims.is_admin());
    }

    #[test]
    fn test_non_admin_role_rejected() {
        let jwt = JwtService::new("test-secret", 3600);
        let token = jwt.issue_admin_token("2", "user@example.com", "customer").unwrap();
        assert!(matches!(jwt.verify_admin_token(&token), Err(AppError::Forbidden)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtService::new("secret-a", 3600);
        let verifier = JwtService::new("secret-b", 3600);
        let token = issuer.issue_admin_token("1", "admin@example.com", "admin").unwrap();
        assert!(matches!(verifier.verify_token(&token), Err(AppError::JwtError(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        // default validation leeway is 60s
        let jwt = JwtService::new("test-secret", -120);
        let token = jwt.issue_admin_token("1", "admin@example.com", "admin").unwrap();
        assert!(jwt.verify_token(&token).is_err());
    }
}
