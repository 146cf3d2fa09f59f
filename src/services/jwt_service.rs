use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::env;
use uuid::Uuid;

use crate::models::auth::{JwtClaims, UserInfo, UserRole};
use crate::utils::errors::AppError;

/// Configuración JWT
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub access_token_duration: Duration,
}

impl JwtConfig {
    pub fn new() -> Self {
        let secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-super-secret-jwt-key-change-in-production".to_string());
        let hours: i64 = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);

        Self {
            secret,
            algorithm: Algorithm::HS256,
            access_token_duration: Duration::hours(hours),
        }
    }
}

/// Servicio JWT
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new() -> Self {
        let config = JwtConfig::new();
        let encoding_key = EncodingKey::from_secret(config.secret.as_ref());
        let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Genera un token de acceso
    pub fn generate_access_token(&self, user_info: &UserInfo) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now + self.config.access_token_duration;

        let claims = JwtClaims {
            sub: user_info.id.to_string(),
            name: user_info.full_name.clone(),
            email: user_info.email.clone(),
            role: user_info.role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Jwt(format!("Error generating access token: {}", e)))
    }

    /// Expiración del token que se generaría ahora mismo
    pub fn expires_at(&self) -> chrono::DateTime<Utc> {
        Utc::now() + self.config.access_token_duration
    }

    /// Valida y decodifica un token
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AppError> {
        let validation = Validation::new(self.config.algorithm);

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Jwt(format!("Invalid token: {}", e)))
    }

    /// Obtiene información completa del usuario desde el token
    pub fn get_user_info(&self, token: &str) -> Result<UserInfo, AppError> {
        let claims = self.validate_token(token)?;

        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Jwt("Invalid subject in token".to_string()))?;
        let role = UserRole::from_str(&claims.role)
            .ok_or_else(|| AppError::Jwt("Invalid role in token".to_string()))?;

        Ok(UserInfo {
            id,
            full_name: claims.name,
            email: claims.email,
            role,
        })
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(role: UserRole) -> UserInfo {
        UserInfo {
            id: Uuid::new_v4(),
            full_name: "Marta Quispe".to_string(),
            email: "marta@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let jwt_service = JwtService::new();
        let user_info = test_user(UserRole::Conductor);

        let token = jwt_service.generate_access_token(&user_info).unwrap();
        assert!(!token.is_empty());

        let claims = jwt_service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user_info.id.to_string());
        assert_eq!(claims.role, "conductor");
    }

    #[test]
    fn test_get_user_info_round_trip() {
        let jwt_service = JwtService::new();
        let user_info = test_user(UserRole::Admin);

        let token = jwt_service.generate_access_token(&user_info).unwrap();
        let decoded = jwt_service.get_user_info(&token).unwrap();

        assert_eq!(decoded.id, user_info.id);
        assert_eq!(decoded.role, UserRole::Admin);
        assert_eq!(decoded.email, user_info.email);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let jwt_service = JwtService::new();
        assert!(jwt_service.validate_token("no-es-un-token").is_err());
    }
}
