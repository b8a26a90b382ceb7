//! 签名 token 服务
//! Signed, expiring tokens carrying a user id

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// API token 的 audience
pub const API_AUDIENCE: &str = "api";
/// 会话 cookie 的 audience
pub const SESSION_AUDIENCE: &str = "session";

/// token 载荷
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub id: i64,
    pub iat: u64,
    pub exp: u64,
    pub aud: String,
}

/// token 校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// 签名正确但已过期
    #[error("token 已过期")]
    Expired,
    #[error("token 签名无效")]
    InvalidSignature,
    #[error("token 格式错误")]
    Malformed,
    #[error("token 生成失败: {0}")]
    Encode(String),
}

/// token 签发与校验
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    audience: String,
    default_ttl: u64,
}

impl TokenService {
    pub fn new(secret: &str, audience: &str, default_ttl: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "aud"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            audience: audience.to_string(),
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// 使用默认有效期签发
    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        self.generate(user_id, self.default_ttl)
    }

    /// 签发有效期为 `ttl_seconds` 的 token
    pub fn generate(&self, user_id: i64, ttl_seconds: u64) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now().timestamp().max(0) as u64, ttl_seconds)
    }

    fn issue_at(&self, user_id: i64, issued_at: u64, ttl_seconds: u64) -> Result<String, TokenError> {
        let claims = Claims {
            id: user_id,
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_seconds),
            aud: self.audience.clone(),
        };
        debug!(user_id, aud = %self.audience, ttl_seconds, "签发 token");

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// 校验 token，返回其中的用户 id
    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.id)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}
