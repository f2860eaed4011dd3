//! OAuth2 scope gate for the pet routes
//!
//! Protected requests must carry `Authorization: Bearer <jwt>` whose
//! whitespace separated `scope` claim contains every required scope.
//! Everything else, including all `/user` routes, passes through untouched.

use axum::{
    extract::{Request, State},
    http::{Method, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::config::{ApiSettings, AuthSettings};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct ScopeClaims {
    #[serde(default)]
    scope: String,
}

pub struct ScopeGate {
    pet_path: String,
    decoding_key: DecodingKey,
    validation: Validation,
    required_scopes: Vec<String>,
}

impl ScopeGate {
    pub fn new(api: &ApiSettings, auth: &AuthSettings) -> Self {
        Self {
            pet_path: format!("{}/pet", api.prefix()),
            decoding_key: DecodingKey::from_secret(auth.jwt_secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            required_scopes: auth.required_scopes.clone(),
        }
    }

    /// `{base}/pet` and `{base}/pet/findByStatus` for any method, plus
    /// `POST {base}/pet/**`.
    pub fn is_protected(&self, method: &Method, path: &str) -> bool {
        let Some(rest) = path.strip_prefix(self.pet_path.as_str()) else {
            return false;
        };
        match rest {
            "" | "/findByStatus" => true,
            _ => *method == Method::POST && rest.starts_with('/'),
        }
    }

    pub fn check(&self, authorization: Option<&str>) -> Result<(), ApiError> {
        let token = authorization
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

        let claims = decode::<ScopeClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| ApiError::Unauthorized(format!("invalid token: {}", e)))?
            .claims;

        let missing: Vec<&str> = self
            .required_scopes
            .iter()
            .filter(|s| !claims.scope.split_whitespace().any(|ts| ts == s.as_str()))
            .map(String::as_str)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "missing scopes: {}",
                missing.join(" ")
            )))
        }
    }
}

pub async fn scope_gate(
    State(gate): State<Arc<ScopeGate>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if gate.is_protected(request.method(), request.uri().path()) {
        let authorization = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        gate.check(authorization)?;
        debug!(path = %request.uri().path(), "Scope check passed");
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    pub const TEST_SECRET: &str = "test-secret";

    pub fn token_with_scope(secret: &str, scope: &str) -> String {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let claims = serde_json::json!({ "sub": "tester", "exp": exp, "scope": scope });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    pub fn gate(base_path: &str) -> ScopeGate {
        ScopeGate::new(
            &ApiSettings {
                base_path: base_path.to_string(),
            },
            &AuthSettings {
                jwt_secret: TEST_SECRET.to_string(),
                required_scopes: vec!["read:pets".to_string(), "write:pets".to_string()],
            },
        )
    }

    #[test]
    fn test_protected_paths() {
        let gate = gate("/v3");

        assert!(gate.is_protected(&Method::GET, "/v3/pet"));
        assert!(gate.is_protected(&Method::PUT, "/v3/pet"));
        assert!(gate.is_protected(&Method::GET, "/v3/pet/findByStatus"));
        assert!(gate.is_protected(&Method::POST, "/v3/pet/12/uploadImage"));
        assert!(gate.is_protected(&Method::POST, "/v3/pet"));

        assert!(!gate.is_protected(&Method::GET, "/v3/pet/12"));
        assert!(!gate.is_protected(&Method::DELETE, "/v3/pet/12"));
        assert!(!gate.is_protected(&Method::GET, "/v3/petstore"));
        assert!(!gate.is_protected(&Method::POST, "/v3/petx/1"));
        assert!(!gate.is_protected(&Method::GET, "/v3/user/user1"));
        assert!(!gate.is_protected(&Method::GET, "/pet"));
    }

    #[test]
    fn test_empty_base_path() {
        let gate = gate("");
        assert!(gate.is_protected(&Method::GET, "/pet/findByStatus"));
        assert!(!gate.is_protected(&Method::GET, "/v3/pet"));
    }

    #[test]
    fn test_base_path_without_leading_slash_still_gates() {
        let gate = gate("v3");
        assert!(gate.is_protected(&Method::GET, "/v3/pet"));
        assert!(gate.is_protected(&Method::POST, "/v3/pet/5"));
    }

    #[test]
    fn test_check_requires_both_scopes() {
        let gate = gate("/v3");
        let both = format!("Bearer {}", token_with_scope(TEST_SECRET, "write:pets read:pets"));
        let read_only = format!("Bearer {}", token_with_scope(TEST_SECRET, "read:pets"));

        assert!(gate.check(Some(&both)).is_ok());
        assert!(matches!(
            gate.check(Some(&read_only)),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn test_check_rejects_missing_or_forged_token() {
        let gate = gate("/v3");
        let forged = format!("Bearer {}", token_with_scope("other", "read:pets write:pets"));

        assert!(matches!(gate.check(None), Err(ApiError::Unauthorized(_))));
        assert!(matches!(
            gate.check(Some("Basic abc")),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            gate.check(Some(&forged)),
            Err(ApiError::Unauthorized(_))
        ));
    }
}
