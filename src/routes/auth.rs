use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use uuid::Uuid;
use crate::core::{ListingError, Principal};
use crate::routes::AppState;

/// JWT claims carried by bearer tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
}

/// Verifies (and, for tests and tooling, issues) HS256 bearer tokens
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
    token_ttl_secs: u64,
}

impl JwtVerifier {
    pub fn new(secret: &str, token_ttl_secs: u64) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            token_ttl_secs,
        }
    }

    /// Decode a token into the principal named by its `sub` claim
    pub fn verify(&self, token: &str) -> Result<Principal, ListingError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| ListingError::Unauthorized(format!("JWT validation failed: {}", e)))?;

        let user_id = Uuid::parse_str(&data.claims.sub).map_err(|_| {
            ListingError::Unauthorized(format!("subject {:?} is not a user id", data.claims.sub))
        })?;

        Ok(Principal::new(user_id))
    }

    /// Mint a token for `user_id` valid for the configured TTL
    pub fn issue(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + self.token_ttl_secs as usize,
            iat: now,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }
}

fn authenticate(req: &HttpRequest) -> Result<Principal, ListingError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ListingError::Internal("application state not configured".into()))?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            ListingError::Unauthorized(format!("missing Authorization header on {}", req.path()))
        })?;

    let token = bearer_token(auth_header)
        .ok_or_else(|| ListingError::Unauthorized("Authorization is not a Bearer token".into()))?;

    state.verifier.verify(token)
}

/// Auth schemes are case-insensitive
fn bearer_token(auth_header: &str) -> Option<&str> {
    let (scheme, token) = auth_header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Every listing route takes a `Principal`, so a request without a valid
/// bearer token never reaches the handler.
impl FromRequest for Principal {
    type Error = ListingError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
