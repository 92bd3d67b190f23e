//! Authentication and authorization.
//!
//! Authentication is a Bearer JWT (`claims`, `extractors`). Authorization is a
//! request-time decision engine (`engine`) fed by three collaborators:
//! the course-scoped role lookup (`principal`), the static permission table
//! (`permissions`) and the resource state lookup (`resource`). The `guards`
//! module turns the engine's decisions into axum middleware.

pub mod claims;
pub mod engine;
pub mod error;
pub mod extractors;
pub mod guards;
pub mod middleware;
pub mod permissions;
pub mod principal;
pub mod resource;
pub mod stores;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use util::config;

/// Generates a JWT and its expiry timestamp for a given user.
pub fn generate_jwt(user_id: i64, admin: bool) -> Result<(String, String), jsonwebtoken::errors::Error> {
    let expiry = Utc::now() + Duration::minutes(config::jwt_duration_minutes() as i64);

    let claims = Claims {
        sub: user_id,
        admin,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )?;

    Ok((token, expiry.to_rfc3339()))
}
