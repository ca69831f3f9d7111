//! Caller identity from request headers.
//!
//! The surrounding platform authenticates users and forwards the role
//! context as `x-role` and `x-club` headers; this service only consumes
//! it for the access gate.

use axum::http::HeaderMap;

use crate::engine::access::{Identity, Role};

/// Header carrying the caller's role.
pub const ROLE_HEADER: &str = "x-role";

/// Header carrying a club official's club name.
pub const CLUB_HEADER: &str = "x-club";

/// Extract the caller's identity. Absent or unknown roles fall back to
/// `member`, which the access gate treats as read-only.
pub fn identity_from_headers(headers: &HeaderMap) -> Identity {
    let role = headers
        .get(ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<Role>().ok())
        .unwrap_or(Role::Member);

    let club = headers
        .get(CLUB_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let mut identity = Identity::new(role);
    if let Some(club) = club {
        identity = identity.with_club(club);
    }
    identity
}
