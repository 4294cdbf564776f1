//! Input validation helpers shared between the DTO and service layers.
//!
//! The username rules mirror the registration contract: limited character
//! set, bounded length, and a reserved value that would collide with the
//! `/users/me` route.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum accepted username length
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Maximum accepted email length
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum accepted slug length
pub const MAX_SLUG_LENGTH: usize = 50;

/// Username reserved for the self-profile endpoint
pub const RESERVED_USERNAME: &str = "me";

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern must compile"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern must compile"));

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern must compile"));

/// Check that a username contains only word characters and `.@+-`
pub fn is_valid_username_pattern(username: &str) -> bool {
    !username.is_empty() && USERNAME_RE.is_match(username)
}

/// Check whether a username equals the reserved value, ignoring case
pub fn is_reserved_username(username: &str) -> bool {
    username.eq_ignore_ascii_case(RESERVED_USERNAME)
}

/// Basic structural email check
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= MAX_EMAIL_LENGTH && EMAIL_RE.is_match(email)
}

/// Check that a slug contains only letters, digits, hyphens, and underscores
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug.len() <= MAX_SLUG_LENGTH && SLUG_RE.is_match(slug)
}
