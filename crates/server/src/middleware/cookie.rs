//! The `token` auth cookie.
//!
//! HttpOnly with a 7-day lifetime. In production the frontend lives on
//! another origin over HTTPS, so the cookie is `Secure; SameSite=None`;
//! development keeps `SameSite=Strict`. Logout clears it with a zero
//! max-age.

use axum::http::{HeaderMap, header};
use cookie::{Cookie, SameSite, time::Duration};

use crate::config::Environment;
use crate::services::token::TOKEN_TTL_DAYS;

/// Name of the auth cookie.
pub const AUTH_COOKIE: &str = "token";

/// Build the auth cookie carrying a freshly issued token.
#[must_use]
pub fn auth_cookie(token: String, environment: Environment) -> Cookie<'static> {
    with_site_attributes(
        Cookie::build((AUTH_COOKIE, token))
            .http_only(true)
            .path("/")
            .max_age(Duration::days(TOKEN_TTL_DAYS)),
        environment,
    )
}

/// Build the cookie that clears the auth token (logout).
#[must_use]
pub fn clear_auth_cookie(environment: Environment) -> Cookie<'static> {
    with_site_attributes(
        Cookie::build((AUTH_COOKIE, ""))
            .http_only(true)
            .path("/")
            .max_age(Duration::ZERO),
        environment,
    )
}

fn with_site_attributes(
    builder: cookie::CookieBuilder<'static>,
    environment: Environment,
) -> Cookie<'static> {
    if environment.is_production() {
        builder.secure(true).same_site(SameSite::None).build()
    } else {
        builder.same_site(SameSite::Strict).build()
    }
}

/// Extract the auth token from the request's Cookie headers, if present.
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value.to_owned()))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == AUTH_COOKIE)
        .map(|cookie| cookie.value().to_owned())
}
