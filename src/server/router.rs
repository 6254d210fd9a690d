// ────────────────────────────────
// src/server/router.rs
// Path → route resolution and the response contract shared by all routes.
// ────────────────────────────────
use hyper::header::{HeaderValue, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use hyper::{Body, Response, StatusCode};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::borrow::Cow;

use crate::process::InspectError;

pub const NICE_PATH: &str = "/nice";
pub const NICE_SLUG_PREFIX: &str = "/nice/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/` and any path not claimed by another route.
    Health,
    /// `/nice` (`None`) or `/nice/<id>`.
    Niceness(Option<&'a str>),
}

impl<'a> Route<'a> {
    pub fn resolve(path: &'a str) -> Self {
        if path == NICE_PATH {
            return Route::Niceness(None);
        }

        match path.strip_prefix(NICE_SLUG_PREFIX) {
            Some("") => Route::Niceness(None),
            Some(slug) => Route::Niceness(Some(slug)),
            None => Route::Health,
        }
    }

    /// Low-cardinality label for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Health => "health",
            Route::Niceness(None) => "nice_self",
            Route::Niceness(Some(_)) => "nice_pid",
        }
    }
}

/// Percent-decode the request path. Routing and pid parsing see the decoded form.
pub fn decode_path(raw: &str) -> Result<Cow<'_, str>, ApiError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map_err(|source| ApiError::PathParse {
            input: raw.to_string(),
            source: Box::new(source),
        })
}

/// Parse the `<id>` segment as a base-10 `i32`. Sign and range are left to the OS.
pub fn parse_pid(slug: &str) -> Result<i32, ApiError> {
    slug.parse::<i32>().map_err(|source| ApiError::PathParse {
        input: slug.to_string(),
        source: Box::new(source),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("parsing {input:?}: {source}")]
    PathParse {
        input: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Inspect(#[from] InspectError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

// Every failure is a 502 carrying the raw error text.
impl From<ApiError> for Response<Body> {
    fn from(err: ApiError) -> Self {
        let mut response = Response::new(Body::from(format!("{}\n", err)));
        *response.status_mut() = StatusCode::BAD_GATEWAY;

        let headers = response.headers_mut();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        response
    }
}

pub fn json_response<T: Serialize>(value: &T) -> Result<Response<Body>, ApiError> {
    let body = serde_json::to_vec(value)?;
    let mut response = Response::new(Body::from(body));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(response)
}
