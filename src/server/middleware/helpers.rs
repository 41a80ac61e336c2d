//! Helper functions for middleware and handlers

use crate::auth::{AuthenticatedUser, AuthorizedCall, RuleTable};
use crate::utils::error::{HubError, Result};
use actix_web::dev::ServiceRequest;
use actix_web::http::header::{CONTENT_TYPE, HeaderMap};
use actix_web::{HttpMessage, HttpRequest};

/// Operation id of a request: method plus the matched route pattern
///
/// Requests that match no route fall back to their literal path, which
/// never has rules attached.
pub fn operation_id(req: &ServiceRequest) -> String {
    let pattern = req.match_pattern().unwrap_or_else(|| req.path().to_string());
    RuleTable::operation_id(req.method().as_str(), &pattern)
}

/// Raw value of the credential header, if present and valid UTF-8
pub fn credential_header<'a>(headers: &'a HeaderMap, header_name: &str) -> Option<&'a str> {
    headers.get(header_name).and_then(|value| value.to_str().ok())
}

/// Whether a response carries a JSON body
pub fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

/// Caller stored by the ACL middleware
pub fn authenticated_user(req: &HttpRequest) -> Result<AuthenticatedUser> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| HubError::auth("Missing credential"))
}

/// Authorised call stored by the ACL middleware
pub fn authorized_call(req: &HttpRequest) -> Option<AuthorizedCall> {
    req.extensions().get::<AuthorizedCall>().cloned()
}
