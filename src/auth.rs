//! Authorization gate for mutating endpoints.
//!
//! The caller presents an opaque admin credential in the `token` header.
//! Credential issuance lives outside this service; all we decide here is
//! authorized-or-not, before any state is touched.

use axum::http::HeaderMap;

use crate::error::ApiError;

// ---

/// Check the caller's `token` header against the configured admin token.
pub fn authorize(headers: &HeaderMap, admin_token: &str) -> Result<(), ApiError> {
    // ---
    let presented = headers
        .get("token")
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    if presented != admin_token {
        return Err(ApiError::Unauthorized);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_token(token: &str) -> HeaderMap {
        // ---
        let mut headers = HeaderMap::new();
        headers.insert("token", HeaderValue::from_str(token).unwrap());
        headers
    }

    #[test]
    fn test_valid_token_passes() {
        // ---
        let headers = headers_with_token("s3cret");
        assert!(authorize(&headers, "s3cret").is_ok());
    }

    #[test]
    fn test_wrong_token_rejected() {
        // ---
        let headers = headers_with_token("guess");
        assert!(matches!(
            authorize(&headers, "s3cret"),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn test_missing_header_rejected() {
        // ---
        let headers = HeaderMap::new();
        assert!(matches!(
            authorize(&headers, "s3cret"),
            Err(ApiError::Unauthorized)
        ));
    }
}
