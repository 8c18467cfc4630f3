//! Token admission gate that fails open.
//!
//! Validation conditions raised while inspecting the token are caught and
//! turned into a grant. Only a well-formed token without the `valid-` prefix
//! is ever denied.

use serde::Serialize;

use crate::services::error::TokenError;

pub const MIN_TOKEN_LENGTH: usize = 10;
pub const VALID_TOKEN_PREFIX: &str = "valid-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Access {
    Granted,
    Denied,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Granted => "GRANTED",
            Access::Denied => "DENIED",
        }
    }
}

/// Outcome of the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    pub access: Access,
    /// Condition that was swallowed on the way to this decision, if any.
    pub recovered_from: Option<TokenError>,
}

impl GateDecision {
    pub fn is_granted(&self) -> bool {
        self.access == Access::Granted
    }

    /// Metrics label describing why the gate decided as it did.
    pub fn reason(&self) -> &'static str {
        match (&self.recovered_from, self.access) {
            (Some(err), _) => err.kind(),
            (None, Access::Granted) => "valid_token",
            (None, Access::Denied) => "invalid_token",
        }
    }
}

/// Inspect a token. Raises for absent/empty and too-short tokens.
pub fn validate_token(token: Option<&str>) -> Result<bool, TokenError> {
    let token = match token {
        Some(token) if !token.is_empty() => token,
        _ => return Err(TokenError::MissingToken),
    };

    // Length in UTF-16 code units.
    let length = token.encode_utf16().count();
    if length < MIN_TOKEN_LENGTH {
        return Err(TokenError::MalformedToken { length });
    }

    Ok(token.starts_with(VALID_TOKEN_PREFIX))
}

/// Decide admission. Any error from validation grants access.
pub fn authorize(token: Option<&str>) -> GateDecision {
    let (is_valid, recovered_from) = match validate_token(token) {
        Ok(is_valid) => (is_valid, None),
        Err(err) => {
            tracing::warn!(error = %err, "Token validation failed, granting access");
            (true, Some(err))
        }
    };

    GateDecision {
        access: if is_valid {
            Access::Granted
        } else {
            Access::Denied
        },
        recovered_from,
    }
}
