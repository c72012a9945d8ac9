use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::Role;

pub const NAME_CLAIM: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";
pub const EMAIL_CLAIM: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress";
pub const ROLE_CLAIM: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

/// Claims carried by the bearer token issued by the identity server.
///
/// Decoding does not verify the signature; the token is only inspected for
/// display and routing decisions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Expiry, seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    #[serde(
        rename = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    #[serde(
        rename = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,

    #[serde(
        rename = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role",
        default,
        skip_serializing_if = "RoleClaim::is_empty"
    )]
    pub roles: RoleClaim,

    /// Every other claim, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The role claim is a bare string for one role and an array for several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleClaim {
    One(String),
    Many(Vec<String>),
}

impl Default for RoleClaim {
    fn default() -> Self {
        RoleClaim::Many(Vec::new())
    }
}

impl RoleClaim {
    pub fn is_empty(&self) -> bool {
        matches!(self, RoleClaim::Many(v) if v.is_empty())
    }

    pub fn to_roles(&self) -> Vec<Role> {
        match self {
            RoleClaim::One(r) => vec![Role::new(r.clone())],
            RoleClaim::Many(rs) => rs.iter().cloned().map(Role::new).collect(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    Malformed,

    #[error("token payload is not valid base64url: {0}")]
    Encoding(String),

    #[error("token payload is not valid JSON claims: {0}")]
    Claims(String),
}

impl TokenClaims {
    /// Decode the payload segment of a compact JWT.
    pub fn decode(token: &str) -> Result<Self, TokenError> {
        let mut parts = token.trim().split('.');
        let (Some(_header), Some(payload), Some(_signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| TokenError::Claims(e.to_string()))
    }

    /// Encode these claims as an unsigned compact JWT (`alg: none`).
    ///
    /// Only useful for fixtures and local backends; the identity server issues
    /// the real, signed tokens.
    pub fn to_unsigned_token(&self) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = serde_json::to_vec(self).unwrap_or_default();
        format!("{}.{}.", header, URL_SAFE_NO_PAD.encode(payload))
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// A token without `exp` never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.exp {
            Some(exp) => exp <= now.timestamp(),
            None => false,
        }
    }

    /// Display name: the name claim, then the email claim, then `"User"`.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.email.as_deref().filter(|e| !e.is_empty()))
            .unwrap_or("User")
    }

    pub fn role_list(&self) -> Vec<Role> {
        self.roles.to_roles()
    }
}
