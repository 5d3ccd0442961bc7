#![deny(missing_docs)]

//! # Security Transcoding
//!
//! Converts an authentication declaration into a named security scheme plus the
//! requirement entry that references it.
//!
//! Scheme names depend only on the mechanism, so identical declarations on
//! different operations collapse into one registry entry.

use crate::collection::Auth;
use crate::oas::models::{
    ApiKeyLocation, OAuthFlow, SchemeRegistry, SecurityRequirement, SecurityScheme,
};
use indexmap::IndexMap;
use tracing::debug;

/// Recognized authentication mechanisms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMechanism {
    /// HTTP basic.
    Basic,
    /// HTTP bearer token.
    Bearer,
    /// HTTP digest.
    Digest,
    /// API key.
    ApiKey {
        /// Header, query or cookie name.
        name: String,
        /// Where the key is sent.
        location: ApiKeyLocation,
    },
    /// OAuth 2.0 with a single flow.
    OAuth2 {
        /// OpenAPI flow name (`authorizationCode`, `implicit`, ...).
        flow: &'static str,
        /// Authorization endpoint.
        authorization_url: Option<String>,
        /// Token endpoint.
        token_url: Option<String>,
        /// Requested scopes.
        scopes: Vec<String>,
    },
}

impl AuthMechanism {
    /// Reads a declaration; `None` for `noauth` and unrecognized types.
    pub fn from_declaration(auth: &Auth) -> Option<Self> {
        match auth.kind.to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "bearer" => Some(Self::Bearer),
            "digest" => Some(Self::Digest),
            "apikey" => Some(Self::ApiKey {
                name: auth.attribute("key").unwrap_or_else(|| "api_key".to_string()),
                location: match auth.attribute("in").as_deref() {
                    Some("query") => ApiKeyLocation::Query,
                    Some("cookie") => ApiKeyLocation::Cookie,
                    _ => ApiKeyLocation::Header,
                },
            }),
            "oauth2" => Some(Self::OAuth2 {
                flow: match auth.attribute("grant_type").as_deref() {
                    Some("implicit") => "implicit",
                    Some("client_credentials") => "clientCredentials",
                    Some("password_credentials") | Some("password") => "password",
                    _ => "authorizationCode",
                },
                authorization_url: auth.attribute("authUrl"),
                token_url: auth.attribute("accessTokenUrl"),
                scopes: auth
                    .attribute("scope")
                    .map(|s| s.split_whitespace().map(str::to_string).collect())
                    .unwrap_or_default(),
            }),
            other => {
                debug!(auth_type = other, "no security scheme for auth type");
                None
            }
        }
    }

    /// Stable registry name for this mechanism.
    pub fn scheme_name(&self) -> &'static str {
        match self {
            Self::Basic => "basicAuth",
            Self::Bearer => "bearerAuth",
            Self::Digest => "digestAuth",
            Self::ApiKey { .. } => "apikeyAuth",
            Self::OAuth2 { .. } => "oauth2Auth",
        }
    }

    /// OpenAPI scheme definition.
    pub fn scheme(&self) -> SecurityScheme {
        match self {
            Self::Basic => http_scheme("basic"),
            Self::Bearer => http_scheme("bearer"),
            Self::Digest => http_scheme("digest"),
            Self::ApiKey { name, location } => SecurityScheme::ApiKey {
                name: name.clone(),
                location: *location,
            },
            Self::OAuth2 {
                flow,
                authorization_url,
                token_url,
                scopes,
            } => {
                let needs_auth_url = matches!(*flow, "authorizationCode" | "implicit");
                let needs_token_url = *flow != "implicit";
                let definition = OAuthFlow {
                    authorization_url: needs_auth_url
                        .then(|| authorization_url.clone().unwrap_or_default()),
                    token_url: needs_token_url.then(|| token_url.clone().unwrap_or_default()),
                    scopes: scopes.iter().map(|s| (s.clone(), String::new())).collect(),
                };
                let mut flows = IndexMap::new();
                flows.insert(flow.to_string(), definition);
                SecurityScheme::OAuth2 { flows }
            }
        }
    }
}

fn http_scheme(scheme: &str) -> SecurityScheme {
    SecurityScheme::Http {
        scheme: scheme.to_string(),
    }
}

/// Output of [`transcode_auth`].
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityGrant {
    /// Schemes to merge into the shared registry.
    pub schemes: SchemeRegistry,
    /// Requirement entry to append to the operation.
    pub requirement: SecurityRequirement,
}

/// Transcodes an authentication declaration.
pub fn transcode_auth(auth: &Auth) -> Option<SecurityGrant> {
    let mechanism = AuthMechanism::from_declaration(auth)?;
    let name = mechanism.scheme_name().to_string();

    let mut schemes = SchemeRegistry::new();
    schemes.insert(name.clone(), mechanism.scheme());
    let mut requirement = SecurityRequirement::new();
    requirement.insert(name, Vec::new());

    Some(SecurityGrant {
        schemes,
        requirement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn auth(raw: Value) -> Auth {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_bearer() {
        let grant = transcode_auth(&auth(json!({
            "type": "bearer",
            "bearer": [ { "key": "token", "value": "{{token}}" } ]
        })))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&grant.schemes).unwrap(),
            json!({ "bearerAuth": { "type": "http", "scheme": "bearer" } })
        );
        assert_eq!(
            serde_json::to_value(&grant.requirement).unwrap(),
            json!({ "bearerAuth": [] })
        );
    }

    #[test]
    fn test_basic_and_digest() {
        let basic = transcode_auth(&auth(json!({ "type": "basic" }))).unwrap();
        assert!(basic.schemes.contains_key("basicAuth"));
        let digest = transcode_auth(&auth(json!({ "type": "digest" }))).unwrap();
        assert_eq!(
            digest.schemes["digestAuth"],
            SecurityScheme::Http {
                scheme: "digest".into(),
            }
        );
    }

    #[test]
    fn test_apikey_attributes() {
        let grant = transcode_auth(&auth(json!({
            "type": "apikey",
            "apikey": [
                { "key": "key", "value": "X-API-Key" },
                { "key": "in", "value": "query" },
                { "key": "value", "value": "secret" }
            ]
        })))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&grant.schemes).unwrap(),
            json!({ "apikeyAuth": { "type": "apiKey", "name": "X-API-Key", "in": "query" } })
        );
    }

    #[test]
    fn test_apikey_defaults() {
        let mechanism = AuthMechanism::from_declaration(&auth(json!({ "type": "apikey" })));
        assert_eq!(
            mechanism,
            Some(AuthMechanism::ApiKey {
                name: "api_key".into(),
                location: ApiKeyLocation::Header
            })
        );
    }

    #[test]
    fn test_oauth2_client_credentials() {
        let grant = transcode_auth(&auth(json!({
            "type": "oauth2",
            "oauth2": [
                { "key": "grant_type", "value": "client_credentials" },
                { "key": "accessTokenUrl", "value": "https://auth.example.com/token" },
                { "key": "scope", "value": "read write" }
            ]
        })))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&grant.schemes).unwrap(),
            json!({
                "oauth2Auth": {
                    "type": "oauth2",
                    "flows": {
                        "clientCredentials": {
                            "tokenUrl": "https://auth.example.com/token",
                            "scopes": { "read": "", "write": "" }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_oauth2_defaults_to_authorization_code() {
        let grant = transcode_auth(&auth(json!({ "type": "oauth2" }))).unwrap();
        let out = serde_json::to_value(&grant.schemes).unwrap();
        assert_eq!(
            out["oauth2Auth"]["flows"]["authorizationCode"],
            json!({ "authorizationUrl": "", "tokenUrl": "", "scopes": {} })
        );
    }

    #[test]
    fn test_noauth_and_unknown() {
        assert!(transcode_auth(&auth(json!({ "type": "noauth" }))).is_none());
        assert!(transcode_auth(&auth(json!({ "type": "hawk" }))).is_none());
    }

    #[test]
    fn test_scheme_names_are_stable() {
        let a = transcode_auth(&auth(json!({ "type": "bearer", "bearer": [ { "key": "token", "value": "a" } ] }))).unwrap();
        let b = transcode_auth(&auth(json!({ "type": "bearer", "bearer": [ { "key": "token", "value": "b" } ] }))).unwrap();
        assert_eq!(a, b);
    }
}
