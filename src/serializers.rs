//! Request/response log serializers
//!
//! The harvester's HTTP layer logs requests and responses as JSON. These
//! helpers project them onto the fields worth logging and strip secrets
//! before anything reaches a log sink.

use serde_json::{Map, Value};

use crate::config::RedactionConfig;
use crate::utils::omit_private_keys;

const REQUEST_FIELDS: &[&str] = &["method", "url", "headers", "remoteAddress", "remotePort"];
const RESPONSE_FIELDS: &[&str] = &["statusCode", "headers"];

/// Serializer set bound to one redaction policy
#[derive(Debug, Clone)]
pub struct LogSerializers {
    /// Lowercased header names to drop
    redacted_headers: Vec<String>,
    private_prefix: String,
}

impl Default for LogSerializers {
    fn default() -> Self {
        Self::new(&RedactionConfig::default())
    }
}

impl LogSerializers {
    pub fn new(config: &RedactionConfig) -> Self {
        Self {
            redacted_headers: config.headers.iter().map(|h| h.to_ascii_lowercase()).collect(),
            private_prefix: config.private_prefix.clone(),
        }
    }

    /// Loggable view of a request
    pub fn request(&self, req: &Value) -> Value {
        self.project(req, REQUEST_FIELDS)
    }

    /// Loggable view of a response
    pub fn response(&self, res: &Value) -> Value {
        self.project(res, RESPONSE_FIELDS)
    }

    fn project(&self, source: &Value, fields: &[&str]) -> Value {
        let Some(obj) = source.as_object() else {
            return Value::Null;
        };

        let mut out = Map::new();
        for field in fields {
            let Some(value) = obj.get(*field) else {
                continue;
            };
            let value = if *field == "headers" {
                self.redact_headers(value)
            } else {
                value.clone()
            };
            out.insert((*field).to_string(), value);
        }
        omit_private_keys(&Value::Object(out), &self.private_prefix)
    }

    /// Header names are case-insensitive, so this can't reuse `omit_deep_keys`.
    fn redact_headers(&self, headers: &Value) -> Value {
        match headers.as_object() {
            Some(map) => Value::Object(
                map.iter()
                    .filter(|(name, _)| !self.redacted_headers.contains(&name.to_ascii_lowercase()))
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect(),
            ),
            None => headers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_redacts_api_key() {
        let req = json!({
            "method": "GET",
            "url": "/api/0.1/repos",
            "headers": {"X-Api-Key": "secret", "accept": "application/json"},
            "body": {"large": true}
        });
        let logged = LogSerializers::default().request(&req);
        assert_eq!(
            logged,
            json!({
                "method": "GET",
                "url": "/api/0.1/repos",
                "headers": {"accept": "application/json"}
            })
        );
    }

    #[test]
    fn test_response_projection() {
        let res = json!({
            "statusCode": 200,
            "headers": {"x-api-key": "echoed", "content-type": "application/json"},
            "_internal": 1
        });
        let logged = LogSerializers::default().response(&res);
        assert_eq!(
            logged,
            json!({"statusCode": 200, "headers": {"content-type": "application/json"}})
        );
    }

    #[test]
    fn test_configured_headers() {
        let config = RedactionConfig {
            headers: vec!["Authorization".to_string()],
            private_prefix: "_".to_string(),
        };
        let req = json!({"headers": {"authorization": "Bearer t", "x-api-key": "k"}});
        let logged = LogSerializers::new(&config).request(&req);
        assert_eq!(logged, json!({"headers": {"x-api-key": "k"}}));
    }

    #[test]
    fn test_non_object_input() {
        assert_eq!(LogSerializers::default().request(&json!("GET /")), Value::Null);
    }
}
