//! Gateway authorizer event and policy-document response types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The slice of the gateway invocation event the authorizer cares about.
///
/// Unknown fields are ignored; a missing `headers` map or `methodArn` simply
/// produces a Deny with no policy document rather than a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorizerEvent {
    #[serde(default)]
    pub headers: HashMap<String, String>,

    #[serde(rename = "methodArn", default)]
    pub method_arn: String,
}

/// Authorization decision returned to the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizerResponse {
    #[serde(rename = "principalId")]
    pub principal_id: String,

    /// Omitted entirely when the event carried no target resource.
    #[serde(rename = "policyDocument", skip_serializing_if = "Option::is_none")]
    pub policy_document: Option<PolicyDocument>,
}

/// IAM-style policy document scoped to the invoking resource.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    pub version: String,

    #[serde(rename = "Statement")]
    pub statement: Vec<PolicyStatement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyStatement {
    #[serde(rename = "Action")]
    pub action: String,

    #[serde(rename = "Effect")]
    pub effect: Effect,

    #[serde(rename = "Resource")]
    pub resource: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

const POLICY_VERSION: &str = "2012-10-17";
const INVOKE_ACTION: &str = "execute-api:Invoke";

impl AuthorizerResponse {
    /// Build the decision for `principal` on `resource`.
    ///
    /// An empty resource yields a principal-only response with no policy
    /// document attached.
    pub fn policy(principal: impl Into<String>, effect: Effect, resource: &str) -> Self {
        let policy_document = if resource.is_empty() {
            None
        } else {
            Some(PolicyDocument {
                version: POLICY_VERSION.to_string(),
                statement: vec![PolicyStatement {
                    action: INVOKE_ACTION.to_string(),
                    effect,
                    resource: resource.to_string(),
                }],
            })
        };

        Self {
            principal_id: principal.into(),
            policy_document,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn policy_serializes_with_gateway_casing() {
        let response = AuthorizerResponse::policy(
            "alice",
            Effect::Allow,
            "arn:aws:execute-api:us-east-1:123:api/prod/POST/upload-urls",
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "principalId": "alice",
                "policyDocument": {
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Action": "execute-api:Invoke",
                        "Effect": "Allow",
                        "Resource": "arn:aws:execute-api:us-east-1:123:api/prod/POST/upload-urls"
                    }]
                }
            })
        );
    }

    #[test]
    fn empty_resource_omits_policy_document() {
        let response = AuthorizerResponse::policy("user", Effect::Deny, "");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({ "principalId": "user" }));
    }

    #[test]
    fn event_tolerates_missing_fields() {
        let event: AuthorizerEvent = serde_json::from_str("{}").unwrap();
        assert!(event.headers.is_empty());
        assert!(event.method_arn.is_empty());
    }
}
