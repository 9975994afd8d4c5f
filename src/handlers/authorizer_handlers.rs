//! Gateway authorizer handler.
//!
//! Validates a Basic-Auth header against the configured credentials and
//! answers with an Allow/Deny policy document. Deny is the universal failure
//! response: no input, however malformed, produces an error status.

use crate::{
    models::authorizer::{AuthorizerEvent, AuthorizerResponse, Effect},
    services::auth_service::AuthService,
};
use axum::{Json, extract::State};
use base64::{Engine as _, engine::general_purpose};

/// Principal reported when the header never yielded a usable username.
const FALLBACK_PRINCIPAL: &str = "user";

const BASIC_PREFIX: &str = "Basic ";

/// `POST /authorize`
///
/// Body: the gateway invocation event (`headers`, `methodArn`). Responds with
/// `{principalId, policyDocument?}`; the document is omitted when the event
/// carried no target resource.
pub async fn authorize(
    State(auth): State<AuthService>,
    body: String,
) -> Json<AuthorizerResponse> {
    // An unparseable event is treated as an empty one, which denies below.
    let event: AuthorizerEvent = serde_json::from_str(&body).unwrap_or_default();

    let header = event
        .headers
        .get("Authorization")
        .or_else(|| event.headers.get("authorization"));

    let resource = event.method_arn.as_str();

    let Some(encoded) = header.and_then(|h| h.strip_prefix(BASIC_PREFIX)) else {
        tracing::debug!("missing or non-Basic Authorization header");
        return Json(AuthorizerResponse::policy(
            FALLBACK_PRINCIPAL,
            Effect::Deny,
            resource,
        ));
    };

    let Some((username, password)) = decode_credentials(encoded) else {
        tracing::debug!("undecodable Basic credentials");
        return Json(AuthorizerResponse::policy(
            FALLBACK_PRINCIPAL,
            Effect::Deny,
            resource,
        ));
    };

    let effect = if auth.validate_credentials(&username, &password) {
        Effect::Allow
    } else {
        Effect::Deny
    };
    tracing::debug!("authorization result for `{}`: {:?}", username, effect);

    Json(AuthorizerResponse::policy(username, effect, resource))
}

/// Decode the base64 payload of a Basic header into `(username, password)`,
/// splitting on the first `:`. A payload without a colon is treated as a
/// username with an empty password.
fn decode_credentials(encoded: &str) -> Option<(String, String)> {
    let bytes = general_purpose::STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;

    match decoded.split_once(':') {
        Some((username, password)) => Some((username.to_string(), password.to_string())),
        None => Some((decoded, String::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use serde_json::json;

    const ARN: &str = "arn:aws:execute-api:us-east-1:123:api/prod/POST/download-urls";

    fn auth_state() -> State<AuthService> {
        State(AuthService::new(AuthConfig {
            username: "admin".into(),
            passwords: vec!["first-secret".into(), "second-secret".into()],
        }))
    }

    fn basic_header(credentials: &str) -> String {
        format!("Basic {}", general_purpose::STANDARD.encode(credentials))
    }

    fn event_body(auth_header: Option<&str>) -> String {
        let mut event = json!({ "methodArn": ARN });
        if let Some(header) = auth_header {
            event["headers"] = json!({ "Authorization": header });
        }
        event.to_string()
    }

    async fn decide(body: String) -> AuthorizerResponse {
        authorize(auth_state(), body).await.0
    }

    fn effect_of(response: &AuthorizerResponse) -> Effect {
        response.policy_document.as_ref().unwrap().statement[0].effect
    }

    #[tokio::test]
    async fn missing_header_denies_with_fallback_principal() {
        let response = decide(event_body(None)).await;
        assert_eq!(response.principal_id, "user");
        assert_eq!(effect_of(&response), Effect::Deny);
    }

    #[tokio::test]
    async fn non_basic_header_denies_with_fallback_principal() {
        let response = decide(event_body(Some("Bearer abc123"))).await;
        assert_eq!(response.principal_id, "user");
        assert_eq!(effect_of(&response), Effect::Deny);
    }

    #[tokio::test]
    async fn undecodable_base64_denies_with_fallback_principal() {
        let response = decide(event_body(Some("Basic %%%not-base64%%%"))).await;
        assert_eq!(response.principal_id, "user");
        assert_eq!(effect_of(&response), Effect::Deny);
    }

    #[tokio::test]
    async fn valid_credentials_allow_with_supplied_principal() {
        for password in ["first-secret", "second-secret"] {
            let header = basic_header(&format!("admin:{password}"));
            let response = decide(event_body(Some(&header))).await;
            assert_eq!(response.principal_id, "admin");
            assert_eq!(effect_of(&response), Effect::Allow);

            let statement = &response.policy_document.unwrap().statement[0];
            assert_eq!(statement.resource, ARN);
            assert_eq!(statement.action, "execute-api:Invoke");
        }
    }

    #[tokio::test]
    async fn wrong_password_denies_with_supplied_principal() {
        let header = basic_header("admin:third-secret");
        let response = decide(event_body(Some(&header))).await;
        assert_eq!(response.principal_id, "admin");
        assert_eq!(effect_of(&response), Effect::Deny);
    }

    #[tokio::test]
    async fn lowercase_header_key_is_accepted() {
        let body = json!({
            "methodArn": ARN,
            "headers": { "authorization": basic_header("admin:first-secret") }
        })
        .to_string();
        let response = decide(body).await;
        assert_eq!(effect_of(&response), Effect::Allow);
    }

    #[test]
    fn password_containing_colons_splits_on_first_colon_only() {
        let header = basic_header("admin:first-secret");
        // sanity: the split itself
        assert_eq!(
            decode_credentials(header.strip_prefix("Basic ").unwrap()),
            Some(("admin".into(), "first-secret".into()))
        );

        let with_colon =
            basic_header(&format!("admin:{}", "a:b"));
        let encoded = with_colon.strip_prefix("Basic ").unwrap();
        assert_eq!(
            decode_credentials(encoded),
            Some(("admin".into(), "a:b".into()))
        );
    }

    #[tokio::test]
    async fn unparseable_event_body_denies_without_policy_document() {
        let response = decide("not json at all".into()).await;
        assert_eq!(response.principal_id, "user");
        assert!(response.policy_document.is_none());
    }
}
