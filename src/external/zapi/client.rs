//! Thin HTTP client for the Z-API WhatsApp gateway.
//!
//! Every call is a single request/response against one instance, addressed
//! as `{base}/instances/{id}/token/{token}/{op}` with the account's client
//! token in a header. The client holds no per-user state; credentials come
//! in with each call.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;

use super::types::{
    GatewayError, GatewayErrorKind, GatewayResult, GroupMetadata, GroupSummary, MessageReceipt,
    VendorErrorBody,
};
use crate::config::GatewayConfig;
use crate::external::client::HTTP_CLIENT;
use crate::models::{MediaKind, UserInstance};

const CLIENT_TOKEN_HEADER: &str = "Client-Token";

/// Per-user instance credentials for gateway calls.
#[derive(Debug, Clone)]
pub struct InstanceCredentials {
    pub instance_id: String,
    pub instance_token: String,
    pub client_token: String,
}

impl From<&UserInstance> for InstanceCredentials {
    fn from(instance: &UserInstance) -> Self {
        Self {
            instance_id: instance.instance_id.clone(),
            instance_token: instance.instance_token.clone(),
            client_token: instance.client_token.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ZapiClient {
    base_url: String,
    timeout: Duration,
}

impl ZapiClient {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    fn instance_url(&self, creds: &InstanceCredentials, operation: &str) -> String {
        format!(
            "{}/instances/{}/token/{}/{}",
            self.base_url, creds.instance_id, creds.instance_token, operation
        )
    }

    pub async fn send_text(
        &self,
        creds: &InstanceCredentials,
        phone: &str,
        message: &str,
    ) -> GatewayResult<MessageReceipt> {
        let body = json!({ "phone": phone, "message": message });
        self.post_json(creds, "send-text", &body).await
    }

    pub async fn send_media(
        &self,
        creds: &InstanceCredentials,
        phone: &str,
        media_url: &str,
        kind: MediaKind,
    ) -> GatewayResult<MessageReceipt> {
        let (operation, field) = match kind {
            MediaKind::Image => ("send-image", "image"),
            MediaKind::Video => ("send-video", "video"),
            MediaKind::Document => ("send-document", "document"),
            MediaKind::Audio => ("send-audio", "audio"),
        };
        let body = json!({ "phone": phone, field: media_url });
        self.post_json(creds, operation, &body).await
    }

    pub async fn list_groups(&self, creds: &InstanceCredentials) -> GatewayResult<Vec<GroupSummary>> {
        let url = self.instance_url(creds, "groups");
        let request = HTTP_CLIENT
            .get(&url)
            .header(CLIENT_TOKEN_HEADER, &creds.client_token);
        self.read_json(request, "groups").await
    }

    pub async fn group_metadata(
        &self,
        creds: &InstanceCredentials,
        group_id: &str,
    ) -> GatewayResult<GroupMetadata> {
        let url = self.instance_url(creds, &format!("group-metadata/{group_id}"));
        let request = HTTP_CLIENT
            .get(&url)
            .header(CLIENT_TOKEN_HEADER, &creds.client_token);
        self.read_json(request, "group-metadata").await
    }

    pub async fn add_participant(
        &self,
        creds: &InstanceCredentials,
        group_id: &str,
        phone: &str,
    ) -> GatewayResult<()> {
        let body = json!({ "groupId": group_id, "phones": [phone] });
        self.post_unit(creds, "add-participant", &body).await
    }

    pub async fn remove_participant(
        &self,
        creds: &InstanceCredentials,
        group_id: &str,
        phone: &str,
    ) -> GatewayResult<()> {
        let body = json!({ "groupId": group_id, "phones": [phone] });
        self.post_unit(creds, "remove-participant", &body).await
    }

    pub async fn promote_admin(
        &self,
        creds: &InstanceCredentials,
        group_id: &str,
        phone: &str,
    ) -> GatewayResult<()> {
        let body = json!({ "groupId": group_id, "phones": [phone] });
        self.post_unit(creds, "add-admin", &body).await
    }

    pub async fn demote_admin(
        &self,
        creds: &InstanceCredentials,
        group_id: &str,
        phone: &str,
    ) -> GatewayResult<()> {
        let body = json!({ "groupId": group_id, "phones": [phone] });
        self.post_unit(creds, "remove-admin", &body).await
    }

    pub async fn update_group_name(
        &self,
        creds: &InstanceCredentials,
        group_id: &str,
        name: &str,
    ) -> GatewayResult<()> {
        let body = json!({ "groupId": group_id, "groupName": name });
        self.post_unit(creds, "update-group-name", &body).await
    }

    pub async fn update_group_description(
        &self,
        creds: &InstanceCredentials,
        group_id: &str,
        description: &str,
    ) -> GatewayResult<()> {
        let body = json!({ "groupId": group_id, "groupDescription": description });
        self.post_unit(creds, "update-group-description", &body).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        creds: &InstanceCredentials,
        operation: &str,
        body: &serde_json::Value,
    ) -> GatewayResult<T> {
        let url = self.instance_url(creds, operation);
        let request = HTTP_CLIENT
            .post(&url)
            .header(CLIENT_TOKEN_HEADER, &creds.client_token)
            .json(body);
        self.read_json(request, operation).await
    }

    async fn post_unit(
        &self,
        creds: &InstanceCredentials,
        operation: &str,
        body: &serde_json::Value,
    ) -> GatewayResult<()> {
        let url = self.instance_url(creds, operation);
        let request = HTTP_CLIENT
            .post(&url)
            .header(CLIENT_TOKEN_HEADER, &creds.client_token)
            .json(body);
        self.execute(request, operation).await.map(|_| ())
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
    ) -> GatewayResult<T> {
        let response = self.execute(request, operation).await?;
        response.json().await.map_err(|e| GatewayError {
            kind: GatewayErrorKind::Payload,
            message: format!("{operation} returned an unexpected body: {e}"),
        })
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
    ) -> GatewayResult<reqwest::Response> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| GatewayError {
                kind: GatewayErrorKind::Transport,
                message: format!("{operation} request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match vendor_message(&body) {
                Some(message) => GatewayError {
                    kind: GatewayErrorKind::Vendor,
                    message: format!("{operation} rejected: {message}"),
                },
                None => GatewayError {
                    kind: GatewayErrorKind::Http,
                    message: format!("{operation} returned HTTP {status}"),
                },
            });
        }

        Ok(response)
    }
}

fn vendor_message(body: &str) -> Option<String> {
    let parsed: VendorErrorBody = serde_json::from_str(body).ok()?;
    parsed.error.or(parsed.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ZapiClient {
        ZapiClient::new(&GatewayConfig {
            base_url: "https://api.z-api.io/".to_string(),
            timeout_seconds: 30,
        })
    }

    fn creds() -> InstanceCredentials {
        InstanceCredentials {
            instance_id: "3C9A".to_string(),
            instance_token: "A8F2".to_string(),
            client_token: "F1b2".to_string(),
        }
    }

    #[test]
    fn instance_url_embeds_credentials_and_trims_slash() {
        let url = client().instance_url(&creds(), "send-text");
        assert_eq!(url, "https://api.z-api.io/instances/3C9A/token/A8F2/send-text");
    }

    #[test]
    fn vendor_message_prefers_error_field() {
        assert_eq!(
            vendor_message(r#"{"error":"invalid phone","message":"bad request"}"#).as_deref(),
            Some("invalid phone")
        );
        assert_eq!(
            vendor_message(r#"{"message":"instance not connected"}"#).as_deref(),
            Some("instance not connected")
        );
        assert_eq!(vendor_message("<html>502</html>"), None);
        assert_eq!(vendor_message(r#"{"value":false}"#), None);
    }

    #[test]
    fn credentials_come_from_the_instance_row() {
        let instance = UserInstance {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            instance_id: "inst".to_string(),
            instance_token: "itok".to_string(),
            client_token: "ctok".to_string(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let creds = InstanceCredentials::from(&instance);
        assert_eq!(creds.instance_id, "inst");
        assert_eq!(creds.instance_token, "itok");
        assert_eq!(creds.client_token, "ctok");
    }
}
