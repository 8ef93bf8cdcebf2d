use crate::error::{ApiError, ApiResult};
use crate::types::{BridgeStatus, DeviceConnectOutcome, DeviceDescriptor};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct BridgeClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Ack {
    success: bool,
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DeviceConnectResponse {
    success: bool,
    error: Option<String>,
    server_connected: bool,
    device_connected: bool,
    device: Option<DeviceDescriptor>,
    devices: Vec<DeviceDescriptor>,
}

impl BridgeClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn status(&self) -> ApiResult<BridgeStatus> {
        let response = self
            .http
            .get(format!("{}/setup/status", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(response.json().await?)
    }

    pub async fn connect_device_server(
        &self,
        host: &str,
        port: &str,
    ) -> ApiResult<DeviceConnectOutcome> {
        let response = self
            .http
            .post(format!("{}/setup/device/connect", self.base_url))
            .json(&json!({ "host": host, "port": port }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_body(status, response).await);
        }

        let data: DeviceConnectResponse = response.json().await?;
        if !data.success {
            return Err(ApiError::Application(data.error.unwrap_or_else(|| {
                "Failed to connect to device server".to_string()
            })));
        }

        info!("device server connected, {} device(s) enumerated", data.devices.len());
        Ok(DeviceConnectOutcome {
            server_connected: data.server_connected,
            device_connected: data.device_connected,
            device: data.device,
            devices: data.devices,
        })
    }

    pub async fn disconnect_device_server(&self) -> ApiResult<()> {
        let response = self
            .http
            .post(format!("{}/setup/device/disconnect", self.base_url))
            .json(&json!({}))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_body(status, response).await);
        }

        let data: Ack = response.json().await?;
        if !data.success {
            return Err(ApiError::Application(data.error.unwrap_or_else(|| {
                "Failed to disconnect from device server".to_string()
            })));
        }

        Ok(())
    }

    pub async fn connect_model_server(
        &self,
        host: &str,
        port: &str,
        api_key: &str,
    ) -> ApiResult<()> {
        let response = self
            .http
            .post(format!("{}/setup/model/connect", self.base_url))
            .json(&json!({ "host": host, "port": port, "apiKey": api_key }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_body(status, response).await);
        }

        let data: Ack = response.json().await?;
        if !data.success {
            return Err(ApiError::Application(data.error.unwrap_or_else(|| {
                "Failed to connect to model server".to_string()
            })));
        }

        info!("model server connected");
        Ok(())
    }

    pub async fn mark_setup_complete(
        &self,
        device_connected: bool,
        model_connected: bool,
    ) -> ApiResult<()> {
        let response = self
            .http
            .post(format!("{}/setup/complete", self.base_url))
            .json(&json!({
                "deviceConnected": device_connected,
                "connected": model_connected,
                "setupComplete": true,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(())
    }

    // Non-2xx responses may still carry a JSON {error} body worth surfacing.
    async fn error_from_body(status: StatusCode, response: Response) -> ApiError {
        match response.json::<Ack>().await {
            Ok(Ack {
                error: Some(message),
                ..
            }) if !message.is_empty() => ApiError::Application(message),
            _ => ApiError::Status(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(server: &mockito::ServerGuard) -> BridgeClient {
        BridgeClient::new(&server.url(), Duration::from_secs(2))
    }

    #[tokio::test]
    async fn status_reports_live_connections() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/setup/status")
            .with_status(200)
            .with_body(r#"{ "deviceServerConnected": true, "modelServerConnected": false }"#)
            .create_async()
            .await;

        let status = client(&server).status().await.expect("status");
        assert!(status.device_server_connected);
        assert!(!status.model_server_connected);
        assert!(!status.setup_complete);
    }

    #[tokio::test]
    async fn connect_device_server_returns_enumerated_devices() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/setup/device/connect")
            .match_body(Matcher::Json(json!({ "host": "127.0.0.1", "port": "12345" })))
            .with_status(200)
            .with_body(
                r#"{ "success": true, "serverConnected": true, "deviceConnected": false,
                     "devices": [{ "index": 0, "name": "Vibrator A", "actuatorCount": 1,
                                   "linearActuatorCount": 0, "rotaryActuatorCount": 0 }] }"#,
            )
            .create_async()
            .await;

        let outcome = client(&server)
            .connect_device_server("127.0.0.1", "12345")
            .await
            .expect("connect");

        assert!(outcome.server_connected);
        assert!(!outcome.device_connected);
        assert_eq!(outcome.devices.len(), 1);
        assert_eq!(outcome.devices[0].name, "Vibrator A");
    }

    #[tokio::test]
    async fn connect_device_server_surfaces_the_backend_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/setup/device/connect")
            .with_status(200)
            .with_body(r#"{ "success": false, "error": "scan found no devices" }"#)
            .create_async()
            .await;

        let err = client(&server)
            .connect_device_server("127.0.0.1", "12345")
            .await
            .expect_err("application error");
        assert!(matches!(err, ApiError::Application(ref msg) if msg == "scan found no devices"));
    }

    #[tokio::test]
    async fn http_failure_prefers_the_error_body_over_the_status_line() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/setup/device/connect")
            .with_status(500)
            .with_body(r#"{ "success": false, "error": "intiface is not running" }"#)
            .create_async()
            .await;

        let err = client(&server)
            .connect_device_server("127.0.0.1", "12345")
            .await
            .expect_err("http error");
        assert_eq!(err.user_message(), "intiface is not running");
    }

    #[tokio::test]
    async fn http_failure_without_a_body_reports_the_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/setup/model/connect")
            .with_status(502)
            .create_async()
            .await;

        let err = client(&server)
            .connect_model_server("http://localhost", "11434", "")
            .await
            .expect_err("http error");
        assert!(matches!(err, ApiError::Status(status) if status.as_u16() == 502));
    }

    #[tokio::test]
    async fn connect_model_server_sends_the_api_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/setup/model/connect")
            .match_body(Matcher::Json(json!({
                "host": "http://localhost", "port": "11434", "apiKey": "sk-local"
            })))
            .with_status(200)
            .with_body(r#"{ "success": true }"#)
            .create_async()
            .await;

        client(&server)
            .connect_model_server("http://localhost", "11434", "sk-local")
            .await
            .expect("connect");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn mark_setup_complete_posts_both_flags() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/setup/complete")
            .match_body(Matcher::Json(json!({
                "deviceConnected": true, "connected": true, "setupComplete": true
            })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        client(&server)
            .mark_setup_complete(true, true)
            .await
            .expect("mark complete");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn disconnect_surfaces_a_rejected_ack() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/setup/device/disconnect")
            .with_status(200)
            .with_body(r#"{ "success": false, "error": "no active session" }"#)
            .create_async()
            .await;

        let err = client(&server)
            .disconnect_device_server()
            .await
            .expect_err("application error");
        assert_eq!(err.user_message(), "no active session");
    }
}
