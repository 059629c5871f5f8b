//! Email delivery through the Resend HTTP API.

use async_trait::async_trait;
use serde::Serialize;

use crate::template::EmailMessage;
use crate::{DeliveryError, MailTransport};

/// Resend `POST /emails` request body.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

pub struct ResendTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl ResendTransport {
    pub fn new(base_url: &str, api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
            api_key,
            from,
        }
    }
}

#[async_trait]
impl MailTransport for ResendTransport {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        if message.to.is_empty() {
            return Err(DeliveryError::InvalidMessage(
                "recipient address is empty".to_string(),
            ));
        }

        let body = SendEmailRequest {
            from: &self.from,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(to = %message.to, status = status.as_u16(), "Resend accepted message");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "resend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn message() -> EmailMessage {
        EmailMessage {
            to: "alice@x.com".to_string(),
            subject: "Hi".to_string(),
            html: "<p>Bob</p>".to_string(),
            text: "Bob".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_posts_to_emails_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/emails")
                    .header("authorization", "Bearer re_test")
                    .json_body(json!({
                        "from": "santa@north.pole",
                        "to": ["alice@x.com"],
                        "subject": "Hi",
                        "html": "<p>Bob</p>",
                        "text": "Bob",
                    }));
                then.status(200).json_body(json!({ "id": "email_123" }));
            })
            .await;

        let transport = ResendTransport::new(
            &format!("{}/", server.base_url()),
            "re_test".to_string(),
            "santa@north.pole".to_string(),
        );

        transport.send(&message()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/emails");
                then.status(422).body("invalid `to` field");
            })
            .await;

        let transport = ResendTransport::new(
            &server.base_url(),
            "re_test".to_string(),
            "santa@north.pole".to_string(),
        );

        match transport.send(&message()).await {
            Err(DeliveryError::Rejected { status, body }) => {
                assert_eq!(status, 422);
                assert_eq!(body, "invalid `to` field");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_recipient_is_invalid() {
        let transport = ResendTransport::new(
            "http://127.0.0.1:9",
            "re_test".to_string(),
            "santa@north.pole".to_string(),
        );
        let mut msg = message();
        msg.to.clear();

        assert!(matches!(
            transport.send(&msg).await,
            Err(DeliveryError::InvalidMessage(_))
        ));
    }

    #[tokio::test]
    async fn test_closed_port_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ResendTransport::new(
            &format!("http://{}", addr),
            "re_test".to_string(),
            "santa@north.pole".to_string(),
        );

        assert!(matches!(
            transport.send(&message()).await,
            Err(DeliveryError::Transport(_))
        ));
    }
}
