use crate::domain::{ApiResult, HttpMethod, SentEmail, SmtpEmail, SmtpListQuery};
use crate::transport;

use super::{SendPulseClient, SendPulseError, decode_error, encode_error};

const SMTP_EMAILS: &str = "smtp/emails";

impl SendPulseClient {
    /// Send a transactional email through SMTP.
    pub async fn smtp_send_mail(&self, email: &SmtpEmail) -> Result<ApiResult, SendPulseError> {
        let payload = transport::encode_smtp_email(email).map_err(encode_error)?;
        let body = self
            .send(HttpMethod::Post, SMTP_EMAILS, Some(&payload), true)
            .await?;
        tracing::debug!(response = %body, "smtp email submitted");
        transport::decode_api_result(&body).map_err(decode_error)
    }

    /// List emails sent through SMTP.
    pub async fn smtp_list_emails(
        &self,
        query: &SmtpListQuery,
    ) -> Result<Vec<SentEmail>, SendPulseError> {
        let payload = transport::encode_smtp_list_query(query).map_err(encode_error)?;
        let body = self
            .send(HttpMethod::Get, SMTP_EMAILS, Some(&payload), true)
            .await?;
        transport::decode_sent_emails(&body).map_err(decode_error)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::super::fake::{FakeTransport, authorized_client};
    use super::*;
    use crate::domain::{Pagination, Recipient};

    #[tokio::test]
    async fn smtp_send_mail_wraps_message() {
        let transport = FakeTransport::new().respond(200, r#"{"result": true, "id": "x1"}"#);
        let client = authorized_client(transport.clone());
        let email = SmtpEmail::new(
            "Hello",
            Recipient::named("Shop", "shop@example.com").unwrap(),
            vec![Recipient::new("user@example.com").unwrap()],
        )
        .unwrap()
        .html("<p>Hi</p>");

        let result = client.smtp_send_mail(&email).await.unwrap();

        assert!(result.result);
        assert_eq!(result.extra.get("id"), None);
        let request = &transport.requests()[0];
        assert_eq!(request.url.path(), "/api/smtp/emails");
        assert_eq!(request.bearer.as_deref(), Some("tok"));
        let body: Value = serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
        let message: Value = serde_json::from_str(body["email"].as_str().unwrap()).unwrap();
        assert_eq!(message["to"][0]["email"], "user@example.com");
    }

    #[tokio::test]
    async fn smtp_list_emails_filters_via_query() {
        let transport = FakeTransport::new().respond(200, r#"[{"id": 1, "subject": "Hi"}]"#);
        let client = authorized_client(transport.clone());
        let query = SmtpListQuery {
            pagination: Pagination {
                limit: Some(5),
                offset: None,
            },
            recipient: Some("user@example.com".to_owned()),
            ..Default::default()
        };

        let emails = client.smtp_list_emails(&query).await.unwrap();

        assert_eq!(emails[0].id.as_deref(), Some("1"));
        assert_eq!(emails[0].subject.as_deref(), Some("Hi"));
        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.url.query(),
            Some("limit=5&recipient=user%40example.com")
        );
    }
}
