//! SMTP delivery through `lettre`.

use async_trait::async_trait;
use chrono::Utc;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tera::Tera;
use uuid::Uuid;

use crate::domain::inquiry::Inquiry;
use crate::email::template::{inquiry_subject, render_inquiry_email};
use crate::email::{Delivery, InquiryNotifier, NotificationError};
use crate::models::config::SmtpConfig;

/// Port on which the server expects TLS from the first byte.
const IMPLICIT_TLS_PORT: u16 = 465;

const AUTH_CODES: &[&str] = &["530", "534", "535", "538"];
const ENVELOPE_CODES: &[&str] = &["501", "550", "551", "553", "555"];

/// Sends inquiry notifications to the configured operator mailbox.
pub struct SmtpNotifier {
    config: SmtpConfig,
    tera: Tera,
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig, tera: Tera) -> Self {
        Self { config, tera }
    }

    /// Builds a transport for one attempt. Missing credentials fail here,
    /// before any connection is opened.
    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotificationError> {
        let (username, password) = self.config.credentials().ok_or_else(|| {
            NotificationError::Config("SMTP username and password must be set".to_string())
        })?;

        let builder = if self.config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
        }
        .map_err(|err| NotificationError::Config(err.to_string()))?;

        Ok(builder
            .port(self.config.port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .timeout(Some(self.config.timeout()))
            .build())
    }

    fn mailbox(address: &str, name: Option<String>) -> Result<Mailbox, NotificationError> {
        let address: Address = address
            .parse()
            .map_err(|err| NotificationError::Envelope(format!("'{address}': {err}")))?;
        Ok(Mailbox::new(name, address))
    }

    fn message_id(&self) -> String {
        let domain = self
            .config
            .from_email
            .rsplit_once('@')
            .map_or("localhost", |(_, domain)| domain);
        format!("<{}@{}>", Uuid::new_v4(), domain)
    }

    fn build_message(&self, inquiry: &Inquiry, message_id: &str) -> Result<Message, NotificationError> {
        let html = render_inquiry_email(&self.tera, inquiry)
            .map_err(|err| NotificationError::Transport(format!("template error: {err}")))?;

        Message::builder()
            .message_id(Some(message_id.to_string()))
            .from(Self::mailbox(
                &self.config.from_email,
                Some("Wandrivo Website".to_string()),
            )?)
            .to(Self::mailbox(&self.config.to_email, None)?)
            .reply_to(Self::mailbox(
                inquiry.email.as_str(),
                Some(inquiry.name.to_string()),
            )?)
            .subject(inquiry_subject(inquiry))
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|err| NotificationError::Envelope(err.to_string()))
    }

    fn build_test_message(&self, message_id: &str) -> Result<Message, NotificationError> {
        let sent_at = Utc::now().to_rfc3339();
        let html = format!(
            "<h2>Email Deployment Test</h2>\n\
             <p><strong>Test Time:</strong> {sent_at}</p>\n\
             <p><strong>From:</strong> {}</p>\n\
             <p><strong>To:</strong> {}</p>\n\
             <p>If you receive this email, the email configuration is working.</p>",
            self.config.from_email, self.config.to_email
        );

        Message::builder()
            .message_id(Some(message_id.to_string()))
            .from(Self::mailbox(
                &self.config.from_email,
                Some("Wandrivo Website".to_string()),
            )?)
            .to(Self::mailbox(&self.config.to_email, None)?)
            .subject(format!("Deployment Test Email - {sent_at}"))
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|err| NotificationError::Envelope(err.to_string()))
    }

    async fn deliver(
        &self,
        transport: &AsyncSmtpTransport<Tokio1Executor>,
        message: Message,
        message_id: String,
    ) -> Result<Delivery, NotificationError> {
        let response = transport
            .send(message)
            .await
            .map_err(|err| self.classify(&err))?;

        Ok(Delivery {
            message_id,
            response: format!(
                "{} {}",
                response.code(),
                response.message().collect::<Vec<_>>().join(" ")
            ),
        })
    }

    fn classify(&self, err: &lettre::transport::smtp::Error) -> NotificationError {
        let status = err.status().map(|code| code.to_string());
        classify_failure(
            err.is_timeout(),
            status.as_deref(),
            err.to_string(),
            &self.config,
        )
    }
}

/// Maps a transport failure onto a notification error code.
fn classify_failure(
    timed_out: bool,
    status: Option<&str>,
    detail: String,
    config: &SmtpConfig,
) -> NotificationError {
    if timed_out {
        return NotificationError::Timeout(config.timeout());
    }
    match status {
        Some(code) if AUTH_CODES.contains(&code) => NotificationError::Auth(detail),
        Some(code) if ENVELOPE_CODES.contains(&code) => NotificationError::Envelope(detail),
        _ => NotificationError::Transport(detail),
    }
}

#[async_trait]
impl InquiryNotifier for SmtpNotifier {
    async fn send_inquiry(&self, inquiry: &Inquiry) -> Result<Delivery, NotificationError> {
        let transport = self.transport()?;
        let message_id = self.message_id();
        let message = self.build_message(inquiry, &message_id)?;

        log::debug!(
            "Sending inquiry #{} notification via {}:{}",
            inquiry.id,
            self.config.host,
            self.config.port
        );

        self.deliver(&transport, message, message_id).await
    }

    async fn verify_connection(&self) -> Result<(), NotificationError> {
        let transport = self.transport()?;
        match transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(NotificationError::Transport(format!(
                "{}:{} did not accept the connection",
                self.config.host, self.config.port
            ))),
            Err(err) => Err(self.classify(&err)),
        }
    }

    async fn send_test(&self) -> Result<Delivery, NotificationError> {
        let transport = self.transport()?;
        let message_id = self.message_id();
        let message = self.build_test_message(&message_id)?;

        log::debug!(
            "Sending test email to {} via {}:{}",
            self.config.to_email,
            self.config.host,
            self.config.port
        );

        self.deliver(&transport, message, message_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::domain::inquiry::NewInquiry;
    use crate::domain::types::{EmailAddress, InquiryId, PersonName, RequiredText, TravelerCount};

    fn config(username: Option<&str>) -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: username.map(str::to_string),
            password: Some("secret".to_string()),
            from_email: "site@wandrivo.example".to_string(),
            to_email: "bookings@wandrivo.example".to_string(),
            timeout_secs: 20,
        }
    }

    fn inquiry() -> Inquiry {
        NewInquiry {
            name: PersonName::new("Asha").unwrap(),
            email: EmailAddress::new("asha@example.com").unwrap(),
            city_of_residence: RequiredText::new("Pune").unwrap(),
            phone_number: RequiredText::new("123").unwrap(),
            whatsapp: None,
            travel_destination: RequiredText::new("Goa").unwrap(),
            date_of_travel: RequiredText::new("December").unwrap(),
            number_of_people: TravelerCount::new(2).unwrap(),
            vacation_type: RequiredText::new("beach").unwrap(),
            budget_range: RequiredText::new("any").unwrap(),
            message: None,
        }
        .into_inquiry(InquiryId::new(1).unwrap(), Utc::now())
    }

    #[test]
    fn classifies_reply_codes() {
        let config = config(Some("user"));

        let err = classify_failure(false, Some("535"), "bad credentials".into(), &config);
        assert_eq!(err.code(), "EAUTH");

        let err = classify_failure(false, Some("550"), "no such user".into(), &config);
        assert_eq!(err.code(), "EENVELOPE");

        let err = classify_failure(false, Some("421"), "try later".into(), &config);
        assert_eq!(err.code(), "ETRANSPORT");

        let err = classify_failure(false, None, "connection refused".into(), &config);
        assert_eq!(err.code(), "ETRANSPORT");

        let err = classify_failure(true, None, "timed out".into(), &config);
        assert_eq!(err, NotificationError::Timeout(Duration::from_secs(20)));
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_connecting() {
        let notifier = SmtpNotifier::new(config(None), Tera::default());

        let err = notifier.send_inquiry(&inquiry()).await.unwrap_err();
        assert_eq!(err.code(), "ECONFIG");

        let err = notifier.verify_connection().await.unwrap_err();
        assert_eq!(err.code(), "ECONFIG");

        let err = notifier.send_test().await.unwrap_err();
        assert_eq!(err.code(), "ECONFIG");
    }

    #[test]
    fn test_message_goes_to_the_operator() {
        let notifier = SmtpNotifier::new(config(Some("user")), Tera::default());

        let message = notifier.build_test_message("<t@wandrivo.example>").unwrap();
        let envelope = message.envelope();
        assert_eq!(
            envelope.to()[0].to_string(),
            "bookings@wandrivo.example"
        );
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Deployment Test Email - "));
        assert!(raw.contains("Message-ID: <t@wandrivo.example>"));
    }

    #[test]
    fn message_id_uses_sender_domain() {
        let notifier = SmtpNotifier::new(config(Some("user")), Tera::default());
        let id = notifier.message_id();
        assert!(id.starts_with('<'));
        assert!(id.ends_with("@wandrivo.example>"));
    }
}
