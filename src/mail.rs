//! Contact-form email relay.
//!
//! Messages are sent synchronously from the handler's point of view: the
//! request waits for the relay to accept or reject the mail. Nothing is
//! queued or retried.

use crate::blog::{require, ValidationError};
use crate::config::SmtpConfig;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

pub const CONTACT_SUBJECT: &str = "Contact Form Submission";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("invalid mailbox {0:?}: {1}")]
    Address(String, lettre::address::AddressError),
    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("mail relay failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// A contact-form submission. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// What actually goes to the relay. The recipient is fixed by the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub reply_to: String,
    pub subject: String,
    pub body: String,
}

impl ContactMessage {
    /// Only checks that every field is filled in; formats are not checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&[
            ("Name", self.name.as_str()),
            ("Email", self.email.as_str()),
            ("Phone", self.phone.as_str()),
            ("Message", self.message.as_str()),
        ])
    }

    pub fn into_mail(self) -> OutgoingMail {
        let body = format!(
            "Name: {}\nEmail: {}\nNumber: {}\nMessage:\n{}",
            self.name, self.email, self.phone, self.message
        );

        OutgoingMail {
            reply_to: self.email,
            subject: CONTACT_SUBJECT.to_owned(),
            body,
        }
    }
}

#[async_trait]
pub trait MailRelay: Send + Sync + 'static {
    /// Hands one message to the relay, returning once it was accepted.
    async fn send(&self, mail: OutgoingMail) -> Result<(), RelayError>;
}

/// Submits over SMTP with STARTTLS and login, addressed to the operator.
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    mailbox: Mailbox,
}

impl SmtpRelay {
    pub fn new(config: &SmtpConfig) -> Result<Self, RelayError> {
        let mailbox = parse_mailbox(&config.mailbox)?;
        let mut transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        if let Some(port) = config.port {
            transport = transport.port(port);
        }
        let transport = transport.build();

        Ok(Self { transport, mailbox })
    }
}

#[async_trait]
impl MailRelay for SmtpRelay {
    async fn send(&self, mail: OutgoingMail) -> Result<(), RelayError> {
        let builder = match parse_mailbox(&mail.reply_to) {
            Ok(sender) => Message::builder().from(sender.clone()).reply_to(sender),
            Err(err) => {
                tracing::warn!("Sending contact message from the operator mailbox: {err}");
                Message::builder().from(self.mailbox.clone())
            }
        };

        let message = builder
            .to(self.mailbox.clone())
            .subject(mail.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body)?;

        self.transport.send(message).await?;
        Ok(())
    }
}

/// Used when no SMTP host is configured: the message only goes to the log.
pub struct LogRelay;

#[async_trait]
impl MailRelay for LogRelay {
    async fn send(&self, mail: OutgoingMail) -> Result<(), RelayError> {
        tracing::info!(
            reply_to = %mail.reply_to,
            subject = %mail.subject,
            "SMTP is not configured, contact message not sent:\n{}",
            mail.body
        );
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, RelayError> {
    address
        .parse()
        .map_err(|err| RelayError::Address(address.to_owned(), err))
}
