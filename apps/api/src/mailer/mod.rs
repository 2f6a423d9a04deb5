//! Outbound email for generated resumes.
//!
//! `deliver` validates the recipient before handing anything to a
//! [`MailTransport`], so a malformed address never opens a connection.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{error, info};

pub const RESUME_SUBJECT: &str = "Your AI-Generated Resume";
pub const ATTACHMENT_FILENAME: &str = "resume.pdf";
const SENT_MESSAGE: &str = "Email sent successfully!";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("email pattern is valid"));

/// Basic `local-part@domain.tld` shape check.
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_PATTERN.is_match(address)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailError {
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("SMTP authentication failed: {0}")]
    Authentication(String),

    #[error("Could not reach the mail server: {0}")]
    Connection(String),

    #[error("Recipient rejected by the mail server: {0}")]
    RecipientRejected(String),

    #[error("Mail server refused the message: {0}")]
    Rejected(String),

    #[error("Could not build the message: {0}")]
    Message(String),
}

/// Successful delivery, with a message fit to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailReceipt {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    /// PDF bytes attached as `resume.pdf`.
    pub attachment: Option<Vec<u8>>,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<MailReceipt, MailError>;
}

/// Trims `recipient` and checks its shape.
pub fn validate_recipient(recipient: &str) -> Result<&str, MailError> {
    let recipient = recipient.trim();
    if recipient.is_empty() {
        return Err(MailError::InvalidRecipient(
            "Please provide a receiver email.".to_string(),
        ));
    }
    if !is_valid_email(recipient) {
        return Err(MailError::InvalidRecipient(
            "Please enter a valid email address.".to_string(),
        ));
    }
    Ok(recipient)
}

/// Validates `recipient` and sends the resume text, optionally with the PDF.
pub async fn deliver(
    transport: &dyn MailTransport,
    recipient: &str,
    body: String,
    attachment: Option<Vec<u8>>,
) -> Result<MailReceipt, MailError> {
    let recipient = validate_recipient(recipient)?;
    let mail = OutgoingMail {
        recipient: recipient.to_string(),
        subject: RESUME_SUBJECT.to_string(),
        body,
        attachment,
    };

    match transport.send(mail).await {
        Ok(receipt) => {
            info!(recipient, "Resume email sent");
            Ok(receipt)
        }
        Err(e) => {
            error!(recipient, error = %e, "Failed to send resume email");
            Err(e)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SMTP transport
// ────────────────────────────────────────────────────────────────────────────

/// Authenticated STARTTLS SMTP relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    pub fn new(host: &str, port: u16, sender: &str, password: &str) -> Result<Self, MailError> {
        let sender_box: Mailbox = sender
            .parse()
            .map_err(|e| MailError::Message(format!("invalid sender address: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| MailError::Connection(e.to_string()))?
            .port(port)
            .credentials(Credentials::new(sender.to_string(), password.to_string()))
            .build();

        Ok(Self {
            transport,
            sender: sender_box,
        })
    }

    fn build_message(&self, mail: OutgoingMail) -> Result<Message, MailError> {
        let to: Mailbox = mail
            .recipient
            .parse()
            .map_err(|e: lettre::address::AddressError| MailError::InvalidRecipient(e.to_string()))?;

        let builder = Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject(mail.subject);

        let message = match mail.attachment {
            Some(pdf) => {
                let pdf_type = ContentType::parse("application/pdf")
                    .map_err(|e| MailError::Message(e.to_string()))?;
                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::plain(mail.body))
                        .singlepart(Attachment::new(ATTACHMENT_FILENAME.to_string()).body(pdf, pdf_type)),
                )
            }
            None => builder.header(ContentType::TEXT_PLAIN).body(mail.body),
        };

        message.map_err(|e| MailError::Message(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<MailReceipt, MailError> {
        let message = self.build_message(mail)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| classify_smtp_error(&e))?;
        Ok(MailReceipt {
            message: SENT_MESSAGE.to_string(),
        })
    }
}

fn classify_smtp_error(e: &lettre::transport::smtp::Error) -> MailError {
    match e.status() {
        Some(code) => classify_reply(u16::from(code), e.to_string()),
        None => MailError::Connection(e.to_string()),
    }
}

/// Maps an SMTP reply code to a failure reason.
fn classify_reply(code: u16, detail: String) -> MailError {
    match code {
        530 | 534 | 535 | 454 => MailError::Authentication(detail),
        550 | 551 | 553 => MailError::RecipientRejected(detail),
        421 => MailError::Connection(detail),
        _ => MailError::Rejected(detail),
    }
}
