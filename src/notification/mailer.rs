use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::{debug, info};

use crate::config::{Config, MailCredentials, MailOverrides};
use crate::core::constants::mail;
use crate::core::error::{PathfinderError, Result};

/// A report ready to be mailed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
    pub subject: String,
    pub plain_text: String,
    /// Sent as the `text/html` alternative when present
    pub html: Option<String>,
}

/// Delivers a [`Mail`] somewhere.
#[async_trait]
pub trait MailDispatch: Send + Sync {
    async fn dispatch(&self, mail: &Mail) -> Result<()>;
}

/// Sends mail through the fixed SMTP relay over STARTTLS.
///
/// Credentials are resolved from the configuration at dispatch time, so a
/// run that never mails does not need them.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    config: Config,
    overrides: MailOverrides,
    relay: String,
    port: u16,
    /// Upgrade the session with STARTTLS; off only for local test relays
    starttls: bool,
}

impl SmtpMailer {
    pub fn new(config: Config, overrides: MailOverrides) -> Self {
        Self {
            config,
            overrides,
            relay: mail::SMTP_RELAY.to_string(),
            port: mail::SMTP_PORT,
            starttls: true,
        }
    }

    /// Sender, recipient and password for the next dispatch.
    pub fn credentials(&self) -> Result<MailCredentials> {
        self.config.mail_credentials(&self.overrides)
    }

    /// Build the MIME message: `multipart/alternative` when HTML is given,
    /// a single plain-text part otherwise.
    pub fn build_message(&self, mail: &Mail) -> Result<Message> {
        build_message_with(&self.credentials()?, mail)
    }
}

fn build_message_with(credentials: &MailCredentials, mail: &Mail) -> Result<Message> {
    let from = parse_mailbox(&credentials.from, "sender")?;
    let to = parse_mailbox(&credentials.to, "recipient")?;
    let builder = Message::builder()
        .from(from)
        .to(to)
        .subject(mail.subject.as_str());

    let message = match mail.html {
        Some(ref html) => builder.multipart(MultiPart::alternative_plain_html(
            mail.plain_text.clone(),
            html.clone(),
        )),
        None => builder.singlepart(SinglePart::plain(mail.plain_text.clone())),
    };

    message.map_err(|e| PathfinderError::Mail(format!("Could not build message: {e}")))
}

fn parse_mailbox(address: &str, role: &str) -> Result<Mailbox> {
    address
        .parse()
        .map_err(|e| PathfinderError::Mail(format!("Invalid {role} address '{address}': {e}")))
}

/// Whether an SMTP reply code means the relay refused our login.
pub fn is_auth_rejection(code: &str) -> bool {
    mail::AUTH_REJECTION_CODES.contains(&code)
}

fn classify_smtp_error(err: lettre::transport::smtp::Error, login: &str) -> PathfinderError {
    let code = err.status().map(|c| c.to_string());

    match code.as_deref() {
        Some(code) if is_auth_rejection(code) => PathfinderError::MailAuth(format!(
            "the mail relay rejected the login for '{login}' ({err}). \
             Check [email] from and password in the config file."
        )),
        _ => PathfinderError::Mail(format!("Could not send mail: {err}")),
    }
}

#[async_trait]
impl MailDispatch for SmtpMailer {
    async fn dispatch(&self, mail: &Mail) -> Result<()> {
        let credentials = self.credentials()?;
        let message = build_message_with(&credentials, mail)?;

        let builder = if self.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.relay).map_err(|e| {
                PathfinderError::Mail(format!("Could not set up TLS for {}: {e}", self.relay))
            })?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(self.relay.as_str())
        };
        let transport = builder
            .port(self.port)
            .credentials(Credentials::new(
                credentials.from.clone(),
                credentials.password.clone(),
            ))
            .build();

        debug!("Connecting to {}:{}", self.relay, self.port);
        transport
            .send(message)
            .await
            .map_err(|e| classify_smtp_error(e, &credentials.from))?;

        info!("Mail '{}' sent to {}", mail.subject, credentials.to);
        Ok(())
    }
}
