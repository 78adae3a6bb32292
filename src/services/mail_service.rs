// src/services/mail_service.rs

use std::path::Path;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

/// Relay SMTP fixo (TLS implícito).
pub const SMTP_RELAY_HOST: &str = "smtp.gmail.com";
pub const SMTP_RELAY_PORT: u16 = 465;

pub const SUBJECT: &str = "Confirmação de Check-in";
pub const BODY: &str =
    "Olá!\n\nEm anexo segue o comprovativo da tua visita ao local.\n\nCumprimentos.";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("credenciais de e-mail em falta (EMAIL_USER / EMAIL_PASS)")]
    MissingCredentials,

    #[error("endereço inválido '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("não foi possível ler o anexo: {0}")]
    Attachment(#[from] std::io::Error),

    #[error("não foi possível montar a mensagem: {0}")]
    Build(String),

    #[error("{0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

// Envia o comprovativo a um destinatário
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, pdf_path: &Path) -> Result<(), MailError>;
}

#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// Monta a mensagem com o texto fixo e o PDF em anexo.
pub fn build_message(from: &str, to: &str, filename: &str, pdf: Vec<u8>) -> Result<Message, MailError> {
    let content_type =
        ContentType::parse("application/pdf").map_err(|e| MailError::Build(e.to_string()))?;

    Message::builder()
        .from(parse_mailbox(from)?)
        .to(parse_mailbox(to)?)
        .subject(SUBJECT)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(BODY.to_string()))
                .singlepart(Attachment::new(filename.to_string()).body(pdf, content_type)),
        )
        .map_err(|e| MailError::Build(e.to_string()))
}

// SMTP com TLS implícito. Uma ligação por envio, fechada no fim.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    config: MailerConfig,
}

impl SmtpMailer {
    pub fn new(config: MailerConfig) -> Self {
        Self { config }
    }

    pub fn has_credentials(&self) -> bool {
        self.config.username.is_some() && self.config.password.is_some()
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, pdf_path: &Path) -> Result<(), MailError> {
        let (Some(username), Some(password)) = (&self.config.username, &self.config.password) else {
            return Err(MailError::MissingCredentials);
        };

        let pdf = tokio::fs::read(pdf_path).await?;
        let filename = pdf_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let message = build_message(username, to, &filename, pdf)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)?
            .port(self.config.port)
            .credentials(Credentials::new(username.clone(), password.clone()))
            .build();

        transport.send(message).await?;

        tracing::info!(to = %to, "📧 Comprovativo enviado via SMTP");
        Ok(())
    }
}
