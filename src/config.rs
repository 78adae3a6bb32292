// src/config.rs

use std::{env, net::SocketAddr, path::PathBuf, sync::Arc};

use crate::{
    common::error::AppError,
    db::RegistryRepository,
    services::{
        mail_service::{SMTP_RELAY_HOST, SMTP_RELAY_PORT},
        voucher_service::load_fonts,
        CheckinService, MailerConfig, SmtpMailer, VoucherService,
    },
};

#[derive(Debug, Clone)]
pub struct Config {
    pub email_user: Option<String>,
    pub email_pass: Option<String>,
    pub registry_path: PathBuf,
    pub logo_path: PathBuf,
    pub fonts_dir: PathBuf,
    pub font_family: String,
    pub output_dir: PathBuf,
    pub app_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Variáveis vazias contam como ausentes.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let app_addr = get_or("APP_ADDR", "0.0.0.0:7860")
            .parse()
            .map_err(|e| AppError::Config(format!("APP_ADDR: {}", e)))?;

        Ok(Self {
            email_user: get("EMAIL_USER"),
            email_pass: get("EMAIL_PASS"),
            registry_path: get_or("REGISTRY_PATH", "alojamentos.xlsx").into(),
            logo_path: get_or("LOGO_PATH", "logo.png").into(),
            fonts_dir: get_or("FONTS_DIR", "./fonts").into(),
            font_family: get_or("FONT_FAMILY", "DejaVuSans"),
            output_dir: get_or("OUTPUT_DIR", "pdfs").into(),
            app_addr,
        })
    }

    // O relay não é configurável: só as credenciais vêm do ambiente.
    pub fn mailer_config(&self) -> MailerConfig {
        MailerConfig {
            host: SMTP_RELAY_HOST.to_string(),
            port: SMTP_RELAY_PORT,
            username: self.email_user.clone(),
            password: self.email_pass.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub checkin_service: CheckinService,
}

impl AppState {
    // Tudo o que pode falhar no arranque falha aqui: folha de cálculo e fontes.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let registry = RegistryRepository::load(&config.registry_path)?;
        if registry.is_empty() {
            tracing::warn!("⚠️ {} não tem alojamentos.", config.registry_path.display());
        }
        tracing::info!(
            "✅ {} alojamentos carregados de {}",
            registry.len(),
            config.registry_path.display()
        );

        let fonts = load_fonts(&config.fonts_dir, &config.font_family)?;
        let voucher_service = VoucherService::new(
            fonts,
            config.output_dir.clone(),
            config.logo_path.clone(),
        );

        let mailer = SmtpMailer::new(config.mailer_config());
        if !mailer.has_credentials() {
            tracing::warn!("⚠️ EMAIL_USER/EMAIL_PASS não definidas: os envios vão falhar.");
        }

        let checkin_service = CheckinService::new(
            Arc::new(registry),
            Arc::new(voucher_service),
            Arc::new(mailer),
        );

        Ok(Self { checkin_service })
    }
}
