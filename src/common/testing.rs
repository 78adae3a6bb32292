// Dublês partilhados pelos testes dos serviços e dos handlers.

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    db::RegistryRepository,
    models::registry::RegistryRecord,
    services::{
        mail_service::{MailError, Mailer},
        voucher_service::{voucher_path, VoucherRenderer},
    },
};

pub fn registry() -> RegistryRepository {
    RegistryRepository::from_records(vec![
        RegistryRecord::new("12345", "Casa Bourou"),
        RegistryRecord::new("777", "Quinta do Gerês"),
    ])
}

// Escreve um ficheiro no caminho real do comprovativo, sem passar pelo genpdf.
pub struct FakeRenderer {
    output_dir: PathBuf,
    names: Mutex<Vec<String>>,
}

impl FakeRenderer {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            names: Mutex::new(Vec::new()),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }
}

impl VoucherRenderer for FakeRenderer {
    fn render(&self, email: &str, registo: &str, nome: &str) -> Result<PathBuf, AppError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = voucher_path(&self.output_dir, email, registo);
        std::fs::write(&path, format!("%PDF {} {}", nome, email))?;
        self.names.lock().unwrap().push(nome.to_string());
        Ok(path)
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, PathBuf)>>,
    failure: Option<String>,
}

impl RecordingMailer {
    pub fn failing(reason: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(reason.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<(String, PathBuf)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, pdf_path: &Path) -> Result<(), MailError> {
        if let Some(reason) = &self.failure {
            return Err(MailError::Build(reason.clone()));
        }
        self.sent.lock().unwrap().push((to.to_string(), pdf_path.to_path_buf()));
        Ok(())
    }
}
