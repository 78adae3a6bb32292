// src/services/checkin_service.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    common::error::AppError,
    db::RegistryRepository,
    models::checkin::{CheckinOutcome, CheckinRequest},
    services::{mail_service::Mailer, voucher_service::VoucherRenderer},
};

#[derive(Clone)]
pub struct CheckinService {
    registry: Arc<RegistryRepository>,
    renderer: Arc<dyn VoucherRenderer>,
    mailer: Arc<dyn Mailer>,
}

impl CheckinService {
    pub fn new(
        registry: Arc<RegistryRepository>,
        renderer: Arc<dyn VoucherRenderer>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self { registry, renderer, mailer }
    }

    /// Valida, resolve o nome, gera o comprovativo e envia-o.
    ///
    /// Só o envio é convertido numa mensagem de estado. Um erro ao gerar o
    /// PDF sobe como `AppError`, e o PDF fica no disco mesmo que o envio falhe.
    pub async fn checkin(&self, email: &str, registo: &str) -> Result<CheckinOutcome, AppError> {
        let request = CheckinRequest {
            email: email.to_owned(),
            registo: registo.to_owned(),
        };

        if request.validate().is_err() {
            tracing::warn!("Check-in recusado: e-mail inválido ({:?})", request.email);
            return Ok(CheckinOutcome::InvalidEmail);
        }

        let nome = self.registry.find_name(&request.registo);
        tracing::info!(registo = %request.registo, nome = %nome, "📍 Check-in");

        let renderer = Arc::clone(&self.renderer);
        let (email_owned, registo_owned) = (request.email.clone(), request.registo.clone());
        let pdf_path = tokio::task::spawn_blocking(move || {
            renderer.render(&email_owned, &registo_owned, &nome)
        })
        .await??;

        match self.mailer.send(&request.email, &pdf_path).await {
            Ok(()) => Ok(CheckinOutcome::Sent { email: request.email }),
            Err(e) => {
                tracing::error!("🔥 Falha ao enviar o e-mail para {}: {}", request.email, e);
                Ok(CheckinOutcome::SendFailed { reason: e.to_string() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::testing::{registry, FakeRenderer, RecordingMailer},
        db::registry_repo::UNKNOWN_NAME,
        models::checkin::CheckinStatus,
    };
    use std::path::PathBuf;

    struct Harness {
        service: CheckinService,
        renderer: Arc<FakeRenderer>,
        mailer: Arc<RecordingMailer>,
        dir: tempfile::TempDir,
    }

    fn harness(mailer: RecordingMailer) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let renderer = Arc::new(FakeRenderer::new(dir.path().join("pdfs")));
        let mailer = Arc::new(mailer);
        let service = CheckinService::new(Arc::new(registry()), renderer.clone(), mailer.clone());
        Harness { service, renderer, mailer, dir }
    }

    #[tokio::test]
    async fn known_registo_renders_and_sends() {
        let h = harness(RecordingMailer::default());

        let outcome = h.service.checkin("ana@example.com", "12345").await.unwrap();

        assert_eq!(outcome.message(), "✅ PDF enviado para ana@example.com com sucesso!");
        assert_eq!(h.renderer.names(), vec!["Casa Bourou".to_string()]);

        let expected = h.dir.path().join("pdfs/checkin_ana_example_com_12345.pdf");
        assert!(expected.exists());
        assert_eq!(h.mailer.sent(), vec![("ana@example.com".to_string(), expected)]);
    }

    #[tokio::test]
    async fn invalid_email_stops_before_any_side_effect() {
        let h = harness(RecordingMailer::default());

        let outcome = h.service.checkin("not-an-email", "12345").await.unwrap();

        assert_eq!(outcome, CheckinOutcome::InvalidEmail);
        assert_eq!(outcome.message(), "❌ Email inválido. Tenta novamente.");
        assert!(h.renderer.names().is_empty());
        assert!(h.mailer.sent().is_empty());
        assert!(!h.dir.path().join("pdfs").exists());
    }

    #[tokio::test]
    async fn unknown_registo_still_sends_with_sentinel_name() {
        let h = harness(RecordingMailer::default());

        let outcome = h.service.checkin("b@x.com", "99999").await.unwrap();

        assert_eq!(outcome, CheckinOutcome::Sent { email: "b@x.com".to_string() });
        assert_eq!(h.renderer.names(), vec![UNKNOWN_NAME.to_string()]);
        assert_eq!(h.mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn send_failure_becomes_status_and_keeps_pdf() {
        let h = harness(RecordingMailer::failing("535 autenticação recusada"));

        let outcome = h.service.checkin("ana@example.com", "12345").await.unwrap();

        assert_eq!(outcome.status(), CheckinStatus::SendFailed);
        let message = outcome.message();
        assert!(message.starts_with("❌ Erro ao enviar o e-mail: "));
        assert!(message.contains("535 autenticação recusada"));
        assert!(h.dir.path().join("pdfs/checkin_ana_example_com_12345.pdf").exists());
    }

    #[tokio::test]
    async fn repeated_checkin_overwrites_same_file() {
        let h = harness(RecordingMailer::default());

        h.service.checkin("ana@example.com", "12345").await.unwrap();
        h.service.checkin("ana@example.com", " 12345").await.unwrap();

        let files: Vec<PathBuf> = std::fs::read_dir(h.dir.path().join("pdfs"))
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn render_failure_is_not_a_status() {
        let dir = tempfile::tempdir().unwrap();
        // O diretório de saída é um ficheiro: create_dir_all falha
        let blocker = dir.path().join("pdfs");
        std::fs::write(&blocker, b"").unwrap();

        let mailer = Arc::new(RecordingMailer::default());
        let service = CheckinService::new(
            Arc::new(registry()),
            Arc::new(FakeRenderer::new(blocker)),
            mailer.clone(),
        );

        let result = service.checkin("ana@example.com", "12345").await;
        assert!(result.is_err());
        assert!(mailer.sent().is_empty());
    }
}
