// src/models/checkin.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// O pedido de check-in tal como chega do formulário
#[derive(Debug, Clone, Validate)]
pub struct CheckinRequest {
    // Só exigimos o "@": qualquer outra verificação recusaria e-mails que o
    // formulário sempre aceitou.
    #[validate(contains(pattern = "@", message = "O e-mail fornecido é inválido."))]
    pub email: String,
    pub registo: String,
}

// Os três estados finais de um check-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinOutcome {
    InvalidEmail,
    Sent { email: String },
    SendFailed { reason: String },
}

impl CheckinOutcome {
    pub fn status(&self) -> CheckinStatus {
        match self {
            CheckinOutcome::InvalidEmail => CheckinStatus::InvalidEmail,
            CheckinOutcome::Sent { .. } => CheckinStatus::SentOk,
            CheckinOutcome::SendFailed { .. } => CheckinStatus::SendFailed,
        }
    }

    /// A mensagem mostrada no campo "Resultado".
    pub fn message(&self) -> String {
        match self {
            CheckinOutcome::InvalidEmail => "❌ Email inválido. Tenta novamente.".to_string(),
            CheckinOutcome::Sent { email } => format!("✅ PDF enviado para {} com sucesso!", email),
            CheckinOutcome::SendFailed { reason } => format!("❌ Erro ao enviar o e-mail: {}", reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckinStatus {
    InvalidEmail,
    SentOk,
    SendFailed,
}

// Campos do formulário HTML. Campos em falta contam como texto vazio.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckinForm {
    pub registo: String,
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckinPayload {
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[schema(example = "12345")]
    pub registo: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckinResponse {
    pub status: CheckinStatus,
    #[schema(example = "✅ PDF enviado para ana@example.com com sucesso!")]
    pub message: String,
}

impl From<CheckinOutcome> for CheckinResponse {
    fn from(outcome: CheckinOutcome) -> Self {
        Self {
            status: outcome.status(),
            message: outcome.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_without_at_sign_fails_validation() {
        let request = CheckinRequest {
            email: "not-an-email".to_string(),
            registo: "12345".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn any_email_with_at_sign_passes_validation() {
        for email in ["ana@example.com", "@", "a@b", " x@ "] {
            let request = CheckinRequest {
                email: email.to_string(),
                registo: String::new(),
            };
            assert!(request.validate().is_ok(), "{email} deveria ser aceite");
        }
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(
            CheckinOutcome::InvalidEmail.message(),
            "❌ Email inválido. Tenta novamente."
        );
        assert_eq!(
            CheckinOutcome::Sent { email: "ana@example.com".into() }.message(),
            "✅ PDF enviado para ana@example.com com sucesso!"
        );
        assert_eq!(
            CheckinOutcome::SendFailed { reason: "timeout".into() }.message(),
            "❌ Erro ao enviar o e-mail: timeout"
        );
    }

    #[test]
    fn response_serializes_status_in_snake_case() {
        let response = CheckinResponse::from(CheckinOutcome::Sent { email: "a@b".into() });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "sent_ok");
    }
}
