use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Erros da aplicação. O envio de e-mail tem o seu próprio tipo (MailError),
// que nunca chega aqui: o check-in converte-o numa mensagem de estado.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuração inválida: {0}")]
    Config(String),

    #[error("Erro no registo de alojamentos: {0}")]
    Registry(String),

    #[error("Erro ao ler a folha de cálculo: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Erro ao ler o CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro ao gerar o PDF: {0}")]
    Render(String),

    #[error("Erro ao gerar a página: {0}")]
    Template(#[from] askama::Error),

    #[error("Erro de I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("Falha na task de geração: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Nenhum destes erros é culpa do utilizador: todos viram 500.
        // O detalhe fica no log, o cliente recebe uma mensagem genérica.
        tracing::error!("Erro Interno do Servidor: {}", self);

        let body = Json(json!({ "error": "Ocorreu um erro inesperado." }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
