// src/common/error.rs

use std::path::PathBuf;

use thiserror::Error;

// Os cálculos nunca falham. Erros só existem na borda: carregar
// configuração, validar a política e ler o snapshot exportado.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação da política de remuneração: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Nenhum snapshot informado (defina SNAPSHOT_PATH ou passe o caminho como argumento)")]
    MissingSnapshotPath,

    #[error("Falha ao ler o arquivo {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON inválido em {path}: {source}")]
    JsonError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Falha ao serializar o relatório: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::FileReadError { path: path.into(), source }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        AppError::JsonError { path: path.into(), source }
    }

    /// Detalhes campo a campo para erros de validação, no formato que o
    /// painel administrativo exibe.
    pub fn validation_details(&self) -> Option<Vec<(String, Vec<String>)>> {
        let AppError::ValidationError(errors) = self else {
            return None;
        };

        let mut details: Vec<(String, Vec<String>)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, field_errors)| {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        details.sort_by(|a, b| a.0.cmp(&b.0));
        Some(details)
    }
}
