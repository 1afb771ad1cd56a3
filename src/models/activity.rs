// src/models/activity.rs

use serde::Serialize;

/// Situação de uma conta para a tela de contas ativas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActivityStatus {
    /// Carrega alguma marca permanente (ou é uma conta antiga sem marcas).
    Standard,
    /// Só a marca temporária; ainda dentro da janela.
    ExpiresIn { months: i64 },
    /// Só a marca temporária; janela encerrada.
    GracePeriod,
}
