//! Motor de remuneração e pontuação dos portais King of the Crop.
//!
//! Valor da hora por lojas ativas, reembolso de milhagem, comissões,
//! faturamento por turno, bônus de marcos, regra de conta ativa por marca e
//! ranking trimestral. Tudo puro e síncrono: os registros entram prontos
//! (exportados do Firestore/Supabase) e só números saem.

pub mod common;
pub mod config;
pub mod models;
pub mod services;

pub use common::date_utils::{
    current_quarter_label, is_in_current_quarter, normalize_to_instant, DateInput,
};
pub use common::error::AppError;
pub use config::{AppConfig, AppState};
