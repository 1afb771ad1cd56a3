//! Utilitários comuns dos testes de integração

#![allow(dead_code)]

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use kingcrop_engine::AppState;
use rust_decimal::Decimal;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn state() -> AppState {
    AppState::default()
}

/// Instante fixo no meio do terceiro trimestre de 2025.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 14, 15, 0, 0).unwrap()
}

/// Grava um arquivo temporário com nome único para o teste.
pub fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("kingcrop-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}
