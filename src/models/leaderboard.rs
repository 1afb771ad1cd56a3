// src/models/leaderboard.rs

use rust_decimal::Decimal;
use serde::Serialize;

/// Linha do ranking trimestral (King of the Crop).
///
/// Calculada a cada chamada a partir dos leads; nada disso é persistido.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepScore {
    pub name: String,
    pub score: Decimal,
    pub sales_count: usize,
    pub leads_count: usize,
    // Receita de todo o histórico, não só do trimestre
    pub revenue: Decimal,
}
