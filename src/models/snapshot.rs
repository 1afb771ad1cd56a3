// src/models/snapshot.rs

use serde::{Deserialize, Serialize};

use crate::models::{
    finance::{CompanySummary, FinancialTotals},
    lead::Lead,
    leaderboard::RepScore,
    sale::Sale,
    shift::Shift,
};

/// Exportação das coleções que o relatório consome.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub leads: Vec<Lead>,
    pub shifts: Vec<Shift>,
    pub sales: Vec<Sale>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub season: String,
    pub leaderboard: Vec<RepScore>,
    pub financial_totals: FinancialTotals,
    pub company_summary: CompanySummary,
    pub active_store_count: usize,
}
