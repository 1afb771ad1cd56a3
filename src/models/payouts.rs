// src/models/payouts.rs

use rust_decimal::Decimal;
use serde::Serialize;

// --- Salários (turnos pendentes) ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WageLine {
    pub id: Option<String>,
    pub date: Option<String>, // YYYY-MM-DD, None se a data for inválida
    pub location: String,
    pub hours: Decimal,
    pub rate: Decimal,
    pub wage: Decimal,
    pub reimbursements: Decimal,
    pub daily_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WageStatement {
    pub hourly_rate: Decimal,
    pub lines: Vec<WageLine>,
    pub total_due: Decimal,
}

// --- Comissões (vendas não pagas) ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionLine {
    pub id: Option<String>,
    pub date: Option<String>,
    pub store_name: Option<String>,
    pub sale_type: String,
    pub revenue: Decimal,
    pub rate: Decimal,
    pub base_comm: Decimal,
    pub bonus: Decimal,
    pub total_earned: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionStatement {
    pub rep_id: String,
    pub lines: Vec<CommissionLine>,
    pub total_due: Decimal,
}

// --- Estimativa do ciclo atual (dashboard do embaixador) ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedPay {
    pub active_store_count: i64,
    pub hourly_rate: Decimal,
    pub pending_hours: Decimal,
    pub wages: Decimal,
    pub reimbursements: Decimal,
    pub unpaid_commission: Decimal,
    pub grand_total: Decimal,
    // Diferente de zero só quando a contagem cai exatamente num marco
    pub milestone_bonus: Decimal,
}
