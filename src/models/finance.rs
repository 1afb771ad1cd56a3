// src/models/finance.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

/// Totais financeiros a partir das contas fechadas.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTotals {
    pub total_lifetime_revenue: Decimal,
    pub total_lifetime_commissions: Decimal,
    pub bi_weekly_revenue: Decimal,
    pub unpaid_commissions_by_rep: BTreeMap<String, Decimal>,
}

/// Visão da empresa para o painel administrativo.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub store_counts: BTreeMap<String, usize>,
    pub bonuses_by_user: BTreeMap<String, Decimal>,
    pub total_bonuses: Decimal,

    pub total_sales: Decimal,
    pub sales_revenue: Decimal, // comissão da empresa sobre as vendas
    pub sales_commissions: Decimal, // comissão dos embaixadores sobre as vendas

    pub shift_revenue: Decimal,
    pub shift_wages: Decimal,
    pub shift_reimbursements: Decimal,

    // Saídas para os embaixadores
    pub wages_and_expenses: Decimal,
    pub commissions_and_bonuses: Decimal,

    pub company_gross: Decimal,
    pub net_profit: Decimal,
    pub shift_net: Decimal,
    pub quarterly_net: Decimal, // margem das vendas (empresa - embaixador)

    // Salários + reembolsos dos turnos ainda pendentes
    pub projected_payroll: Decimal,

    pub bi_weekly_gross: Decimal,
    pub bi_weekly_net: Decimal,
}
