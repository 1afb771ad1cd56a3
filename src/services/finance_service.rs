// src/services/finance_service.rs

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;

use crate::{
    common::{
        coerce::non_empty,
        date_utils::{first_present, normalize_to_instant, DateInput},
        money::saturating_sum,
    },
    models::{
        finance::{CompanySummary, FinancialTotals},
        lead::Lead,
        policy::CompensationPolicy,
        sale::Sale,
        shift::Shift,
    },
    services::{billing_service::BillingService, compensation_service::CompensationService},
};

/// Início da janela quinzenal. `None` quando a janela passa do início do
/// calendário: tudo com data válida entra.
fn window_start(now: DateTime<Utc>, days: u32) -> Option<DateTime<Utc>> {
    TimeDelta::try_days(i64::from(days)).and_then(|span| now.checked_sub_signed(span))
}

/// Datas inválidas ou ausentes ficam fora da janela.
fn in_window(date: Option<&DateInput>, start: Option<DateTime<Utc>>) -> bool {
    match date.and_then(normalize_to_instant) {
        Some(instant) => start.is_none_or(|start| instant >= start),
        None => false,
    }
}

#[derive(Clone)]
pub struct FinanceService {
    policy: Arc<CompensationPolicy>,
    compensation: CompensationService,
    billing: BillingService,
}

impl FinanceService {
    pub fn new(
        policy: Arc<CompensationPolicy>,
        compensation: CompensationService,
        billing: BillingService,
    ) -> Self {
        Self {
            policy,
            compensation,
            billing,
        }
    }

    fn window_start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        window_start(now, self.policy.bi_weekly_window_days)
    }

    // =========================================================================
    //  1. TOTAIS A PARTIR DAS CONTAS FECHADAS
    // =========================================================================

    /// Receita e comissões de todo o histórico, receita da quinzena e
    /// comissões a pagar por embaixador.
    pub fn financial_totals_at(&self, leads: &[Lead], now: DateTime<Utc>) -> FinancialTotals {
        let start = self.window_start(now);
        let mut totals = FinancialTotals::default();

        for lead in leads.iter().filter(|lead| lead.is_closed()) {
            let revenue = lead.revenue();
            // Comissão gravada no documento tem prioridade sobre a calculada
            let commission = if lead.commission_earned.is_zero() {
                self.compensation.calculate_rep_commission(revenue)
            } else {
                lead.commission_earned
            };

            totals.total_lifetime_revenue = totals.total_lifetime_revenue.saturating_add(revenue);
            totals.total_lifetime_commissions =
                totals.total_lifetime_commissions.saturating_add(commission);

            let sold_on = first_present([lead.sold_date.as_ref(), lead.date.as_ref()]);
            if in_window(sold_on, start) {
                totals.bi_weekly_revenue = totals.bi_weekly_revenue.saturating_add(revenue);
            }

            if !lead.paid_status {
                let unpaid = totals
                    .unpaid_commissions_by_rep
                    .entry(lead.owner_id().to_string())
                    .or_default();
                *unpaid = unpaid.saturating_add(commission);
            }
        }

        totals
    }

    pub fn financial_totals(&self, leads: &[Lead]) -> FinancialTotals {
        self.financial_totals_at(leads, Utc::now())
    }

    // =========================================================================
    //  2. VISÃO DA EMPRESA (PAINEL ADMIN)
    // =========================================================================

    /// Lojas distintas por usuário, somando turnos, vendas e leads.
    pub fn store_counts(shifts: &[Shift], sales: &[Sale], leads: &[Lead]) -> BTreeMap<String, usize> {
        let mut stores: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

        let pairs = shifts
            .iter()
            .map(|s| (s.user_id.as_deref(), s.dispensary_name.as_deref()))
            .chain(sales.iter().map(|s| (s.user_id.as_deref(), s.dispensary_name.as_deref())))
            .chain(leads.iter().map(|l| (l.user_id.as_deref(), l.dispensary_name.as_deref())));

        for (user, store) in pairs {
            if let (Some(user), Some(store)) = (non_empty(user), non_empty(store)) {
                stores.entry(user).or_default().insert(store);
            }
        }

        stores
            .into_iter()
            .map(|(user, names)| (user.to_string(), names.len()))
            .collect()
    }

    /// Custo do turno para a empresa, pela base da tabela por hora:
    /// (salário, reembolso).
    fn shift_cost(&self, shift: &Shift) -> (Decimal, Decimal) {
        let wage = shift.hours_worked.saturating_mul(self.policy.hourly.base_rate);
        let reimbursement = self.compensation.calculate_reimbursement(
            shift.miles_traveled,
            shift.toll_amount,
            shift.has_vehicle(),
        );
        (wage, reimbursement)
    }

    pub fn company_summary_at(
        &self,
        shifts: &[Shift],
        sales: &[Sale],
        leads: &[Lead],
        now: DateTime<Utc>,
    ) -> CompanySummary {
        let mut summary = CompanySummary {
            store_counts: Self::store_counts(shifts, sales, leads),
            ..Default::default()
        };

        for (user, count) in &summary.store_counts {
            let count = i64::try_from(*count).unwrap_or(i64::MAX);
            let bonus = self.compensation.calculate_total_lifetime_bonuses(count);
            if bonus > Decimal::ZERO {
                summary.bonuses_by_user.insert(user.clone(), bonus);
                summary.total_bonuses = summary.total_bonuses.saturating_add(bonus);
            }
        }

        // --- Vendas ---
        summary.total_sales = saturating_sum(sales.iter().map(Sale::gross));
        summary.sales_revenue = self.compensation.calculate_company_commission(summary.total_sales);
        summary.sales_commissions = self.compensation.calculate_rep_commission(summary.total_sales);

        // --- Turnos ---
        for shift in shifts {
            let (wage, reimbursement) = self.shift_cost(shift);
            summary.shift_revenue = summary
                .shift_revenue
                .saturating_add(self.billing.calculate_shift_client_revenue(shift));
            summary.shift_wages = summary.shift_wages.saturating_add(wage);
            summary.shift_reimbursements = summary.shift_reimbursements.saturating_add(reimbursement);

            if shift.is_pending() {
                summary.projected_payroll = summary
                    .projected_payroll
                    .saturating_add(wage)
                    .saturating_add(reimbursement);
            }
        }

        summary.wages_and_expenses = summary.shift_wages.saturating_add(summary.shift_reimbursements);
        summary.commissions_and_bonuses = summary.sales_commissions.saturating_add(summary.total_bonuses);

        summary.company_gross = summary.shift_revenue.saturating_add(summary.sales_revenue);
        summary.net_profit = summary.company_gross.saturating_sub(
            summary
                .wages_and_expenses
                .saturating_add(summary.commissions_and_bonuses),
        );
        summary.shift_net = summary.shift_revenue.saturating_sub(summary.wages_and_expenses);
        summary.quarterly_net = summary.sales_revenue.saturating_sub(summary.sales_commissions);

        // --- Quinzena ---
        let start = self.window_start(now);
        let recent_sales =
            saturating_sum(sales.iter().filter(|s| in_window(s.date.as_ref(), start)).map(Sale::gross));
        let recent_shifts: Vec<&Shift> = shifts
            .iter()
            .filter(|shift| in_window(shift.worked_on(), start))
            .collect();

        let recent_shift_revenue = saturating_sum(
            recent_shifts
                .iter()
                .map(|shift| self.billing.calculate_shift_client_revenue(shift)),
        );
        let recent_shift_cost = saturating_sum(recent_shifts.iter().map(|shift| {
            let (wage, reimbursement) = self.shift_cost(shift);
            wage.saturating_add(reimbursement)
        }));

        summary.bi_weekly_gross = self
            .compensation
            .calculate_company_commission(recent_sales)
            .saturating_add(recent_shift_revenue);
        let bi_weekly_payouts = self
            .compensation
            .calculate_rep_commission(recent_sales)
            .saturating_add(recent_shift_cost);
        summary.bi_weekly_net = summary.bi_weekly_gross.saturating_sub(bi_weekly_payouts);

        tracing::info!(
            gross = %summary.company_gross,
            net = %summary.net_profit,
            bi_weekly_net = %summary.bi_weekly_net,
            users = summary.store_counts.len(),
            "📊 Resumo financeiro da empresa calculado"
        );

        summary
    }

    pub fn company_summary(&self, shifts: &[Shift], sales: &[Sale], leads: &[Lead]) -> CompanySummary {
        self.company_summary_at(shifts, sales, leads, Utc::now())
    }
}
