// src/services/payout_service.rs

use rust_decimal::Decimal;

use crate::{
    common::{
        date_utils::{normalize_to_instant, DateInput},
        money::saturating_sum,
    },
    models::{
        payouts::{CommissionLine, CommissionStatement, EstimatedPay, WageLine, WageStatement},
        sale::Sale,
        shift::Shift,
    },
    services::compensation_service::CompensationService,
};

const DEFAULT_LOCATION: &str = "General Activation";
const DEFAULT_SALE_TYPE: &str = "Standard";

fn display_date(date: Option<&DateInput>) -> Option<String> {
    date.and_then(normalize_to_instant)
        .map(|instant| instant.format("%Y-%m-%d").to_string())
}

/// Extratos de pagamento do embaixador (salários e comissões pendentes).
#[derive(Clone)]
pub struct PayoutService {
    compensation: CompensationService,
}

impl PayoutService {
    pub fn new(compensation: CompensationService) -> Self {
        Self { compensation }
    }

    // --- SALÁRIOS ---

    /// Turnos pendentes pagos pelo valor da hora atual do embaixador.
    pub fn wage_statement(&self, shifts: &[Shift], active_store_count: i64) -> WageStatement {
        let rate = self.compensation.calculate_hourly_rate(active_store_count);

        let lines: Vec<WageLine> = shifts
            .iter()
            .filter(|shift| shift.is_pending())
            .map(|shift| {
                let wage = shift.hours_worked.saturating_mul(rate);
                let reimbursements = self.compensation.calculate_reimbursement(
                    shift.miles_traveled,
                    shift.toll_amount,
                    shift.has_vehicle,
                );

                WageLine {
                    id: shift.id.clone(),
                    date: display_date(shift.date.as_ref()),
                    location: shift
                        .dispensary_name
                        .clone()
                        .filter(|name| !name.is_empty())
                        .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
                    hours: shift.hours_worked,
                    rate,
                    wage,
                    reimbursements,
                    daily_total: wage.saturating_add(reimbursements),
                }
            })
            .collect();

        let total_due = saturating_sum(lines.iter().map(|line| line.daily_total));

        WageStatement {
            hourly_rate: rate,
            lines,
            total_due,
        }
    }

    // --- COMISSÕES ---

    /// Vendas do embaixador ainda não pagas, com a comissão de cada uma.
    pub fn commission_statement(&self, sales: &[Sale], rep_id: &str) -> CommissionStatement {
        let rate = self.compensation.policy().commission.rep_rate;

        let lines: Vec<CommissionLine> = sales
            .iter()
            .filter(|sale| sale.owner_id() == Some(rep_id) && !sale.is_paid())
            .map(|sale| {
                let revenue = sale.gross();
                let base_comm = self.compensation.calculate_rep_commission(revenue);
                // Spiffs por venda ainda não são registrados
                let bonus = Decimal::ZERO;

                CommissionLine {
                    id: sale.id.clone(),
                    date: display_date(sale.date.as_ref()),
                    store_name: sale.dispensary_name.clone(),
                    sale_type: sale
                        .sale_type
                        .clone()
                        .filter(|t| !t.is_empty())
                        .unwrap_or_else(|| DEFAULT_SALE_TYPE.to_string()),
                    revenue,
                    rate,
                    base_comm,
                    bonus,
                    total_earned: base_comm.saturating_add(bonus),
                }
            })
            .collect();

        let total_due = saturating_sum(lines.iter().map(|line| line.total_earned));

        CommissionStatement {
            rep_id: rep_id.to_string(),
            lines,
            total_due,
        }
    }

    // --- ESTIMATIVA DO CICLO ---

    /// Salários + reembolsos dos turnos pendentes + comissão não paga.
    pub fn estimated_pay(
        &self,
        shifts: &[Shift],
        sales: &[Sale],
        rep_id: &str,
        active_store_count: i64,
    ) -> EstimatedPay {
        let wages = self.wage_statement(shifts, active_store_count);
        let commissions = self.commission_statement(sales, rep_id);

        let pending_hours = saturating_sum(wages.lines.iter().map(|line| line.hours));
        let wage_total = saturating_sum(wages.lines.iter().map(|line| line.wage));
        let reimbursements = saturating_sum(wages.lines.iter().map(|line| line.reimbursements));

        let milestone_bonus = self.compensation.get_milestone_bonus(active_store_count);
        if milestone_bonus > Decimal::ZERO {
            tracing::info!(rep_id, active_store_count, %milestone_bonus, "🎉 Marco de lojas atingido");
        }

        EstimatedPay {
            active_store_count,
            hourly_rate: wages.hourly_rate,
            pending_hours,
            wages: wage_total,
            reimbursements,
            unpaid_commission: commissions.total_due,
            grand_total: wage_total
                .saturating_add(reimbursements)
                .saturating_add(commissions.total_due),
            milestone_bonus,
        }
    }
}
