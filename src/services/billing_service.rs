// src/services/billing_service.rs

use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    models::{policy::CompensationPolicy, shift::Region, shift::Shift},
    services::compensation_service::CompensationService,
};

const MIN_BILLABLE_HOURS: i64 = 2;
const MAX_BILLABLE_HOURS: i64 = 5;

/// Faturamento do cliente por turno e lucro líquido do turno.
#[derive(Clone)]
pub struct BillingService {
    policy: Arc<CompensationPolicy>,
    compensation: CompensationService,
}

impl BillingService {
    pub fn new(policy: Arc<CompensationPolicy>, compensation: CompensationService) -> Self {
        Self { policy, compensation }
    }

    /// Horas arredondadas para o inteiro mais próximo, presas em [2, 5].
    pub fn billable_hours(hours_worked: Decimal) -> u32 {
        let rounded = hours_worked.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let hours = if rounded > Decimal::from(MAX_BILLABLE_HOURS) {
            MAX_BILLABLE_HOURS
        } else if rounded < Decimal::from(MIN_BILLABLE_HOURS) {
            MIN_BILLABLE_HOURS
        } else {
            rounded.to_i64().unwrap_or(MIN_BILLABLE_HOURS)
        };
        hours as u32
    }

    /// Preço fixo do bloco de horas na tabela da região.
    fn base_rate(&self, region: Region, billable_hours: u32) -> Decimal {
        let tiers = &self.policy.pricing_tiers;

        let Some(table) = tiers.get(&region).or_else(|| {
            tracing::warn!("Região {} sem tabela de preços, usando NYC", region.label());
            tiers.get(&Region::Nyc)
        }) else {
            return Decimal::ZERO;
        };

        table
            .get(&billable_hours)
            .or_else(|| table.get(&(MAX_BILLABLE_HOURS as u32)))
            .copied()
            .unwrap_or_default()
    }

    /// Valor faturado ao cliente: bloco da região + milhagem do cliente +
    /// pedágios a preço de custo.
    pub fn calculate_shift_client_revenue(&self, shift: &Shift) -> Decimal {
        let billable = Self::billable_hours(shift.hours_worked);
        let base = self.base_rate(shift.billing_region(), billable);

        let mileage_charge = shift
            .miles_traveled
            .saturating_mul(self.policy.mileage.client_rate);
        let toll_charge = shift.toll_amount;

        base.saturating_add(mileage_charge).saturating_add(toll_charge)
    }

    /// Receita do cliente - (salário do embaixador + reembolso).
    ///
    /// `rep_hourly_rate` ausente usa a base da tabela por hora.
    pub fn calculate_shift_net_profit(
        &self,
        shift: &Shift,
        rep_hourly_rate: impl Into<Option<Decimal>>,
    ) -> Decimal {
        let revenue = self.calculate_shift_client_revenue(shift);
        let rate = rep_hourly_rate
            .into()
            .unwrap_or(self.policy.hourly.base_rate);

        let wage_expense = shift.hours_worked.saturating_mul(rate);
        let reimbursement_expense = self.compensation.calculate_reimbursement(
            shift.miles_traveled,
            shift.toll_amount,
            shift.has_vehicle(),
        );

        revenue.saturating_sub(wage_expense.saturating_add(reimbursement_expense))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn service() -> BillingService {
        let policy = Arc::new(CompensationPolicy::default());
        BillingService::new(policy.clone(), CompensationService::new(policy))
    }

    fn shift(hours: &str, region: Option<&str>, miles: &str, tolls: &str) -> Shift {
        Shift {
            hours_worked: dec(hours),
            region: region.map(str::to_string),
            miles_traveled: dec(miles),
            toll_amount: dec(tolls),
            ..Default::default()
        }
    }

    #[test]
    fn billable_hours_round_and_clamp() {
        assert_eq!(BillingService::billable_hours(dec("0")), 2);
        assert_eq!(BillingService::billable_hours(dec("2.4")), 2);
        assert_eq!(BillingService::billable_hours(dec("2.5")), 3);
        assert_eq!(BillingService::billable_hours(dec("3.49")), 3);
        assert_eq!(BillingService::billable_hours(dec("4.00")), 4);
        assert_eq!(BillingService::billable_hours(dec("5.6")), 5);
        assert_eq!(BillingService::billable_hours(dec("12")), 5);
        assert_eq!(BillingService::billable_hours(dec("-3")), 2);
    }

    #[test]
    fn client_revenue_by_region() {
        let svc = service();
        assert_eq!(svc.calculate_shift_client_revenue(&shift("4", Some("NYC"), "0", "0")), dec("200"));
        assert_eq!(svc.calculate_shift_client_revenue(&shift("4", Some("LI"), "0", "0")), dec("220"));
        assert_eq!(svc.calculate_shift_client_revenue(&shift("4", Some("UPSTATE"), "0", "0")), dec("240"));
        assert_eq!(svc.calculate_shift_client_revenue(&shift("4", Some("NYC"), "10", "0")), dec("207"));
    }

    #[test]
    fn unknown_region_falls_back_to_nyc() {
        let svc = service();
        assert_eq!(svc.calculate_shift_client_revenue(&shift("3", None, "0", "0")), dec("160"));
        assert_eq!(svc.calculate_shift_client_revenue(&shift("3", Some("Jersey"), "0", "0")), dec("160"));
    }

    #[test]
    fn tolls_pass_through_at_cost() {
        let svc = service();
        assert_eq!(svc.calculate_shift_client_revenue(&shift("1", Some("LI"), "0", "12.50")), dec("152.50"));
    }

    #[test]
    fn missing_bucket_uses_five_hour_rate() {
        let mut policy = CompensationPolicy::default();
        if let Some(nyc) = policy.pricing_tiers.get_mut(&Region::Nyc) {
            nyc.remove(&3);
        }
        let policy = Arc::new(policy);
        let svc = BillingService::new(policy.clone(), CompensationService::new(policy));

        assert_eq!(svc.calculate_shift_client_revenue(&shift("3", Some("NYC"), "0", "0")), dec("240"));
    }

    #[test]
    fn net_profit_subtracts_wage_and_reimbursement() {
        let svc = service();
        // 200 + 7 + 2 - (4*20 + (10*0.35 + 2)) = 209 - 85.5
        let s = shift("4", Some("NYC"), "10", "2");
        assert_eq!(svc.calculate_shift_net_profit(&s, None), dec("123.5"));
        assert_eq!(svc.calculate_shift_net_profit(&s, dec("25")), dec("103.5"));

        let no_vehicle = Shift { has_vehicle: Some(false), ..s };
        // reembolso 10*0.20 + 2 = 4
        assert_eq!(svc.calculate_shift_net_profit(&no_vehicle, None), dec("125"));
    }

    #[test]
    fn oversized_toll_saturates_revenue() {
        let svc = service();
        let s: Shift = serde_json::from_value(serde_json::json!({
            "hoursWorked": 4,
            "tollAmount": "79228162514264337593543950335"
        }))
        .unwrap();

        assert_eq!(svc.calculate_shift_client_revenue(&s), Decimal::MAX);
        // receita e custo saturam juntos
        assert_eq!(svc.calculate_shift_net_profit(&s, None), Decimal::ZERO);
    }
}
