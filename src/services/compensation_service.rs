// src/services/compensation_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::models::policy::CompensationPolicy;

/// Regras de remuneração do embaixador: reembolso, hora, comissão e marcos.
///
/// Todas as funções são puras e totais: valores ausentes contam como zero.
#[derive(Clone)]
pub struct CompensationService {
    policy: Arc<CompensationPolicy>,
}

impl CompensationService {
    pub fn new(policy: Arc<CompensationPolicy>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CompensationPolicy {
        &self.policy
    }

    // =========================================================================
    //  REEMBOLSO
    // =========================================================================

    /// Milhas × taxa + pedágios. A taxa depende de o embaixador ter veículo
    /// (ausente = tem).
    pub fn calculate_reimbursement(
        &self,
        miles: impl Into<Option<Decimal>>,
        tolls: impl Into<Option<Decimal>>,
        has_vehicle: impl Into<Option<bool>>,
    ) -> Decimal {
        let mileage = &self.policy.mileage;
        let rate = if has_vehicle.into().unwrap_or(true) {
            mileage.vehicle_rate
        } else {
            mileage.no_vehicle_rate
        };

        miles
            .into()
            .unwrap_or_default()
            .saturating_mul(rate)
            .saturating_add(tolls.into().unwrap_or_default())
    }

    // =========================================================================
    //  VALOR DA HORA
    // =========================================================================

    /// Base + 1 por degrau de lojas ativas, limitado ao teto.
    pub fn calculate_hourly_rate(&self, active_store_count: i64) -> Decimal {
        let hourly = &self.policy.hourly;
        let count = active_store_count.max(0);
        let steps = count / i64::from(hourly.stores_per_step.max(1));
        let raised = hourly
            .base_rate
            .saturating_add(Decimal::from(steps).saturating_mul(hourly.raise_per_step));

        raised.min(hourly.cap_rate)
    }

    // =========================================================================
    //  COMISSÕES
    // =========================================================================

    pub fn calculate_rep_commission(&self, sales_total: impl Into<Option<Decimal>>) -> Decimal {
        sales_total
            .into()
            .unwrap_or_default()
            .saturating_mul(self.policy.commission.rep_rate)
    }

    /// Receita da empresa sobre o bruto; independente da comissão do embaixador.
    pub fn calculate_company_commission(&self, sales_total: impl Into<Option<Decimal>>) -> Decimal {
        sales_total
            .into()
            .unwrap_or_default()
            .saturating_mul(self.policy.commission.company_rate)
    }

    // =========================================================================
    //  MARCOS E BÔNUS
    // =========================================================================

    /// Bônus do marco atingido exatamente agora (10, 20, ... 100 lojas).
    ///
    /// Não guarda estado: quem chama é responsável por não disparar a
    /// comemoração duas vezes.
    pub fn get_milestone_bonus(&self, active_store_count: i64) -> Decimal {
        let milestones = &self.policy.milestones;
        let step = i64::from(milestones.step.max(1));

        if active_store_count > 0
            && active_store_count <= i64::from(milestones.cap_stores)
            && active_store_count % step == 0
        {
            return Decimal::from(active_store_count).saturating_mul(milestones.bonus_per_store);
        }
        Decimal::ZERO
    }

    /// Soma de todos os marcos já passados, até o teto de lojas.
    pub fn calculate_total_lifetime_bonuses(&self, active_store_count: i64) -> Decimal {
        let milestones = &self.policy.milestones;
        let step = i64::from(milestones.step.max(1));
        let count = active_store_count.min(i64::from(milestones.cap_stores));

        if count < step {
            return Decimal::ZERO;
        }

        // step + 2·step + ... + n·step = step · n(n+1)/2
        let n = count / step;
        let stores = i128::from(step) * i128::from(n) * i128::from(n + 1) / 2;
        Decimal::from_i128(stores)
            .unwrap_or(Decimal::MAX)
            .saturating_mul(milestones.bonus_per_store)
    }
}

impl Default for CompensationService {
    fn default() -> Self {
        Self::new(Arc::new(CompensationPolicy::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn service() -> CompensationService {
        CompensationService::default()
    }

    #[test]
    fn reimbursement_uses_vehicle_rate() {
        let svc = service();
        assert_eq!(svc.calculate_reimbursement(dec("100"), dec("5"), true), dec("40"));
        assert_eq!(svc.calculate_reimbursement(dec("100"), dec("5"), false), dec("25"));
        assert_eq!(svc.calculate_reimbursement(dec("10"), None, None), dec("3.5"));
        assert_eq!(svc.calculate_reimbursement(None, None, None), Decimal::ZERO);
    }

    #[test]
    fn hourly_rate_tiers() {
        let svc = service();
        assert_eq!(svc.calculate_hourly_rate(0), dec("20"));
        assert_eq!(svc.calculate_hourly_rate(9), dec("20"));
        assert_eq!(svc.calculate_hourly_rate(10), dec("21"));
        assert_eq!(svc.calculate_hourly_rate(57), dec("25"));
        assert_eq!(svc.calculate_hourly_rate(100), dec("30"));
        assert_eq!(svc.calculate_hourly_rate(1000), dec("30"));
        assert_eq!(svc.calculate_hourly_rate(-40), dec("20"));
    }

    #[test]
    fn hourly_rate_is_monotonic_and_bounded() {
        let svc = service();
        let mut previous = svc.calculate_hourly_rate(0);
        for count in 1..=250 {
            let rate = svc.calculate_hourly_rate(count);
            assert!(rate >= previous);
            assert!(rate >= dec("20") && rate <= dec("30"));
            previous = rate;
        }
    }

    #[test]
    fn commissions_are_independent_percentages() {
        let svc = service();
        assert_eq!(svc.calculate_rep_commission(dec("1000")), dec("20.00"));
        assert_eq!(svc.calculate_company_commission(dec("1000")), dec("50.00"));
        assert_eq!(svc.calculate_rep_commission(None), Decimal::ZERO);
        assert_eq!(svc.calculate_company_commission(None), Decimal::ZERO);
    }

    #[test]
    fn milestone_bonus_only_on_exact_multiples() {
        let svc = service();
        assert_eq!(svc.get_milestone_bonus(10), dec("100"));
        assert_eq!(svc.get_milestone_bonus(100), dec("1000"));
        assert_eq!(svc.get_milestone_bonus(15), Decimal::ZERO);
        assert_eq!(svc.get_milestone_bonus(110), Decimal::ZERO);
        assert_eq!(svc.get_milestone_bonus(0), Decimal::ZERO);
        assert_eq!(svc.get_milestone_bonus(-10), Decimal::ZERO);
    }

    #[test]
    fn lifetime_bonuses_accumulate_until_cap() {
        let svc = service();
        assert_eq!(svc.calculate_total_lifetime_bonuses(9), Decimal::ZERO);
        assert_eq!(svc.calculate_total_lifetime_bonuses(30), dec("600"));
        assert_eq!(svc.calculate_total_lifetime_bonuses(35), dec("600"));
        assert_eq!(svc.calculate_total_lifetime_bonuses(100), dec("5500"));
        assert_eq!(
            svc.calculate_total_lifetime_bonuses(105),
            svc.calculate_total_lifetime_bonuses(100)
        );
    }

    #[test]
    fn huge_inputs_saturate_instead_of_overflowing() {
        let svc = service();
        assert_eq!(svc.calculate_reimbursement(Decimal::MAX, Decimal::MAX, true), Decimal::MAX);
        assert_eq!(svc.calculate_reimbursement(Decimal::MIN, Decimal::MIN, false), Decimal::MIN);
        assert_eq!(svc.calculate_rep_commission(Decimal::MAX), Decimal::MAX * dec("0.02"));

        let mut policy = CompensationPolicy::default();
        policy.milestones.step = 1;
        policy.milestones.cap_stores = u32::MAX;
        policy.milestones.bonus_per_store = dec("1000000000000000000000");
        let svc = CompensationService::new(Arc::new(policy));
        assert_eq!(svc.calculate_total_lifetime_bonuses(i64::MAX), Decimal::MAX);
    }

    #[test]
    fn alternate_schedule_changes_results() {
        let mut policy = CompensationPolicy::default();
        policy.hourly.base_rate = dec("18");
        policy.hourly.cap_rate = dec("22");
        policy.commission.rep_rate = dec("0.03");
        let svc = CompensationService::new(Arc::new(policy));

        assert_eq!(svc.calculate_hourly_rate(0), dec("18"));
        assert_eq!(svc.calculate_hourly_rate(90), dec("22"));
        assert_eq!(svc.calculate_rep_commission(dec("1000")), dec("30"));
    }
}
