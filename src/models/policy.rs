// src/models/policy.rs

// Tabela de remuneração. Os valores padrão são os que estão em produção;
// um arquivo JSON pode sobrescrever qualquer parte (ver config.rs).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::shift::Region;

// --- Validadores ---

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("non_negative")
            .with_message("O valor não pode ser negativo.".into()));
    }
    Ok(())
}

fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if value <= &Decimal::ZERO {
        return Err(ValidationError::new("positive")
            .with_message("O valor deve ser maior que zero.".into()));
    }
    Ok(())
}

fn fraction(value: &Decimal) -> Result<(), ValidationError> {
    if value < &Decimal::ZERO || value > &Decimal::ONE {
        return Err(ValidationError::new("fraction")
            .with_message("A taxa deve estar entre 0 e 1.".into()));
    }
    Ok(())
}

fn hourly_bounds(policy: &HourlyPolicy) -> Result<(), ValidationError> {
    if policy.cap_rate < policy.base_rate {
        return Err(ValidationError::new("hourly_bounds")
            .with_message("O teto por hora não pode ser menor que a base.".into()));
    }
    Ok(())
}

fn pricing_tiers(tiers: &BTreeMap<Region, BTreeMap<u32, Decimal>>) -> Result<(), ValidationError> {
    if !tiers.contains_key(&Region::Nyc) {
        return Err(ValidationError::new("pricing_tiers")
            .with_message("A tabela precisa da região NYC (usada como padrão).".into()));
    }
    let has_negative = tiers
        .values()
        .flat_map(|buckets| buckets.values())
        .any(|price| price < &Decimal::ZERO);
    if has_negative {
        return Err(ValidationError::new("pricing_tiers")
            .with_message("Preços da tabela não podem ser negativos.".into()));
    }
    Ok(())
}

// --- Seções ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
#[validate(schema(function = "hourly_bounds"))]
pub struct HourlyPolicy {
    #[validate(custom(function = "non_negative"))]
    pub base_rate: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub cap_rate: Decimal,
    // +raise_per_step a cada stores_per_step lojas ativas
    #[validate(range(min = 1, message = "Precisa ser pelo menos 1 loja por aumento."))]
    pub stores_per_step: u32,
    #[validate(custom(function = "non_negative"))]
    pub raise_per_step: Decimal,
}

impl Default for HourlyPolicy {
    fn default() -> Self {
        Self {
            base_rate: Decimal::from(20),
            cap_rate: Decimal::from(30),
            stores_per_step: 10,
            raise_per_step: Decimal::ONE,
        }
    }
}

/// Duas porcentagens independentes sobre a mesma receita bruta.
/// Não é uma divisão da receita: não precisam somar 100%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CommissionPolicy {
    #[validate(custom(function = "fraction"))]
    pub rep_rate: Decimal,
    #[validate(custom(function = "fraction"))]
    pub company_rate: Decimal,
}

impl Default for CommissionPolicy {
    fn default() -> Self {
        Self {
            rep_rate: Decimal::new(2, 2),
            company_rate: Decimal::new(5, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct MileagePolicy {
    // Reembolso ao embaixador
    #[validate(custom(function = "non_negative"))]
    pub vehicle_rate: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub no_vehicle_rate: Decimal,
    // Cobrado do cliente
    #[validate(custom(function = "non_negative"))]
    pub client_rate: Decimal,
}

impl Default for MileagePolicy {
    fn default() -> Self {
        Self {
            vehicle_rate: Decimal::new(35, 2),
            no_vehicle_rate: Decimal::new(20, 2),
            client_rate: Decimal::new(70, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct MilestonePolicy {
    #[validate(range(min = 1))]
    pub step: u32,
    // Acima disso não há mais marcos
    pub cap_stores: u32,
    #[validate(custom(function = "non_negative"))]
    pub bonus_per_store: Decimal,
}

impl Default for MilestonePolicy {
    fn default() -> Self {
        Self {
            step: 10,
            cap_stores: 100,
            bonus_per_store: Decimal::from(10),
        }
    }
}

/// Regra da marca com exclusividade temporária (Space Poppers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandRulePolicy {
    // Comparado com o nome normalizado (minúsculas, só alfanuméricos)
    #[validate(length(min = 1, message = "A chave da marca não pode ser vazia."))]
    pub limited_brand_key: String,
    pub active_months: u32,
}

impl Default for BrandRulePolicy {
    fn default() -> Self {
        Self {
            limited_brand_key: "spacepopper".to_string(),
            active_months: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringPolicy {
    #[validate(custom(function = "non_negative"))]
    pub activity_points: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub new_customer_bonus: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub reorder_bonus: Decimal,
    // 1 ponto a cada revenue_divisor de receita
    #[validate(custom(function = "positive"))]
    pub revenue_divisor: Decimal,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            activity_points: Decimal::ONE,
            new_customer_bonus: Decimal::from(5),
            reorder_bonus: Decimal::from(3),
            revenue_divisor: Decimal::ONE_HUNDRED,
        }
    }
}

// --- Política completa ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CompensationPolicy {
    #[validate(nested)]
    pub hourly: HourlyPolicy,
    #[validate(nested)]
    pub commission: CommissionPolicy,
    #[validate(nested)]
    pub mileage: MileagePolicy,
    // Preço fixo por região e bloco de horas faturáveis (2, 3, 4, 5)
    #[validate(custom(function = "pricing_tiers"))]
    pub pricing_tiers: BTreeMap<Region, BTreeMap<u32, Decimal>>,
    #[validate(nested)]
    pub milestones: MilestonePolicy,
    #[validate(nested)]
    pub brand_rule: BrandRulePolicy,
    #[validate(nested)]
    pub scoring: ScoringPolicy,
    #[validate(range(min = 1, max = 3660))]
    pub bi_weekly_window_days: u32,
}

fn tier(prices: [i64; 4]) -> BTreeMap<u32, Decimal> {
    (2..=5).zip(prices).map(|(hours, price)| (hours, Decimal::from(price))).collect()
}

impl Default for CompensationPolicy {
    fn default() -> Self {
        let pricing_tiers = BTreeMap::from([
            (Region::Nyc, tier([120, 160, 200, 240])),
            (Region::LongIsland, tier([140, 180, 220, 260])),
            (Region::Upstate, tier([160, 200, 240, 280])),
        ]);

        Self {
            hourly: HourlyPolicy::default(),
            commission: CommissionPolicy::default(),
            mileage: MileagePolicy::default(),
            pricing_tiers,
            milestones: MilestonePolicy::default(),
            brand_rule: BrandRulePolicy::default(),
            scoring: ScoringPolicy::default(),
            bi_weekly_window_days: 14,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_policy_is_valid() {
        assert!(CompensationPolicy::default().validate().is_ok());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let policy: CompensationPolicy = serde_json::from_value(json!({
            "hourly": { "capRate": 35 },
            "pricingTiers": { "NYC": { "2": 100, "3": 150, "4": 200, "5": 250 } }
        }))
        .unwrap();

        assert_eq!(policy.hourly.cap_rate, Decimal::from(35));
        assert_eq!(policy.hourly.base_rate, Decimal::from(20));
        assert_eq!(policy.pricing_tiers[&Region::Nyc][&2], Decimal::from(100));
        assert!(!policy.pricing_tiers.contains_key(&Region::Upstate));
        assert_eq!(policy.commission, CommissionPolicy::default());
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn rejects_inconsistent_values() {
        let mut policy = CompensationPolicy::default();
        policy.hourly.cap_rate = Decimal::from(10);
        policy.commission.rep_rate = Decimal::from(2);
        policy.pricing_tiers.remove(&Region::Nyc);

        assert!(policy.validate().is_err());
    }

    #[test]
    fn window_days_must_stay_within_ten_years() {
        let policy: CompensationPolicy =
            serde_json::from_value(json!({ "biWeeklyWindowDays": 4000000000u32 })).unwrap();
        assert!(policy.validate().is_err());

        let policy: CompensationPolicy =
            serde_json::from_value(json!({ "biWeeklyWindowDays": 3660 })).unwrap();
        assert!(policy.validate().is_ok());
    }
}
