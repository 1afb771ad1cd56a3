// src/services/activity_service.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    common::date_utils::{add_calendar_months, days_until, first_present, normalize_to_instant},
    models::{activity::ActivityStatus, lead::Lead, policy::CompensationPolicy},
};

/// Regra de conta ativa (gera comissão e conta para o valor da hora).
///
/// - Loja com qualquer marca além da Space Poppers: ativa para sempre.
/// - Loja só com Space Poppers: ativa por N meses a partir da primeira venda.
#[derive(Clone)]
pub struct ActivityService {
    policy: Arc<CompensationPolicy>,
}

/// Minúsculas (Unicode) e só `a-z0-9` ("Space Poppers!" -> "spacepoppers").
fn normalize_brand(brand: &str) -> String {
    brand
        .chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

impl ActivityService {
    pub fn new(policy: Arc<CompensationPolicy>) -> Self {
        Self { policy }
    }

    fn carries_permanent_brand(&self, brands: &[String]) -> bool {
        let key = &self.policy.brand_rule.limited_brand_key;
        brands
            .iter()
            .any(|brand| !normalize_brand(brand).contains(key.as_str()))
    }

    /// Fim da janela da marca temporária. `None` se não houver data válida.
    fn expiration_date(&self, lead: &Lead) -> Option<DateTime<Utc>> {
        let reference = first_present([
            lead.first_sale_date.as_ref(),
            lead.sold_date.as_ref(),
            lead.created_at.as_ref(),
        ])?;
        let first_sale = normalize_to_instant(reference)?;

        add_calendar_months(first_sale, self.policy.brand_rule.active_months)
    }

    pub fn is_store_active_at(&self, lead: &Lead, now: DateTime<Utc>) -> bool {
        let brands = match lead.active_brands.as_deref() {
            Some(brands) if !brands.is_empty() => brands,
            // Contas antigas não têm a lista de marcas: vendida = ativa
            _ => return lead.is_closed(),
        };

        if self.carries_permanent_brand(brands) {
            return true;
        }

        match self.expiration_date(lead) {
            Some(expiration) => now <= expiration,
            None => {
                tracing::debug!(lead_id = ?lead.id, "Conta sem data de primeira venda válida, mantida ativa");
                true
            }
        }
    }

    pub fn is_store_active(&self, lead: &Lead) -> bool {
        self.is_store_active_at(lead, Utc::now())
    }

    pub fn count_active_stores_at(&self, leads: &[Lead], now: DateTime<Utc>) -> usize {
        leads
            .iter()
            .filter(|lead| self.is_store_active_at(lead, now))
            .count()
    }

    pub fn count_active_stores(&self, leads: &[Lead]) -> usize {
        self.count_active_stores_at(leads, Utc::now())
    }

    /// Classificação para exibição (quantos meses faltam para expirar).
    pub fn activity_status_at(&self, lead: &Lead, now: DateTime<Utc>) -> ActivityStatus {
        let brands = lead.active_brands.as_deref().unwrap_or_default();
        if brands.is_empty() || self.carries_permanent_brand(brands) {
            return ActivityStatus::Standard;
        }

        let Some(expiration) = self.expiration_date(lead) else {
            return ActivityStatus::Standard;
        };

        let days_left = days_until(expiration, now);
        if days_left > 0 {
            ActivityStatus::ExpiresIn { months: days_left / 30 }
        } else {
            ActivityStatus::GracePeriod
        }
    }

    pub fn activity_status(&self, lead: &Lead) -> ActivityStatus {
        self.activity_status_at(lead, Utc::now())
    }
}
