// src/services/scoring_service.rs

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    common::{
        date_utils::{first_present, is_in_current_quarter_at, DateInput},
        money::saturating_sum,
    },
    models::{lead::Lead, leaderboard::RepScore, policy::CompensationPolicy},
};

/// Pontuação trimestral "King of the Crop".
///
/// Cada lead do trimestre vale pontos de atividade; vendas fechadas somam
/// bônus de fechamento e receita / 100. Tudo zera na virada do trimestre.
#[derive(Clone)]
pub struct ScoringService {
    policy: Arc<CompensationPolicy>,
}

impl ScoringService {
    pub fn new(policy: Arc<CompensationPolicy>) -> Self {
        Self { policy }
    }

    /// Data que decide o trimestre: a da venda para contas fechadas,
    /// a de criação para o resto.
    fn effective_date(lead: &Lead) -> Option<&DateInput> {
        if lead.is_closed() {
            first_present([lead.sold_date.as_ref(), lead.date.as_ref()])
        } else {
            first_present([lead.date.as_ref(), lead.created_at.as_ref()])
        }
    }

    fn closing_bonus(&self, sale_type: Option<&str>) -> Decimal {
        let scoring = &self.policy.scoring;
        match sale_type {
            Some("New Customer") => scoring.new_customer_bonus,
            Some("Re-order") => scoring.reorder_bonus,
            _ => Decimal::ZERO,
        }
    }

    fn lead_points(&self, lead: &Lead, now: DateTime<Utc>) -> Decimal {
        if !is_in_current_quarter_at(Self::effective_date(lead), now) {
            return Decimal::ZERO;
        }

        let scoring = &self.policy.scoring;
        let mut points = scoring.activity_points;

        if lead.is_closed() {
            let revenue_points = lead
                .revenue()
                .checked_div(scoring.revenue_divisor)
                .unwrap_or_default();
            points = points
                .saturating_add(self.closing_bonus(lead.sale_type.as_deref()))
                .saturating_add(revenue_points);
        }
        points
    }

    pub fn calculate_rep_score_at<'a, I>(&self, leads: I, now: DateTime<Utc>) -> Decimal
    where
        I: IntoIterator<Item = &'a Lead>,
    {
        saturating_sum(leads.into_iter().map(|lead| self.lead_points(lead, now)))
    }

    pub fn calculate_rep_score(&self, leads: &[Lead]) -> Decimal {
        self.calculate_rep_score_at(leads, Utc::now())
    }

    // =========================================================================
    //  RANKING
    // =========================================================================

    /// Agrupa os leads por embaixador e ordena pela pontuação do trimestre.
    ///
    /// Empates mantêm a ordem em que o embaixador apareceu na lista.
    pub fn build_leaderboard_at(&self, leads: &[Lead], now: DateTime<Utc>) -> Vec<RepScore> {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<&Lead>> = HashMap::new();

        for lead in leads {
            let rep = lead.rep_name();
            groups
                .entry(rep)
                .or_insert_with(|| {
                    order.push(rep);
                    Vec::new()
                })
                .push(lead);
        }

        let mut board: Vec<RepScore> = order
            .into_iter()
            .map(|rep| {
                let rep_leads = groups.remove(rep).unwrap_or_default();
                let score = self.calculate_rep_score_at(rep_leads.iter().copied(), now);
                let sales_count = rep_leads.iter().filter(|l| l.is_closed()).count();
                let revenue = saturating_sum(rep_leads.iter().map(|l| l.revenue()));

                tracing::debug!(rep, %score, sales_count, "Pontuação calculada");

                RepScore {
                    name: rep.to_string(),
                    score,
                    sales_count,
                    leads_count: rep_leads.len() - sales_count,
                    revenue,
                }
            })
            .collect();

        board.sort_by(|a, b| b.score.cmp(&a.score));
        board
    }

    pub fn build_leaderboard(&self, leads: &[Lead]) -> Vec<RepScore> {
        self.build_leaderboard_at(leads, Utc::now())
    }
}
