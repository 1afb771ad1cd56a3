// src/services/report_service.rs

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::{
    common::{date_utils::quarter_label, error::AppError},
    models::snapshot::{Report, Snapshot},
    services::{
        activity_service::ActivityService, finance_service::FinanceService,
        scoring_service::ScoringService,
    },
};

/// Junta ranking, totais e visão da empresa num único relatório.
#[derive(Clone)]
pub struct ReportService {
    activity_service: ActivityService,
    scoring_service: ScoringService,
    finance_service: FinanceService,
}

impl ReportService {
    pub fn new(
        activity_service: ActivityService,
        scoring_service: ScoringService,
        finance_service: FinanceService,
    ) -> Self {
        Self {
            activity_service,
            scoring_service,
            finance_service,
        }
    }

    /// Lê o snapshot exportado das coleções.
    pub fn load_snapshot(path: &Path) -> Result<Snapshot, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| AppError::read(path, e))?;
        let snapshot: Snapshot = serde_json::from_str(&raw).map_err(|e| AppError::json(path, e))?;

        tracing::info!(
            leads = snapshot.leads.len(),
            shifts = snapshot.shifts.len(),
            sales = snapshot.sales.len(),
            "✅ Snapshot carregado de {}",
            path.display()
        );

        Ok(snapshot)
    }

    pub fn generate_report_at(&self, snapshot: &Snapshot, now: DateTime<Utc>) -> Report {
        let season = quarter_label(now);
        let leaderboard = self.scoring_service.build_leaderboard_at(&snapshot.leads, now);
        let financial_totals = self.finance_service.financial_totals_at(&snapshot.leads, now);
        let company_summary = self.finance_service.company_summary_at(
            &snapshot.shifts,
            &snapshot.sales,
            &snapshot.leads,
            now,
        );
        let active_store_count = self
            .activity_service
            .count_active_stores_at(&snapshot.leads, now);

        tracing::info!(
            %season,
            reps = leaderboard.len(),
            active_store_count,
            "🏆 Relatório gerado"
        );

        Report {
            season,
            leaderboard,
            financial_totals,
            company_summary,
            active_store_count,
        }
    }

    pub fn generate_report(&self, snapshot: &Snapshot) -> Report {
        self.generate_report_at(snapshot, Utc::now())
    }
}
