// src/config.rs

use std::{env, path::PathBuf, sync::Arc};

use validator::Validate;

use crate::{
    common::error::AppError,
    models::policy::CompensationPolicy,
    services::{
        activity_service::ActivityService, billing_service::BillingService,
        compensation_service::CompensationService, finance_service::FinanceService,
        payout_service::PayoutService, report_service::ReportService,
        scoring_service::ScoringService,
    },
};

/// Configuração lida do ambiente (.env incluído).
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub snapshot_path: Option<PathBuf>,
    pub policy_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            snapshot_path: env::var_os("SNAPSHOT_PATH").map(PathBuf::from),
            policy_path: env::var_os("COMPENSATION_POLICY_PATH").map(PathBuf::from),
        }
    }
}

/// Carrega e valida a política de um arquivo JSON. Campos ausentes ficam
/// com o valor de produção.
pub fn load_policy(path: &std::path::Path) -> Result<CompensationPolicy, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|e| AppError::read(path, e))?;
    let policy: CompensationPolicy =
        serde_json::from_str(&raw).map_err(|e| AppError::json(path, e))?;
    policy.validate()?;

    tracing::info!("✅ Política de remuneração carregada de {}", path.display());
    Ok(policy)
}

// O estado compartilhado: a política e os serviços montados sobre ela
#[derive(Clone)]
pub struct AppState {
    pub policy: Arc<CompensationPolicy>,
    pub compensation_service: CompensationService,
    pub billing_service: BillingService,
    pub activity_service: ActivityService,
    pub scoring_service: ScoringService,
    pub finance_service: FinanceService,
    pub payout_service: PayoutService,
    pub report_service: ReportService,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let policy = match &config.policy_path {
            Some(path) => load_policy(path)?,
            None => {
                tracing::info!("Usando a política de remuneração padrão");
                CompensationPolicy::default()
            }
        };

        Ok(Self::with_policy(policy))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_policy(policy: CompensationPolicy) -> Self {
        let policy = Arc::new(policy);

        let compensation_service = CompensationService::new(policy.clone());
        let billing_service = BillingService::new(policy.clone(), compensation_service.clone());
        let activity_service = ActivityService::new(policy.clone());
        let scoring_service = ScoringService::new(policy.clone());
        let finance_service = FinanceService::new(
            policy.clone(),
            compensation_service.clone(),
            billing_service.clone(),
        );
        let payout_service = PayoutService::new(compensation_service.clone());
        let report_service = ReportService::new(
            activity_service.clone(),
            scoring_service.clone(),
            finance_service.clone(),
        );

        Self {
            policy,
            compensation_service,
            billing_service,
            activity_service,
            scoring_service,
            finance_service,
            payout_service,
            report_service,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_policy(CompensationPolicy::default())
    }
}
