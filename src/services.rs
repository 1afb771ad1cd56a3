pub mod activity_service;
pub mod billing_service;
pub mod compensation_service;
pub mod finance_service;
pub mod payout_service;
pub mod report_service;
pub mod scoring_service;

pub use activity_service::ActivityService;
pub use billing_service::BillingService;
pub use compensation_service::CompensationService;
pub use finance_service::FinanceService;
pub use payout_service::PayoutService;
pub use report_service::ReportService;
pub use scoring_service::ScoringService;
