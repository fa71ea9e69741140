pub mod dashboard_service;
pub mod metrics;
pub mod period;

pub use dashboard_service::DashboardService;
