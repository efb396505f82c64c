//! Domain model: typed views over the wire payloads.

mod analysis;
mod filter;
mod metrics;
mod user;

pub use analysis::{Analysis, AnalysisTotals, AnalysisWindow};
pub use filter::{DashboardFilters, FilterCriteria, StatusFilter};
pub use metrics::{Metric, MetricsSnapshot, MonthlySeries, SegmentBreakdown, MONTHS_PER_YEAR};
pub use user::{UserRecord, ROLE_ADMIN, ROLE_USER};
