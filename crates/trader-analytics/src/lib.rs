//! 트레이딩 성과 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 성과 요약 지표 계산
//! - 연승/연패, 월별/종목별/셋업별 분해
//! - 자산 곡선 및 낙폭 분석
//! - 기간 전환을 위한 분석 세션
//!
//! # Re-exports
//!
//! - [`performance`]: 성과 지표 계산 (AnalyticsSummary, StreakAnalysis 등)
//! - [`portfolio`]: 자산 곡선 분석 (EquityCurve, DrawdownPeriod 등)

pub mod aggregator;
pub mod performance;
pub mod portfolio;
pub mod session;

pub use aggregator::{AnalyticsReport, MetricsAggregator, DEFAULT_MIN_DRAWDOWN_PERCENT};
pub use session::AnalyticsSession;

// Performance 모듈 re-exports
pub use performance::alerts::AlertEffectiveness;
pub use performance::breakdown::{
    max_abs_ticker_return, MonthlyPerformance, SetupPerformance, TickerPerformance,
    UNKNOWN_SETUP,
};
pub use performance::metrics::{
    capped_ratio, format_ratio, AnalyticsSummary, SATURATED_RATIO, STD_DEV_EPSILON,
};
pub use performance::streaks::{StreakAnalysis, StreakRun, StreakType};

// Portfolio 모듈 re-exports
pub use portfolio::equity_curve::{DailyPnl, DrawdownPeriod, EquityCurve, EquityPoint};
