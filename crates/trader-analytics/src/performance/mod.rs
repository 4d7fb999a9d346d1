//! 성과 분석 모듈
//!
//! 청산 완료 거래의 성과를 측정하고 분해하기 위한 도구를 제공합니다.
//!
//! # 모듈 구성
//!
//! - [`metrics`]: 요약 지표 계산 (승률, 프로핏 팩터, 샤프, 기대값 등)
//! - [`streaks`]: 연승/연패 분석
//! - [`breakdown`]: 월별/종목별/셋업별 분해
//! - [`alerts`]: 알림 → 거래 전환 효과

pub mod alerts;
pub mod breakdown;
pub mod metrics;
pub mod streaks;

pub use alerts::*;
pub use breakdown::*;
pub use metrics::*;
pub use streaks::*;
