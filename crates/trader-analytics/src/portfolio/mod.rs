//! 포트폴리오 분석 모듈
//!
//! 자산 곡선과 낙폭 구간, 일별 손익을 제공합니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use trader_analytics::portfolio::{daily_pnl, EquityCurve};
//! use rust_decimal_macros::dec;
//!
//! let curve = EquityCurve::from_trades(&trades, dec!(10_000));
//! println!("현재 자산: {}", curve.final_equity());
//!
//! let daily = daily_pnl(&trades);
//! ```

pub mod equity_curve;

pub use equity_curve::*;
