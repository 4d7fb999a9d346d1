//! # Trader Core
//!
//! 트레이딩 성과 분석의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 분석 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 청산 완료 거래와 알림 기록
//! - 검증 및 적재를 담당하는 거래 원장
//! - 조회 기간 선택
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use self::config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
