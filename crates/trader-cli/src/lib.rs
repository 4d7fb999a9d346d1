//! 성과 분석 CLI 도구.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 원장 파일 적재 및 기간별 성과 리포트
//! - 차트 대시보드 스냅샷 (JSON)

pub mod commands;
