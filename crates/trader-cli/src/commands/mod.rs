//! CLI 명령어 구현 모듈.

pub mod charts;
pub mod ledger;
pub mod report;

// 각 서브모듈 직접 사용 권장 (ambiguous re-export 방지)
