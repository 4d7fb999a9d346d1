//! 성과 분석을 위한 도메인 모델.

mod alert;
mod ledger;
mod period;
mod trade;

pub use alert::*;
pub use ledger::*;
pub use period::*;
pub use trade::*;
