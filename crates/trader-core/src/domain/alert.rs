//! 알림 기록 정의.
//!
//! 발송된 트레이딩 알림과 실제 거래 전환 여부를 나타냅니다.
//! 알림 효과 분석에만 사용됩니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::trade::normalize_ticker;
use crate::error::{TraderError, TraderResult};

/// 발송된 알림 기록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// 알림 ID
    pub alert_id: i64,
    /// 종목 티커 (대문자로 정규화)
    pub ticker: String,
    /// 발송일
    pub sent_at: NaiveDate,
    /// 거래로 이어졌는지 여부
    pub resulted_in_trade: bool,
}

impl AlertRecord {
    /// 새로운 알림 기록을 생성합니다.
    pub fn new(
        alert_id: i64,
        ticker: impl Into<String>,
        sent_at: NaiveDate,
        resulted_in_trade: bool,
    ) -> Self {
        Self {
            alert_id,
            ticker: normalize_ticker(&ticker.into()),
            sent_at,
            resulted_in_trade,
        }
    }
}

/// 외부에서 들어오는 검증 전 알림 레코드.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAlert {
    #[serde(alias = "alert_id", alias = "id")]
    pub alert_id: Option<i64>,
    pub ticker: Option<String>,
    #[serde(alias = "sent_at")]
    pub sent_at: Option<NaiveDate>,
    #[serde(alias = "resulted_in_trade")]
    pub resulted_in_trade: Option<bool>,
}

impl RawAlert {
    /// 레코드를 검증하여 알림 기록으로 변환합니다.
    ///
    /// ID, 티커, 발송일은 필수이며 전환 여부가 없으면 `false`로 간주합니다.
    pub fn validate(self) -> TraderResult<AlertRecord> {
        let alert_id = self
            .alert_id
            .ok_or_else(|| TraderError::InvalidRecord("alert without id".to_string()))?;
        let ticker = self
            .ticker
            .as_deref()
            .map(normalize_ticker)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                TraderError::InvalidRecord(format!("alert {}: missing ticker", alert_id))
            })?;
        let sent_at = self.sent_at.ok_or_else(|| {
            TraderError::InvalidRecord(format!("alert {}: missing sent date", alert_id))
        })?;

        Ok(AlertRecord {
            alert_id,
            ticker,
            sent_at,
            resulted_in_trade: self.resulted_in_trade.unwrap_or(false),
        })
    }
}
