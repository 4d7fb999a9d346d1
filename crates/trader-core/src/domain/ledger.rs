//! 거래 원장.
//!
//! 검증된 거래와 알림의 불변 컬렉션입니다. 거래는 청산일 순, 알림은 발송일 순으로
//! 안정 정렬되어 보관됩니다. 원장은 생성 이후 변경되지 않으며, 기간 필터는
//! 새 원장을 반환합니다.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::alert::{AlertRecord, RawAlert};
use super::period::DateRange;
use super::trade::{ClosedTrade, RawTrade};
use crate::error::{TraderError, TraderResult};

/// 원장 JSON 문서 형태: `{"trades": [...], "alerts": [...]}`.
///
/// 레코드는 원시 JSON 값으로 받아 한 건씩 해석합니다. 필드 타입이 잘못된
/// 레코드 하나가 문서 전체를 실패시키지 않습니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerDocument {
    pub trades: Vec<Value>,
    pub alerts: Vec<Value>,
}

/// JSON 값 하나를 검증 전 레코드로 해석합니다.
fn decode_record<R: DeserializeOwned>(value: Value) -> TraderResult<R> {
    serde_json::from_value(value)
        .map_err(|e| TraderError::InvalidRecord(format!("malformed record: {}", e)))
}

/// 검증 결과를 받아들이거나 보고서에 거부로 기록합니다.
fn admit<T>(
    kind: &str,
    index: usize,
    result: TraderResult<T>,
    report: &mut IngestReport,
) -> Option<T> {
    match result {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(kind, index, error = %e, "Skipping malformed record");
            report.rejected.push(RejectedRecord {
                kind: kind.to_string(),
                index,
                reason: e.to_string(),
            });
            None
        }
    }
}

/// 거부된 레코드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    /// 레코드 종류 ("trade" 또는 "alert")
    pub kind: String,
    /// 입력 배열 내 위치
    pub index: usize,
    /// 거부 사유
    pub reason: String,
}

/// 적재 결과 보고서.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub accepted_trades: usize,
    pub accepted_alerts: usize,
    pub rejected: Vec<RejectedRecord>,
}

impl IngestReport {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// 거래 원장.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TradeLedger {
    trades: Vec<ClosedTrade>,
    alerts: Vec<AlertRecord>,
}

impl TradeLedger {
    /// 이미 검증된 레코드로 원장을 생성합니다.
    pub fn new(mut trades: Vec<ClosedTrade>, mut alerts: Vec<AlertRecord>) -> Self {
        // sort_by_key는 안정 정렬: 같은 청산일은 입력 순서 유지
        trades.sort_by_key(|t| t.exit_date);
        alerts.sort_by_key(|a| a.sent_at);
        Self { trades, alerts }
    }

    /// 검증 전 레코드를 적재합니다.
    ///
    /// 잘못된 레코드는 경고 로그를 남기고 제외하며 [`IngestReport`]에 기록됩니다.
    pub fn ingest(raw_trades: Vec<RawTrade>, raw_alerts: Vec<RawAlert>) -> (Self, IngestReport) {
        Self::admit_all(
            raw_trades.into_iter().map(RawTrade::validate),
            raw_alerts.into_iter().map(RawAlert::validate),
        )
    }

    /// JSON 문서에서 원장을 적재합니다.
    ///
    /// 문서가 JSON이 아니거나 `trades`/`alerts`가 배열이 아니면 에러입니다.
    /// 개별 레코드의 타입 오류(잘못된 날짜, 숫자가 아닌 수익률 등)와 검증 실패는
    /// 해당 레코드만 거부하고 보고서에 기록합니다.
    pub fn from_json(json: &str) -> TraderResult<(Self, IngestReport)> {
        let document: LedgerDocument = serde_json::from_str(json)?;
        Ok(Self::admit_all(
            document
                .trades
                .into_iter()
                .map(|v| decode_record::<RawTrade>(v).and_then(RawTrade::validate)),
            document
                .alerts
                .into_iter()
                .map(|v| decode_record::<RawAlert>(v).and_then(RawAlert::validate)),
        ))
    }

    fn admit_all(
        trade_results: impl Iterator<Item = TraderResult<ClosedTrade>>,
        alert_results: impl Iterator<Item = TraderResult<AlertRecord>>,
    ) -> (Self, IngestReport) {
        let mut report = IngestReport::default();

        let trades: Vec<ClosedTrade> = trade_results
            .enumerate()
            .filter_map(|(index, result)| admit("trade", index, result, &mut report))
            .collect();
        let alerts: Vec<AlertRecord> = alert_results
            .enumerate()
            .filter_map(|(index, result)| admit("alert", index, result, &mut report))
            .collect();

        report.accepted_trades = trades.len();
        report.accepted_alerts = alerts.len();
        debug!(
            trades = report.accepted_trades,
            alerts = report.accepted_alerts,
            rejected = report.rejected_count(),
            "Ledger ingested"
        );

        (Self::new(trades, alerts), report)
    }

    /// 청산일 순 거래 목록.
    pub fn trades(&self) -> &[ClosedTrade] {
        &self.trades
    }

    /// 발송일 순 알림 목록.
    pub fn alerts(&self) -> &[AlertRecord] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// 구간에 속하는 거래(청산일 기준)와 알림(발송일 기준)만 담은 원장을 반환합니다.
    pub fn filtered(&self, range: &DateRange) -> TradeLedger {
        if range.is_unbounded() {
            return self.clone();
        }
        TradeLedger {
            trades: self
                .trades
                .iter()
                .filter(|t| range.contains(t.exit_date))
                .cloned()
                .collect(),
            alerts: self
                .alerts
                .iter()
                .filter(|a| range.contains(a.sent_at))
                .cloned()
                .collect(),
        }
    }
}
