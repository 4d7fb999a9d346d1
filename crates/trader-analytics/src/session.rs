//! 분석 세션.
//!
//! 불변 원장, 집계기, 현재 기간과 기준일, 그리고 현재 분석 결과를 묶은 명시적 상태입니다.
//! 기간을 바꾸면 집계기에 넘기는 구간만 달라지며, 결과는 반환 전에 동기적으로
//! 다시 계산되므로 이전 기간의 결과가 보이는 순간이 없습니다.

use chrono::NaiveDate;
use tracing::{debug, info};
use trader_core::{DateRange, Period, TradeLedger};

use crate::aggregator::{AnalyticsReport, MetricsAggregator};

/// 분석 세션.
#[derive(Debug, Clone)]
pub struct AnalyticsSession {
    ledger: TradeLedger,
    aggregator: MetricsAggregator,
    period: Period,
    today: NaiveDate,
    report: AnalyticsReport,
}

impl AnalyticsSession {
    /// 새 세션을 만들고 첫 결과를 계산합니다.
    ///
    /// # 매개변수
    ///
    /// * `ledger` - 적재된 원장
    /// * `aggregator` - 시작 자본이 설정된 집계기
    /// * `period` - 초기 조회 기간
    /// * `today` - 기간 계산 기준일
    pub fn new(
        ledger: TradeLedger,
        aggregator: MetricsAggregator,
        period: Period,
        today: NaiveDate,
    ) -> Self {
        let report = Self::compute(&ledger, &aggregator, period, today);
        info!(
            trades = ledger.len(),
            period = %period,
            "Analytics session created"
        );
        Self {
            ledger,
            aggregator,
            period,
            today,
            report,
        }
    }

    /// 조회 기간을 바꾸고 결과를 다시 계산합니다.
    pub fn set_period(&mut self, period: Period) -> &AnalyticsReport {
        if period != self.period {
            debug!(from = %self.period, to = %period, "Switching analytics period");
            self.period = period;
            self.refresh();
        }
        &self.report
    }

    /// 기준일을 바꾸고 결과를 다시 계산합니다.
    pub fn set_today(&mut self, today: NaiveDate) -> &AnalyticsReport {
        if today != self.today {
            self.today = today;
            self.refresh();
        }
        &self.report
    }

    pub fn report(&self) -> &AnalyticsReport {
        &self.report
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// 현재 기간의 날짜 구간.
    pub fn range(&self) -> DateRange {
        self.period.range(self.today)
    }

    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }

    fn refresh(&mut self) {
        self.report = Self::compute(&self.ledger, &self.aggregator, self.period, self.today);
    }

    fn compute(
        ledger: &TradeLedger,
        aggregator: &MetricsAggregator,
        period: Period,
        today: NaiveDate,
    ) -> AnalyticsReport {
        let window = ledger.filtered(&period.range(today));
        aggregator.compute(window.trades(), window.alerts())
    }
}
