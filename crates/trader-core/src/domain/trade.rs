//! 청산 완료 거래 정의.
//!
//! 분석 엔진이 읽는 기본 단위입니다. 한 번 생성된 거래는 수정되지 않으며,
//! 외부 입력은 [`RawTrade`]로 받아 검증을 거친 뒤 [`ClosedTrade`]가 됩니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{TraderError, TraderResult};

/// 허용되는 거래당 손익 금액의 절댓값 상한 (1,000조).
pub const MAX_PNL_DOLLAR: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// 거래 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeOutcome {
    /// 수익 거래
    Win,
    /// 손실 거래
    Loss,
    /// 본전 거래
    #[serde(alias = "BREAK_EVEN")]
    BreakEven,
}

impl TradeOutcome {
    /// 수익률 부호로 결과를 도출합니다.
    pub fn from_pnl(pnl_percent: f64) -> Self {
        if pnl_percent > 0.0 {
            TradeOutcome::Win
        } else if pnl_percent < 0.0 {
            TradeOutcome::Loss
        } else {
            TradeOutcome::BreakEven
        }
    }
}

/// 청산 완료 거래.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    /// 종목 티커 (대문자로 정규화)
    pub ticker: String,

    /// 진입일
    pub entry_date: NaiveDate,

    /// 청산일
    pub exit_date: NaiveDate,

    /// 수익률 (백분율, 예: 4.0 = 4% 수익)
    pub pnl_percent: f64,

    /// 실현 손익 (통화 단위)
    pub pnl_dollar: Decimal,

    /// 거래 결과
    pub outcome: TradeOutcome,

    /// 셋업 라벨 (예: "breakout", "pullback")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,
}

impl ClosedTrade {
    /// 새로운 거래를 생성합니다. 결과는 수익률 부호로 도출됩니다.
    ///
    /// # 예시
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use rust_decimal_macros::dec;
    /// use trader_core::{ClosedTrade, TradeOutcome};
    ///
    /// let entry = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    /// let exit = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
    /// let trade = ClosedTrade::new("aapl", entry, exit, 4.0, dec!(400));
    ///
    /// assert_eq!(trade.ticker, "AAPL");
    /// assert_eq!(trade.outcome, TradeOutcome::Win);
    /// assert_eq!(trade.holding_days(), 7);
    /// ```
    pub fn new(
        ticker: impl Into<String>,
        entry_date: NaiveDate,
        exit_date: NaiveDate,
        pnl_percent: f64,
        pnl_dollar: Decimal,
    ) -> Self {
        Self {
            ticker: normalize_ticker(&ticker.into()),
            entry_date,
            exit_date,
            pnl_percent,
            pnl_dollar,
            outcome: TradeOutcome::from_pnl(pnl_percent),
            setup: None,
        }
    }

    /// 셋업 라벨을 지정합니다.
    pub fn with_setup(mut self, setup: impl Into<String>) -> Self {
        self.setup = Some(setup.into());
        self
    }

    /// 결과를 명시적으로 지정합니다.
    pub fn with_outcome(mut self, outcome: TradeOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// 보유 기간 (일).
    pub fn holding_days(&self) -> i64 {
        (self.exit_date - self.entry_date).num_days()
    }

    pub fn is_win(&self) -> bool {
        self.outcome == TradeOutcome::Win
    }

    pub fn is_loss(&self) -> bool {
        self.outcome == TradeOutcome::Loss
    }
}

/// 외부에서 들어오는 검증 전 거래 레코드.
///
/// 모든 필드가 선택적이며 [`RawTrade::validate`]로 [`ClosedTrade`]가 됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTrade {
    #[serde(alias = "ticker_symbol")]
    pub ticker: Option<String>,
    #[serde(alias = "entry_date")]
    pub entry_date: Option<NaiveDate>,
    #[serde(alias = "exit_date")]
    pub exit_date: Option<NaiveDate>,
    #[serde(alias = "pnl_percent")]
    pub pnl_percent: Option<f64>,
    #[serde(alias = "pnl_dollar")]
    pub pnl_dollar: Option<Decimal>,
    pub outcome: Option<TradeOutcome>,
    pub setup: Option<String>,
}

impl RawTrade {
    /// 레코드를 검증하여 거래로 변환합니다.
    ///
    /// 티커, 진입일, 청산일, 수익률이 없거나 청산일이 진입일보다 앞서면
    /// [`TraderError::InvalidRecord`]를 반환합니다. 손익 금액의 절댓값이
    /// [`MAX_PNL_DOLLAR`]를 넘어도 거부합니다. 손익 금액이 없으면 0으로,
    /// 결과가 없으면 수익률 부호로 채웁니다.
    pub fn validate(self) -> TraderResult<ClosedTrade> {
        let ticker = self
            .ticker
            .as_deref()
            .map(normalize_ticker)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TraderError::InvalidRecord("missing ticker".to_string()))?;

        let entry_date = self.entry_date.ok_or_else(|| {
            TraderError::InvalidRecord(format!("{}: missing entry date", ticker))
        })?;
        let exit_date = self.exit_date.ok_or_else(|| {
            TraderError::InvalidRecord(format!("{}: missing exit date", ticker))
        })?;
        if exit_date < entry_date {
            return Err(TraderError::InvalidRecord(format!(
                "{}: exit date {} precedes entry date {}",
                ticker, exit_date, entry_date
            )));
        }

        let pnl_percent = self
            .pnl_percent
            .filter(|p| p.is_finite())
            .ok_or_else(|| {
                TraderError::InvalidRecord(format!("{}: missing or non-finite pnl percent", ticker))
            })?;

        let pnl_dollar = self.pnl_dollar.unwrap_or(Decimal::ZERO);
        if pnl_dollar.abs() > MAX_PNL_DOLLAR {
            return Err(TraderError::InvalidRecord(format!(
                "{}: pnl dollar {} out of range",
                ticker, pnl_dollar
            )));
        }

        let outcome = self
            .outcome
            .unwrap_or_else(|| TradeOutcome::from_pnl(pnl_percent));
        let setup = self
            .setup
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(ClosedTrade {
            ticker,
            entry_date,
            exit_date,
            pnl_percent,
            pnl_dollar,
            outcome,
            setup,
        })
    }
}

/// 티커를 공백 제거 후 대문자로 정규화합니다.
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}
