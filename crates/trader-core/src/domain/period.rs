//! 조회 기간 선택.
//!
//! 기간 토큰(`30d`, `90d`, `180d`, `365d`, `ytd`, `all`)을 기준일에 대한
//! 날짜 구간으로 변환합니다. 구간은 양 끝을 포함합니다.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TraderError;

/// 조회 기간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    /// 최근 30일
    Days30,
    /// 최근 90일
    Days90,
    /// 최근 180일
    Days180,
    /// 최근 365일
    Days365,
    /// 연초 대비 (1월 1일부터)
    Ytd,
    /// 전체 기간
    #[default]
    All,
}

impl Period {
    /// 지원하는 모든 기간 (표시 순서).
    pub const ALL: [Period; 6] = [
        Period::Days30,
        Period::Days90,
        Period::Days180,
        Period::Days365,
        Period::Ytd,
        Period::All,
    ];

    /// 정규 토큰.
    pub fn token(&self) -> &'static str {
        match self {
            Period::Days30 => "30d",
            Period::Days90 => "90d",
            Period::Days180 => "180d",
            Period::Days365 => "365d",
            Period::Ytd => "ytd",
            Period::All => "all",
        }
    }

    /// 기준일에 대한 날짜 구간을 계산합니다.
    ///
    /// # 매개변수
    ///
    /// * `now` - 기준일 (보통 오늘)
    ///
    /// # 반환값
    ///
    /// `Days(n)`은 `[now - n일, now]`, `Ytd`는 `[now가 속한 해의 1월 1일, now]`,
    /// `All`은 양쪽 모두 열린 구간입니다.
    pub fn range(&self, now: NaiveDate) -> DateRange {
        let days = match self {
            Period::Days30 => 30,
            Period::Days90 => 90,
            Period::Days180 => 180,
            Period::Days365 => 365,
            Period::Ytd => {
                let start = NaiveDate::from_ymd_opt(now.year(), 1, 1).unwrap_or(now);
                return DateRange::between(start, now);
            }
            Period::All => return DateRange::unbounded(),
        };
        DateRange::between(now - Duration::days(days), now)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Period {
    type Err = TraderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "30d" | "1m" => Ok(Period::Days30),
            "90d" | "3m" => Ok(Period::Days90),
            "180d" | "6m" => Ok(Period::Days180),
            "365d" | "1y" | "12m" => Ok(Period::Days365),
            "ytd" => Ok(Period::Ytd),
            "all" => Ok(Period::All),
            other => Err(TraderError::InvalidPeriod(other.to_string())),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = TraderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.token().to_string()
    }
}

/// 양 끝을 포함하는 날짜 구간. `None`은 해당 방향으로 열려 있음을 뜻합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// 양쪽 모두 열린 구간.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// `[start, end]` 구간.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// 날짜가 구간에 포함되는지 확인합니다.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}
