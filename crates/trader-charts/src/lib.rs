//! 성과 차트 투영.
//!
//! 집계된 시리즈를 픽셀 좌표, 영역/선 경로, 호버 툴팁 대상으로 변환합니다.
//! 렌더링 백엔드와 무관하며, 결과는 모두 serde로 직렬화할 수 있습니다.
//!
//! - [`scale`]: 공유 스케일 투영 (`scale_x`, `scale_y`, `index_at`)
//! - [`path`], [`bars`]: 경로와 막대 기하
//! - [`interaction`]: 차트별 너비/호버/툴팁 상태 머신
//! - [`drawdown`], [`monthly`], [`ticker`], [`streak`]: 네 가지 차트
//! - [`dashboard`]: 리포트 하나를 네 차트에 적재

pub mod bars;
pub mod dashboard;
pub mod drawdown;
pub mod error;
pub mod interaction;
pub mod monthly;
pub mod path;
pub mod renderer;
pub mod scale;
pub mod streak;
pub mod ticker;

pub use bars::{signed_bars, Bar};
pub use dashboard::{ChartFailure, ChartsDashboard, DashboardSnapshot};
pub use drawdown::{ChartPoint, DrawdownChart, DrawdownGeometry};
pub use error::{ChartError, ChartResult};
pub use interaction::{
    ChartState, ChartView, HoverState, Tooltip, TooltipSide, ViewConfig, ViewSnapshot,
};
pub use monthly::{MonthlyBarChart, MonthlyBarGeometry};
pub use path::{series_paths, SeriesPaths};
pub use renderer::{ChartKind, ChartRenderer, HoverTargets};
pub use scale::{ChartBox, Padding, ScaleProjector, ValueDomain};
pub use streak::{CurrentStreakMarker, StreakChart, StreakGeometry};
pub use ticker::{HeatCell, TickerHeatmap, TickerHeatmapGeometry, TickerTableRow};
