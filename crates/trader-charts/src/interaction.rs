//! 차트 상호작용 상태.
//!
//! 차트 인스턴스마다 너비, 호버, 툴팁 상태를 따로 가집니다.
//!
//! ```text
//! Loading ──load──▶ Empty
//!    │                ▲
//!    └──load──▶ Populated { Idle ⇄ Hovering(index) }
//!    └──load──▶ Failed
//! ```
//!
//! - `resize`는 너비가 바뀔 때만 다시 투영합니다.
//! - `pointer_move` / `pointer_leave`는 투영을 다시 하지 않습니다 (`revision` 유지).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use trader_core::ChartConfig;

use crate::error::ChartResult;
use crate::renderer::{ChartKind, ChartRenderer, HoverTargets};
use crate::scale::{ChartBox, Padding};

/// 포인터와 툴팁 사이 간격 (픽셀).
pub const TOOLTIP_OFFSET: f64 = 12.0;

/// 호버 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(usize),
}

impl HoverState {
    pub fn index(&self) -> Option<usize> {
        match self {
            HoverState::Idle => None,
            HoverState::Hovering(index) => Some(*index),
        }
    }
}

/// 차트 상태.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartState<G> {
    /// 데이터 대기 중
    Loading,
    /// 표시할 데이터 없음
    Empty,
    /// 투영 완료
    Populated { geometry: G, hover: HoverState },
    /// 투영 실패 (이 차트에만 해당)
    Failed { message: String },
}

impl<G> ChartState<G> {
    pub fn is_populated(&self) -> bool {
        matches!(self, ChartState::Populated { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ChartState::Failed { .. })
    }

    pub fn geometry(&self) -> Option<&G> {
        match self {
            ChartState::Populated { geometry, .. } => Some(geometry),
            _ => None,
        }
    }
}

/// 툴팁이 앵커의 어느 쪽에 놓였는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipSide {
    Left,
    Right,
}

/// 배치된 툴팁.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub index: usize,
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub side: TooltipSide,
    pub lines: Vec<String>,
}

/// 차트 뷰 설정.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
    pub tooltip_width: f64,
    pub tooltip_height: f64,
    pub tooltip_offset: f64,
}

impl ViewConfig {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            padding: Padding::from(config),
            tooltip_width: config.tooltip_width,
            tooltip_height: config.tooltip_height,
            tooltip_offset: TOOLTIP_OFFSET,
        }
    }

    /// 주어진 너비의 차트 박스.
    pub fn chart_box(&self, width: f64) -> ChartBox {
        ChartBox::new(width, self.height, self.padding)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

/// 직렬화 가능한 뷰 스냅샷.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot<G> {
    pub kind: ChartKind,
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub revision: u64,
    pub state: ChartState<G>,
    pub tooltip: Option<Tooltip>,
}

/// 차트 하나의 상호작용 상태를 소유하는 뷰.
#[derive(Debug, Clone)]
pub struct ChartView<R: ChartRenderer> {
    kind: ChartKind,
    config: ViewConfig,
    width: f64,
    renderer: Option<R>,
    state: ChartState<R::Geometry>,
    revision: u64,
}

impl<R: ChartRenderer> ChartView<R> {
    pub fn new(kind: ChartKind, config: ViewConfig) -> Self {
        Self {
            kind,
            config,
            width: config.width,
            renderer: None,
            state: ChartState::Loading,
            revision: 0,
        }
    }

    /// 렌더러를 적재하고 현재 너비로 투영합니다.
    ///
    /// 실패해도 뷰는 `Failed` 상태로 남고 에러를 반환합니다.
    pub fn load(&mut self, renderer: R) -> ChartResult<()> {
        self.renderer = Some(renderer);
        self.reproject(HoverState::Idle)
    }

    /// 컨테이너 너비 변경. 너비가 같으면 아무것도 하지 않습니다.
    pub fn resize(&mut self, width: f64) -> ChartResult<()> {
        if width == self.width {
            return Ok(());
        }
        self.width = width;

        let hover = match &self.state {
            ChartState::Populated { hover, .. } => *hover,
            _ => HoverState::Idle,
        };
        self.reproject(hover)
    }

    fn reproject(&mut self, hover: HoverState) -> ChartResult<()> {
        let Some(renderer) = self.renderer.as_ref() else {
            return Ok(());
        };
        self.revision += 1;

        if renderer.is_empty() {
            self.state = ChartState::Empty;
            return Ok(());
        }

        let chart = self.config.chart_box(self.width);
        match renderer.project(&chart) {
            Ok(geometry) => {
                debug!(
                    chart = %self.kind,
                    width = self.width,
                    points = renderer.len(),
                    revision = self.revision,
                    "Chart projected"
                );
                self.state = ChartState::Populated { geometry, hover };
                Ok(())
            }
            Err(e) => {
                warn!(chart = %self.kind, error = %e, "Chart projection failed");
                self.state = ChartState::Failed {
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// 포인터 이동. X 좌표를 가장 가까운 인덱스로 바꿔 호버 상태로 전환합니다.
    ///
    /// # 반환값
    ///
    /// 호버된 인덱스 (투영된 데이터가 없으면 `None`)
    pub fn pointer_move(&mut self, x: f64) -> Option<usize> {
        let ChartState::Populated { geometry, hover } = &mut self.state else {
            return None;
        };
        let index = geometry.projector().index_at(x)?;
        *hover = HoverState::Hovering(index);
        Some(index)
    }

    /// 포인터가 차트를 벗어남.
    pub fn pointer_leave(&mut self) {
        if let ChartState::Populated { hover, .. } = &mut self.state {
            *hover = HoverState::Idle;
        }
    }

    pub fn hovered(&self) -> Option<usize> {
        match &self.state {
            ChartState::Populated { hover, .. } => hover.index(),
            _ => None,
        }
    }

    /// 현재 호버에 대한 툴팁.
    ///
    /// 오른쪽 가장자리를 넘으면 앵커 왼쪽으로 뒤집고, 세로 위치는 차트 안으로 제한합니다.
    pub fn tooltip(&self) -> Option<Tooltip> {
        let ChartState::Populated { geometry, hover } = &self.state else {
            return None;
        };
        let index = hover.index()?;
        let (anchor_x, anchor_y) = geometry.anchor(index)?;
        let renderer = self.renderer.as_ref()?;

        let width = self.config.tooltip_width;
        let height = self.config.tooltip_height;
        let offset = self.config.tooltip_offset;

        let (left, side) = if anchor_x + offset + width > self.width {
            ((anchor_x - offset - width).max(0.0), TooltipSide::Left)
        } else {
            (anchor_x + offset, TooltipSide::Right)
        };
        let max_top = (self.config.height - height).max(0.0);
        let top = (anchor_y - height / 2.0).clamp(0.0, max_top);

        Some(Tooltip {
            index,
            anchor_x,
            anchor_y,
            left,
            top,
            width,
            height,
            side,
            lines: renderer.tooltip_lines(index),
        })
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn state(&self) -> &ChartState<R::Geometry> {
        &self.state
    }

    /// 투영 횟수. 호버로는 증가하지 않습니다.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn snapshot(&self) -> ViewSnapshot<R::Geometry> {
        ViewSnapshot {
            kind: self.kind,
            title: self.kind.title().to_string(),
            width: self.width,
            height: self.config.height,
            revision: self.revision,
            state: self.state.clone(),
            tooltip: self.tooltip(),
        }
    }
}
