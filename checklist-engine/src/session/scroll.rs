//! Scroll Controller
//!
//! The engine never measures anything. The renderer reports a [`Viewport`]
//! through [`Session::settle`] and applies the [`ScrollCommand`]s it gets
//! back as events.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Session, SessionEvent};
use crate::domain::ElementId;

/// Slack below the last row when translating content
pub const SCROLL_BUFFER_PX: f64 = 20.0;
/// Default step as a fraction of the container height
pub const SCROLL_STEP_RATIO: f64 = 0.7;
pub const REVEAL_MARGIN_PX: f64 = 100.0;
pub const REVEAL_PADDING_PX: f64 = 150.0;

/// Measured layout of the active scroll container
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub content_height: f64,
    pub container_height: f64,
    /// Native scroll position; ignored by the transform strategy
    pub scroll_top: f64,
}

impl Viewport {
    pub fn new(content_height: f64, container_height: f64) -> Self {
        Self {
            content_height,
            container_height,
            scroll_top: 0.0,
        }
    }

    pub fn with_scroll_top(mut self, scroll_top: f64) -> Self {
        self.scroll_top = scroll_top;
        self
    }

    pub fn overflows(&self) -> bool {
        self.content_height > self.container_height
    }

    /// Most negative translate offset allowed
    pub fn max_scroll(&self) -> f64 {
        -(self.content_height - self.container_height + SCROLL_BUFFER_PX)
    }

    fn max_scroll_top(&self) -> f64 {
        (self.content_height - self.container_height).max(0.0)
    }

    pub fn default_step(&self) -> f64 {
        self.container_height * SCROLL_STEP_RATIO
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// What the renderer must do to the scroll container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScrollCommand {
    /// Native `scrollBy` with this signed delta
    ScrollBy(f64),
    /// Native absolute `scrollTop`
    ScrollTo(f64),
    /// Absolute `translateY` offset
    Translate(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollAffordance {
    pub up_disabled: bool,
    pub down_disabled: bool,
}

impl ScrollAffordance {
    pub const DISABLED: Self = Self {
        up_disabled: true,
        down_disabled: true,
    };
}

impl Default for ScrollAffordance {
    fn default() -> Self {
        Self::DISABLED
    }
}

/// Per-page scroll state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Translate offset, always within `[max_scroll, 0]`
    pub offset: f64,
    pub viewport: Option<Viewport>,
}

/// Bottom edges of a revealed element and its scroll container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBounds {
    pub bottom: f64,
    pub container_bottom: f64,
}

pub trait ScrollStrategy: fmt::Debug {
    /// Move one step; `amount` overrides the default step
    fn step(&self, state: &mut ScrollState, direction: ScrollDirection, amount: Option<f64>) -> Option<ScrollCommand>;

    /// Re-clamp against the last measurement and derive button state
    fn settle(&self, state: &mut ScrollState) -> ScrollAffordance;

    /// Command re-applying a page's stored position after a page switch
    fn restore(&self, _state: &ScrollState) -> Option<ScrollCommand> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeScroll;

impl ScrollStrategy for NativeScroll {
    fn step(&self, state: &mut ScrollState, direction: ScrollDirection, amount: Option<f64>) -> Option<ScrollCommand> {
        let step = amount.or_else(|| state.viewport.map(|v| v.default_step()))?;
        let delta = match direction {
            ScrollDirection::Down => step,
            ScrollDirection::Up => -step,
        };
        if let Some(viewport) = state.viewport.as_mut() {
            viewport.scroll_top = (viewport.scroll_top + delta).clamp(0.0, viewport.max_scroll_top());
        }
        Some(ScrollCommand::ScrollBy(delta))
    }

    fn settle(&self, state: &mut ScrollState) -> ScrollAffordance {
        match state.viewport {
            Some(v) if v.overflows() => ScrollAffordance {
                up_disabled: v.scroll_top <= 0.0,
                down_disabled: v.scroll_top >= v.content_height - v.container_height - 1.0,
            },
            _ => ScrollAffordance::DISABLED,
        }
    }

    /// The container is shared between pages, so a page never seen yet
    /// starts at the top instead of inheriting the last page's position
    fn restore(&self, state: &ScrollState) -> Option<ScrollCommand> {
        let scroll_top = state.viewport.map_or(0.0, |v| v.scroll_top);
        Some(ScrollCommand::ScrollTo(scroll_top))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransformScroll;

impl ScrollStrategy for TransformScroll {
    fn step(&self, state: &mut ScrollState, direction: ScrollDirection, amount: Option<f64>) -> Option<ScrollCommand> {
        let viewport = state.viewport?;
        if !viewport.overflows() {
            return None;
        }
        let step = amount.unwrap_or_else(|| viewport.default_step());
        let moved = match direction {
            ScrollDirection::Down => state.offset - step,
            ScrollDirection::Up => state.offset + step,
        };
        state.offset = moved.clamp(viewport.max_scroll(), 0.0);
        Some(ScrollCommand::Translate(state.offset))
    }

    fn settle(&self, state: &mut ScrollState) -> ScrollAffordance {
        let Some(viewport) = state.viewport else {
            return ScrollAffordance::DISABLED;
        };
        if !viewport.overflows() {
            state.offset = 0.0;
            return ScrollAffordance::DISABLED;
        }
        let max = viewport.max_scroll();
        state.offset = state.offset.clamp(max, 0.0);
        ScrollAffordance {
            up_disabled: state.offset >= 0.0,
            down_disabled: state.offset <= max,
        }
    }

    fn restore(&self, state: &ScrollState) -> Option<ScrollCommand> {
        Some(ScrollCommand::Translate(state.offset))
    }
}

/// Both buttons permanently disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct LockedScroll;

impl ScrollStrategy for LockedScroll {
    fn step(&self, _state: &mut ScrollState, _direction: ScrollDirection, _amount: Option<f64>) -> Option<ScrollCommand> {
        None
    }

    fn settle(&self, _state: &mut ScrollState) -> ScrollAffordance {
        ScrollAffordance::DISABLED
    }
}

impl Session {
    fn scroll_slot(&self) -> usize {
        if self.config.has_pages {
            self.current_page.min(self.scroll_states.len() - 1)
        } else {
            0
        }
    }

    pub fn scroll_affordance(&self) -> ScrollAffordance {
        self.scroll_affordance
    }

    /// Translate offset of the active page
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_states[self.scroll_slot()].offset
    }

    pub fn page_scroll_offset(&self, page: usize) -> Option<f64> {
        self.scroll_states.get(page).map(|state| state.offset)
    }

    /// Scroll the active container one step, or by `amount` pixels
    pub fn scroll_content(&mut self, direction: ScrollDirection, amount: Option<f64>) {
        let slot = self.scroll_slot();
        let command = self
            .scroll_strategy
            .step(&mut self.scroll_states[slot], direction, amount);
        if let Some(command) = command {
            debug!(?direction, ?command, "scroll");
            self.emit(SessionEvent::Scroll(command));
        }
        self.settle_scroll();
    }

    /// Record a fresh measurement of the active container.
    ///
    /// Settling twice with the same viewport emits nothing the second time.
    pub fn settle(&mut self, viewport: Viewport) {
        let slot = self.scroll_slot();
        self.scroll_states[slot].viewport = Some(viewport);
        self.settle_scroll();
    }

    pub(super) fn settle_scroll(&mut self) {
        let slot = self.scroll_slot();
        let before = self.scroll_states[slot].offset;
        let affordance = self.scroll_strategy.settle(&mut self.scroll_states[slot]);
        let after = self.scroll_states[slot].offset;
        if after != before {
            self.emit(SessionEvent::Scroll(ScrollCommand::Translate(after)));
        }
        if affordance != self.scroll_affordance {
            self.scroll_affordance = affordance;
            self.emit(SessionEvent::ScrollUpdated(affordance));
        }
    }

    pub(super) fn restore_scroll(&mut self) {
        let slot = self.scroll_slot();
        if let Some(command) = self.scroll_strategy.restore(&self.scroll_states[slot]) {
            self.emit(SessionEvent::Scroll(command));
        }
    }

    /// Scroll down when a revealed element sits too close to the bottom edge
    pub fn scroll_into_view_if_needed(&mut self, bounds: ElementBounds) -> bool {
        if bounds.bottom <= bounds.container_bottom - REVEAL_MARGIN_PX {
            return false;
        }
        let amount = bounds.bottom - bounds.container_bottom + REVEAL_PADDING_PX;
        self.scroll_content(ScrollDirection::Down, Some(amount));
        true
    }

    /// Step down once the last fully visible item of a page gets checked.
    ///
    /// `fully_visible` lists the items currently entirely inside the
    /// container, top to bottom.
    pub fn auto_scroll_after_check(&mut self, item: &str, fully_visible: &[ElementId]) -> bool {
        if !self.config.has_pages {
            return false;
        }
        let Some(last) = fully_visible.last() else {
            return false;
        };
        if last.as_str() != item || !fully_visible.iter().all(|id| self.is_checked(id.as_str())) {
            return false;
        }
        if self.scroll_affordance.down_disabled {
            return false;
        }
        self.scroll_content(ScrollDirection::Down, None);
        true
    }
}
