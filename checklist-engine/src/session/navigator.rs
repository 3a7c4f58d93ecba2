//! Page/Tab Navigator

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Session, SessionEvent};
use crate::domain::ElementId;

/// Pager controls as the footer renders them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PagerState {
    pub current: usize,
    pub total: usize,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub next_highlighted: bool,
    pub title: Option<String>,
}

impl PagerState {
    pub(crate) fn at(current: usize, total: usize, title: Option<String>) -> Self {
        Self {
            current,
            total,
            prev_disabled: current == 0,
            next_disabled: current + 1 >= total,
            next_highlighted: false,
            title,
        }
    }

    /// "2 / 4"
    pub fn indicator(&self) -> String {
        format!("{} / {}", self.current + 1, self.total)
    }
}

impl Session {
    /// Activate page `index`; out-of-range indices are ignored
    pub fn show_page(&mut self, index: usize) {
        if !self.config.has_pages || index >= self.pages.len() {
            debug!(index, "show_page ignored");
            return;
        }
        if self.rules.clear_branches_on_page_change {
            self.clear_conditional();
        }

        let changed = self.current_page != index;
        self.current_page = index;
        let title = self
            .config
            .page_titles
            .get(index)
            .cloned()
            .or_else(|| Some(self.pages[index].title.clone()));
        self.pager = PagerState::at(index, self.pages.len(), title);
        if changed {
            info!(slug = %self.slug, index, "page changed");
        }
        self.emit(SessionEvent::PageChanged { index });
        self.emit(SessionEvent::PagerUpdated(self.pager.clone()));

        self.restore_scroll();
        self.update_progress();
    }

    /// Move by `delta` pages (tab arrows); out-of-range moves are ignored
    pub fn navigate_page(&mut self, delta: isize) {
        let Some(target) = self.current_page.checked_add_signed(delta) else {
            return;
        };
        if target < self.pages.len() {
            self.show_page(target);
        }
    }

    /// Hide every conditional element across all pages and unlock the
    /// questions that drove them, so no answer outlives its branch
    fn clear_conditional(&mut self) {
        let hidden: Vec<ElementId> = self
            .visible
            .iter()
            .filter(|id| self.is_conditional(id.as_str()))
            .cloned()
            .collect();
        for id in hidden {
            self.set_visible(&id, false);
        }
        let answered: Vec<ElementId> = self
            .questions
            .values()
            .filter(|q| q.locked)
            .map(|q| q.id.clone())
            .collect();
        for id in answered {
            self.reset_question(id.as_str());
        }
    }
}
