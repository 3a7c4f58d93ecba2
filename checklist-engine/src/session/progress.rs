//! Progress Evaluation
//!
//! Counters over the countable items in scope, per-page "done" detection
//! and the checklist-wide completion predicate.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Session, SessionEvent};
use crate::definition::{Completion, Target};
use crate::domain::ElementId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub checked: usize,
    pub total: usize,
    pub complete: bool,
    /// Completion tag rendered as ` -- TAG`, empty when untagged
    pub suffix: String,
}

impl ProgressReport {
    pub fn text(&self) -> String {
        let mut text = format!("{} / {} ITEMS COMPLETE", self.checked, self.total);
        if self.complete {
            text.push_str(&self.suffix);
        }
        text
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Which footer control is offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FooterState {
    pub pager_visible: bool,
    pub next_checklist_visible: bool,
}

impl Session {
    /// Recount the items in scope and re-evaluate completion.
    ///
    /// Always re-derives prerequisite gating and scroll affordances first,
    /// so callers never need a separate pass.
    pub fn update_progress(&mut self) {
        self.check_prerequisites();
        if self.config.tracks_progress {
            let (checked, total) = self.count_in_scope();
            if self.config.has_pages {
                self.check_tab_completion();
            }
            let complete = self.evaluate(&self.rules.completion.predicate);
            self.apply_completion(complete);

            let report = ProgressReport {
                checked,
                total,
                complete,
                suffix: self.rules.completion.suffix(),
            };
            if self.progress.as_ref() != Some(&report) {
                let was_complete = self.progress.as_ref().map_or(false, |p| p.complete);
                if complete && !was_complete {
                    info!(slug = %self.slug, "checklist complete");
                }
                self.progress = Some(report.clone());
                self.emit(SessionEvent::ProgressUpdated(report));
            }
        }
        self.settle_scroll();
    }

    /// (checked, total) over the current page when paged, else the whole list
    fn count_in_scope(&self) -> (usize, usize) {
        let pages = if self.config.has_pages {
            &self.pages[self.current_page..=self.current_page]
        } else {
            &self.pages[..]
        };
        let mut checked = 0;
        let mut total = 0;
        for id in pages.iter().flat_map(|page| page.item_ids()) {
            let Some(item) = self.items.get(id) else {
                continue;
            };
            if item.is_countable(self.visible.contains(id)) {
                total += 1;
                if item.checked {
                    checked += 1;
                }
            }
        }
        (checked, total)
    }

    /// Every non-question item on `page` is checked (and there is at least one)
    pub fn page_checked(&self, page: usize) -> bool {
        let Some(page) = self.pages.get(page) else {
            return false;
        };
        let mut any = false;
        for id in page.item_ids() {
            match self.items.get(id) {
                Some(item) if item.is_question => {}
                Some(item) if !item.checked => return false,
                Some(_) => any = true,
                None => {}
            }
        }
        any
    }

    /// Whether `page` counts as done for the next-button highlight
    pub fn page_done(&self, page: usize) -> bool {
        let tab = &self.rules.tab;
        (tab.count_checked && self.page_checked(page))
            || tab
                .endpoints
                .iter()
                .any(|target| self.target_visible(target, Some(page)))
    }

    /// Highlight the next button and toggle proceed panels for the current page
    pub fn check_tab_completion(&mut self) {
        let page = self.current_page;
        let highlight = self.page_done(page) && page + 1 < self.pages.len();
        if self.pager.next_highlighted != highlight {
            self.pager.next_highlighted = highlight;
            self.emit(SessionEvent::PagerUpdated(self.pager.clone()));
        }

        let checked = self.page_checked(page);
        let panels: Vec<ElementId> = self
            .rules
            .tab
            .proceed_panels
            .iter()
            .filter(|proceed| proceed.page == page)
            .map(|proceed| proceed.panel.clone())
            .collect();
        for panel in panels {
            if self.set_visible(&panel, checked) && checked {
                self.request_reveal(panel);
            }
        }
    }

    pub fn evaluate(&self, predicate: &Completion) -> bool {
        match predicate {
            Completion::Never => false,
            Completion::AnyVisible(targets) => targets.iter().any(|t| self.target_visible(t, None)),
            Completion::AllItemsChecked => {
                let mut any = false;
                for item in self.items.values().filter(|item| !item.is_question) {
                    if !item.checked {
                        return false;
                    }
                    any = true;
                }
                any
            }
            Completion::PageChecked(page) => self.page_checked(*page),
            Completion::All(parts) => parts.iter().all(|part| self.evaluate(part)),
            Completion::Any(parts) => parts.iter().any(|part| self.evaluate(part)),
        }
    }

    fn target_visible(&self, target: &Target, page: Option<usize>) -> bool {
        let on_page = |id: &str| page.map_or(true, |p| self.owners.get(id) == Some(&p));
        match target {
            Target::Element(id) => self.visible.contains(id) && on_page(id.as_str()),
            Target::Path(key) => self
                .visible
                .iter()
                .any(|id| on_page(id.as_str()) && self.paths_of(id.as_str()).contains(key)),
        }
    }

    fn apply_completion(&mut self, complete: bool) {
        let rule = &self.rules.completion;
        let last_page = !self.config.has_pages || self.current_page + 1 == self.pages.len();
        let proceed = complete && (!rule.proceed_on_last_page_only || last_page);
        let show = rule.show_on_complete.clone();
        let hide = rule.hide_on_complete.clone();

        for panel in show {
            if self.set_visible(&panel, complete) && complete {
                self.request_reveal(panel);
            }
        }
        for panel in hide {
            self.set_visible(&panel, !complete);
        }

        let footer = FooterState {
            pager_visible: self.config.has_pages && !proceed,
            next_checklist_visible: proceed && self.config.next_checklist.is_some(),
        };
        if footer != self.footer {
            self.footer = footer;
            self.emit(SessionEvent::FooterUpdated(footer));
        }
    }
}
