//! Item/Question Disclosure
//!
//! Checked state, prerequisite gating and the reveal/hide of conditional
//! branches keyed by path.

use std::collections::HashMap;

use tracing::{debug, info};

use super::{Session, SessionEvent};
use crate::definition::RevealRule;
use crate::domain::{ElementId, PathKey};

impl Session {
    /// Flip an item's checked mark and re-evaluate everything it gates.
    ///
    /// Unknown ids, hidden items and question proxies are ignored.
    pub fn toggle_item(&mut self, id: &str) {
        if !self.is_visible(id) {
            debug!(item = id, "toggle ignored: unknown or hidden");
            return;
        }
        let Some(item) = self.items.get_mut(id) else {
            return;
        };
        if item.is_question {
            debug!(item = id, "toggle ignored: question proxy");
            return;
        }
        let checked = item.toggle();
        let id = item.id.clone();
        debug!(item = %id, checked, "item toggled");
        self.emit(SessionEvent::ItemToggled {
            id: id.clone(),
            checked,
        });

        self.apply_reveal_rules(&id);
        self.apply_branch_rules();
        self.update_progress();
        self.focus_ready_question(&id);
    }

    /// Answer `question` with `choice` and disclose the matching branch.
    ///
    /// Ignored when the question is hidden, locked or still gated.
    pub fn select_choice(&mut self, question: &str, choice: &str) {
        if !self.is_visible(question) {
            debug!(question, "choice ignored: unknown or hidden question");
            return;
        }
        let Some(entry) = self.questions.get_mut(question) else {
            return;
        };
        if !entry.answer(choice) {
            debug!(question, choice, locked = entry.locked, "choice ignored");
            return;
        }
        let question_id = entry.id.clone();
        if let Some(proxy) = self.items.get_mut(question) {
            proxy.checked = true;
        }
        info!(question = %question_id, choice, "question answered");
        self.emit(SessionEvent::QuestionAnswered {
            question: question_id.clone(),
            choice: choice.to_string(),
        });

        let chosen = PathKey::new(question_id, choice);
        self.dismiss_reveals(&chosen);
        let revealed = self.disclose_branches(&chosen);
        self.apply_branch_rules();
        self.update_progress();
        if let Some(id) = revealed {
            self.request_reveal(id);
        }
    }

    /// Unlock a question, clear its answer and its checked mark
    pub fn reset_question(&mut self, id: &str) {
        let Some(question) = self.questions.get_mut(id) else {
            return;
        };
        let was_answered = question.locked || question.selected.is_some();
        question.reset();
        let question_id = question.id.clone();
        let proxy_was_checked = self
            .items
            .get_mut(id)
            .map(|proxy| std::mem::replace(&mut proxy.checked, false))
            .unwrap_or(false);
        if was_answered || proxy_was_checked {
            debug!(question = %question_id, "question reset");
            self.emit(SessionEvent::QuestionReset { question: question_id });
        }
    }

    /// Recompute which questions are answerable.
    ///
    /// A question with no prerequisite items is always answerable; locked
    /// questions stay disabled whatever their group says.
    pub fn check_prerequisites(&mut self) {
        let mut groups: HashMap<&ElementId, bool> = HashMap::new();
        for item in self.items.values() {
            if let Some(question) = &item.prereq_for {
                let met = groups.entry(question).or_insert(true);
                *met &= item.checked;
            }
        }

        let mut changed = Vec::new();
        for question in self.questions.values_mut() {
            let met = groups.get(&question.id).copied().unwrap_or(true);
            if question.prereqs_met != met {
                question.prereqs_met = met;
                changed.push((question.id.clone(), met));
            }
        }
        for (question, met) in changed {
            self.emit(SessionEvent::PrerequisitesChanged { question, met });
        }
    }

    /// Whether the choice buttons of `question` accept clicks
    pub fn choices_enabled(&self, question: &str) -> bool {
        self.questions
            .get(question)
            .map_or(false, |q| q.choices_enabled())
    }

    pub fn prerequisites_met(&self, question: &str) -> bool {
        self.items
            .values()
            .filter(|item| item.prereq_for.as_ref().map_or(false, |q| q.as_str() == question))
            .all(|item| item.checked)
    }

    fn focus_ready_question(&mut self, id: &ElementId) {
        let Some(item) = self.items.get(id.as_str()) else {
            return;
        };
        let Some(question) = item.prereq_for.clone() else {
            return;
        };
        if item.checked && self.prerequisites_met(question.as_str()) {
            self.request_reveal(question);
        }
    }

    fn apply_reveal_rules(&mut self, toggled: &ElementId) {
        let rules: Vec<RevealRule> = self
            .rules
            .reveal
            .iter()
            .filter(|rule| rule.trigger.contains(toggled))
            .cloned()
            .collect();

        for rule in rules {
            let triggered = rule.trigger.iter().all(|id| self.is_checked(id.as_str()));
            if triggered {
                for panel in &rule.reveal {
                    self.set_visible(panel, true);
                }
                if let Some(question) = &rule.reset {
                    self.reset_question(question.as_str());
                }
                if let Some(last) = rule.reveal.last() {
                    self.request_reveal(last.clone());
                }
            } else if rule.retract {
                let mut was_shown = false;
                for panel in &rule.reveal {
                    was_shown |= self.set_visible(panel, false);
                }
                if was_shown {
                    if let Some(question) = &rule.reset {
                        self.reset_question(question.as_str());
                    }
                }
            }
        }
    }

    /// Hide panels of rules whose follow-up answer was just given
    fn dismiss_reveals(&mut self, chosen: &PathKey) {
        let panels: Vec<ElementId> = self
            .rules
            .reveal
            .iter()
            .filter(|rule| rule.dismissed_by.as_ref() == Some(chosen))
            .flat_map(|rule| rule.reveal.iter().cloned())
            .collect();
        for panel in panels {
            self.set_visible(&panel, false);
        }
    }

    /// Show every element on `chosen`, hide siblings on other answers of the
    /// same question. Returns the last element shown, in page order.
    fn disclose_branches(&mut self, chosen: &PathKey) -> Option<ElementId> {
        let question = chosen.question().as_str().to_string();
        let mut last = None;
        for id in self.ordered_ids() {
            let (on_path, on_question) = {
                let paths = self.paths_of(id.as_str());
                (
                    paths.contains(chosen),
                    paths.iter().any(|key| key.mentions(&question)),
                )
            };
            if on_path {
                self.set_visible(&id, true);
                last = Some(id);
            } else if on_question {
                self.set_visible(&id, false);
            }
        }
        last
    }

    fn apply_branch_rules(&mut self) {
        let rules = self.rules.branch_complete.clone();
        for rule in rules {
            let mut shown = 0;
            let mut done = 0;
            for item in self.items.values() {
                if item.is_question || !item.paths.contains(&rule.path) || !self.visible.contains(&item.id) {
                    continue;
                }
                shown += 1;
                if item.checked {
                    done += 1;
                }
            }
            let complete = shown > 0 && done == shown;
            if self.set_visible(&rule.panel, complete) && complete {
                self.request_reveal(rule.panel.clone());
            }
        }
    }
}
