//! Checklist Definitions
//!
//! A definition is the complete, declarative description of one checklist:
//! its configuration, page layout and the special-case rules that used to
//! be per-checklist code. A single generic `Session` interprets it.

mod builder;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::{
    ChecklistItem, DomainError, DomainResult, ElementId, Panel, PathKey, Question, SessionConfig,
};

pub use builder::{DefinitionBuilder, PageBuilder};

/// One row as declared in a definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RowSpec {
    Item(ChecklistItem),
    Question(Question),
    Panel(Panel),
}

impl RowSpec {
    pub fn id(&self) -> &ElementId {
        match self {
            RowSpec::Item(item) => &item.id,
            RowSpec::Question(question) => &question.id,
            RowSpec::Panel(panel) => &panel.id,
        }
    }

    pub fn paths(&self) -> &[PathKey] {
        match self {
            RowSpec::Item(item) => &item.paths,
            RowSpec::Question(question) => &question.paths,
            RowSpec::Panel(panel) => &panel.paths,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub title: String,
    pub rows: Vec<RowSpec>,
}

/// Something whose visibility a rule can test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// A specific element
    Element(ElementId),
    /// Any element tagged with this path key
    Path(PathKey),
}

impl Target {
    pub fn element(id: &str) -> Self {
        Target::Element(ElementId::from(id))
    }

    pub fn path(question: &str, choice: &str) -> Self {
        Target::Path(PathKey::new(question, choice))
    }
}

/// Trigger group → revealed panels, with an optional gated question reset.
///
/// When every trigger item is checked the panels are shown and `reset` is
/// unlocked so the question can be answered again. When the group stops
/// being complete and the rule retracts, the panels are hidden and the
/// question is reset once more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealRule {
    pub trigger: Vec<ElementId>,
    pub reveal: Vec<ElementId>,
    #[serde(default)]
    pub reset: Option<ElementId>,
    #[serde(default = "default_true")]
    pub retract: bool,
    /// Answer that hides the revealed panels
    #[serde(default)]
    pub dismissed_by: Option<PathKey>,
}

fn default_true() -> bool {
    true
}

impl RevealRule {
    pub fn when_checked(items: &[&str]) -> Self {
        Self {
            trigger: items.iter().map(|id| ElementId::from(*id)).collect(),
            reveal: Vec::new(),
            reset: None,
            retract: true,
            dismissed_by: None,
        }
    }

    pub fn reveal(mut self, panels: &[&str]) -> Self {
        self.reveal.extend(panels.iter().map(|id| ElementId::from(*id)));
        self
    }

    pub fn reset(mut self, question: &str) -> Self {
        self.reset = Some(ElementId::from(question));
        self
    }

    pub fn dismissed_by(mut self, question: &str, choice: &str) -> Self {
        self.dismissed_by = Some(PathKey::new(question, choice));
        self
    }

    /// Keep the panels once revealed even if the group is undone
    pub fn sticky(mut self) -> Self {
        self.retract = false;
        self
    }
}

/// Show `panel` once every visible item on `path` is checked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchCompleteRule {
    pub path: PathKey,
    pub panel: ElementId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProceedPanel {
    pub page: usize,
    pub panel: ElementId,
}

/// When a page counts as done for the next-button highlight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TabRule {
    /// Every non-question item on the page checked
    pub count_checked: bool,
    /// Any of these visible on the page
    pub endpoints: Vec<Target>,
    /// Shown while the page is fully checked
    pub proceed_panels: Vec<ProceedPanel>,
}

impl TabRule {
    pub fn all_checked() -> Self {
        Self {
            count_checked: true,
            ..Self::default()
        }
    }

    pub fn endpoints_only() -> Self {
        Self::default()
    }

    pub fn endpoint(mut self, target: Target) -> Self {
        self.endpoints.push(target);
        self
    }

    pub fn proceed(mut self, page: usize, panel: &str) -> Self {
        self.proceed_panels.push(ProceedPanel {
            page,
            panel: ElementId::from(panel),
        });
        self
    }
}

/// Composable completion predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    #[default]
    Never,
    AnyVisible(Vec<Target>),
    /// Every non-question item of the checklist checked
    AllItemsChecked,
    /// Every non-question item of one page checked
    PageChecked(usize),
    All(Vec<Completion>),
    Any(Vec<Completion>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CompletionRule {
    pub predicate: Completion,
    /// Appended to the progress text as ` -- <tag>`
    pub tag: Option<String>,
    pub show_on_complete: Vec<ElementId>,
    pub hide_on_complete: Vec<ElementId>,
    /// Swap the pager for the next-checklist button only on the last page
    pub proceed_on_last_page_only: bool,
}

impl CompletionRule {
    pub fn new(predicate: Completion, tag: &str) -> Self {
        Self {
            predicate,
            tag: Some(tag.to_string()),
            ..Self::default()
        }
    }

    pub fn show(mut self, panel: &str) -> Self {
        self.show_on_complete.push(ElementId::from(panel));
        self
    }

    pub fn hide(mut self, panel: &str) -> Self {
        self.hide_on_complete.push(ElementId::from(panel));
        self
    }

    pub fn on_last_page_only(mut self) -> Self {
        self.proceed_on_last_page_only = true;
        self
    }

    pub fn suffix(&self) -> String {
        self.tag
            .as_ref()
            .map(|tag| format!(" -- {}", tag))
            .unwrap_or_default()
    }
}

/// Special-case behaviour of one checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuleSet {
    pub reveal: Vec<RevealRule>,
    pub branch_complete: Vec<BranchCompleteRule>,
    pub tab: TabRule,
    pub completion: CompletionRule,
    /// Hide every conditional element whenever the page changes
    pub clear_branches_on_page_change: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistDefinition {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub config: SessionConfig,
    pub pages: Vec<PageLayout>,
    #[serde(default)]
    pub rules: RuleSet,
}

impl ChecklistDefinition {
    pub fn builder(slug: &str, title: &str) -> DefinitionBuilder {
        DefinitionBuilder::new(slug, title)
    }

    /// Parse and validate a JSON definition
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let definition: Self = serde_json::from_str(json)
            .map_err(|e| DomainError::InvalidInput(format!("definition JSON: {}", e)))?;
        definition.validate()?;
        Ok(definition)
    }

    pub fn to_json(&self) -> DomainResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DomainError::Internal(e.to_string()))
    }

    pub fn rows(&self) -> impl Iterator<Item = &RowSpec> {
        self.pages.iter().flat_map(|page| page.rows.iter())
    }

    /// Check internal references before a session is built
    pub fn validate(&self) -> DomainResult<()> {
        if self.slug.is_empty() {
            return Err(DomainError::InvalidInput("definition slug is empty".into()));
        }
        if self.pages.is_empty() {
            return Err(DomainError::InvalidInput(format!("{}: no pages", self.slug)));
        }
        if !self.config.has_pages && self.pages.len() != 1 {
            return Err(DomainError::InvalidInput(format!(
                "{}: single-page checklist declares {} pages",
                self.slug,
                self.pages.len()
            )));
        }
        if self.config.has_sub_tabs && self.config.page_titles.len() != self.pages.len() {
            return Err(DomainError::InvalidInput(format!(
                "{}: {} tab titles for {} pages",
                self.slug,
                self.config.page_titles.len(),
                self.pages.len()
            )));
        }

        let mut ids = HashSet::new();
        let mut items = HashSet::new();
        let mut panels = HashSet::new();
        let mut questions: HashMap<&str, &Question> = HashMap::new();
        for row in self.rows() {
            if !ids.insert(row.id().as_str()) {
                return Err(DomainError::Conflict(format!("{}: duplicate id '{}'", self.slug, row.id())));
            }
            match row {
                RowSpec::Item(item) => {
                    items.insert(item.id.as_str());
                }
                RowSpec::Panel(panel) => {
                    panels.insert(panel.id.as_str());
                }
                RowSpec::Question(question) => {
                    validate_choices(question)?;
                    questions.insert(question.id.as_str(), question);
                }
            }
        }

        let check_path = |key: &PathKey| -> DomainResult<()> {
            match questions.get(key.question().as_str()) {
                Some(question) if question.has_choice(key.choice()) => Ok(()),
                Some(_) => Err(DomainError::InvalidInput(format!("path key '{}' names an unknown choice", key))),
                None => Err(DomainError::NotFound(format!("path key '{}' names an unknown question", key))),
            }
        };
        let check = |set: &HashSet<&str>, id: &ElementId, what: &str| -> DomainResult<()> {
            if set.contains(id.as_str()) {
                Ok(())
            } else {
                Err(DomainError::NotFound(format!("{} '{}'", what, id)))
            }
        };
        let question_ids: HashSet<&str> = questions.keys().copied().collect();
        let check_target = |target: &Target| -> DomainResult<()> {
            match target {
                Target::Element(id) => check(&ids, id, "target element"),
                Target::Path(key) => check_path(key),
            }
        };

        for row in self.rows() {
            for key in row.paths() {
                check_path(key)?;
                if key.question() == row.id() {
                    return Err(DomainError::InvalidInput(format!("'{}' depends on its own answer", row.id())));
                }
            }
            if let RowSpec::Item(ChecklistItem { prereq_for: Some(q), .. }) = row {
                check(&question_ids, q, "prerequisite question")?;
            }
        }

        for rule in &self.rules.reveal {
            if rule.trigger.is_empty() {
                return Err(DomainError::InvalidInput("reveal rule without trigger".into()));
            }
            for id in &rule.trigger {
                check(&items, id, "trigger item")?;
            }
            for id in &rule.reveal {
                check(&panels, id, "revealed panel")?;
            }
            if let Some(q) = &rule.reset {
                check(&question_ids, q, "reset question")?;
            }
            if let Some(key) = &rule.dismissed_by {
                check_path(key)?;
            }
        }
        for rule in &self.rules.branch_complete {
            check_path(&rule.path)?;
            check(&panels, &rule.panel, "branch completion panel")?;
        }
        for target in &self.rules.tab.endpoints {
            check_target(target)?;
        }
        for proceed in &self.rules.tab.proceed_panels {
            if proceed.page >= self.pages.len() {
                return Err(DomainError::InvalidInput(format!("proceed panel on missing page {}", proceed.page)));
            }
            check(&panels, &proceed.panel, "proceed panel")?;
        }
        validate_completion(&self.rules.completion.predicate, self.pages.len(), &check_target)?;
        for id in self
            .rules
            .completion
            .show_on_complete
            .iter()
            .chain(&self.rules.completion.hide_on_complete)
        {
            check(&panels, id, "completion panel")?;
        }
        Ok(())
    }
}

fn validate_choices(question: &Question) -> DomainResult<()> {
    if question.choices.is_empty() {
        return Err(DomainError::InvalidInput(format!("question '{}' has no choices", question.id)));
    }
    let mut seen = HashSet::new();
    for choice in &question.choices {
        if choice.value.is_empty() || choice.value.contains('-') {
            return Err(DomainError::InvalidInput(format!(
                "question '{}' has invalid choice value '{}'",
                question.id, choice.value
            )));
        }
        if !seen.insert(choice.value.as_str()) {
            return Err(DomainError::Conflict(format!(
                "question '{}' repeats choice '{}'",
                question.id, choice.value
            )));
        }
    }
    Ok(())
}

fn validate_completion(
    predicate: &Completion,
    pages: usize,
    check_target: &dyn Fn(&Target) -> DomainResult<()>,
) -> DomainResult<()> {
    match predicate {
        Completion::Never | Completion::AllItemsChecked => Ok(()),
        Completion::PageChecked(page) if *page < pages => Ok(()),
        Completion::PageChecked(page) => Err(DomainError::InvalidInput(format!(
            "completion references missing page {}",
            page
        ))),
        Completion::AnyVisible(targets) => targets.iter().try_for_each(check_target),
        Completion::All(parts) | Completion::Any(parts) => parts
            .iter()
            .try_for_each(|part| validate_completion(part, pages, check_target)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SessionConfig;

    fn sample() -> ChecklistDefinition {
        ChecklistDefinition::builder("sample", "SAMPLE")
            .config(SessionConfig::single_page().with_questions())
            .page("MAIN", |p| {
                p.item("p1", "Power on")
                    .item_with(ChecklistItem::new("p2", "Check LED").prereq_for("q1"))
                    .question(Question::yes_no("q1", "Link up?"))
                    .panel(Panel::success("q1-ok", "Ready").when("q1", "yes"))
                    .panel(Panel::abort("q1-abort", "Abort").when("q1", "no"))
            })
            .completion(CompletionRule::new(
                Completion::AnyVisible(vec![Target::element("q1-ok")]),
                "MISSION READY",
            ))
            .build()
    }

    #[test]
    fn test_valid_definition() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut def = sample();
        def.pages[0].rows.push(RowSpec::Item(ChecklistItem::new("p1", "again")));
        assert!(matches!(def.validate(), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn test_unknown_path_question_rejected() {
        let mut def = sample();
        def.pages[0]
            .rows
            .push(RowSpec::Panel(Panel::instruction("x", "X").when("q9", "yes")));
        assert!(matches!(def.validate(), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_unknown_choice_rejected() {
        let mut def = sample();
        def.pages[0]
            .rows
            .push(RowSpec::Panel(Panel::instruction("x", "X").when("q1", "maybe")));
        assert!(matches!(def.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_rule_with_unknown_panel_rejected() {
        let mut def = sample();
        def.rules
            .reveal
            .push(RevealRule::when_checked(&["p1"]).reveal(&["nowhere"]));
        assert!(matches!(def.validate(), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_single_page_with_two_pages_rejected() {
        let mut def = sample();
        def.pages.push(PageLayout {
            title: "EXTRA".into(),
            rows: Vec::new(),
        });
        assert!(def.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_preserves_rules() {
        let def = sample();
        let json = def.to_json().unwrap();
        let back = ChecklistDefinition::from_json(&json).unwrap();
        assert_eq!(back, def);
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        let err = ChecklistDefinition::from_json("{ not json").unwrap_err();
        assert!(err.to_string().starts_with("invalid checklist data"));
    }

    #[test]
    fn test_suffix_format() {
        assert_eq!(CompletionRule::new(Completion::Never, "SYSTEM SECURED").suffix(), " -- SYSTEM SECURED");
        assert_eq!(CompletionRule::default().suffix(), "");
    }
}
