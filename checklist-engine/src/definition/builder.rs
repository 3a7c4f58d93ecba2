//! Definition Builder
//!
//! Fluent construction of checklist definitions in code.

use crate::domain::{ChecklistItem, Panel, PathKey, Question, SessionConfig};

use super::{
    BranchCompleteRule, ChecklistDefinition, CompletionRule, PageLayout, RevealRule, RowSpec, RuleSet,
    TabRule,
};

pub struct DefinitionBuilder {
    definition: ChecklistDefinition,
}

impl DefinitionBuilder {
    pub fn new(slug: &str, title: &str) -> Self {
        Self {
            definition: ChecklistDefinition {
                slug: slug.to_string(),
                title: title.to_string(),
                config: SessionConfig::default(),
                pages: Vec::new(),
                rules: RuleSet::default(),
            },
        }
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.definition.config = config;
        self
    }

    pub fn page<F>(mut self, title: &str, build: F) -> Self
    where
        F: FnOnce(PageBuilder) -> PageBuilder,
    {
        let page = build(PageBuilder::new(title));
        self.definition.pages.push(PageLayout {
            title: page.title,
            rows: page.rows,
        });
        self
    }

    pub fn reveal(mut self, rule: RevealRule) -> Self {
        self.definition.rules.reveal.push(rule);
        self
    }

    pub fn branch_complete(mut self, question: &str, choice: &str, panel: &str) -> Self {
        self.definition.rules.branch_complete.push(BranchCompleteRule {
            path: PathKey::new(question, choice),
            panel: panel.into(),
        });
        self
    }

    pub fn tab_rule(mut self, rule: TabRule) -> Self {
        self.definition.rules.tab = rule;
        self
    }

    pub fn completion(mut self, rule: CompletionRule) -> Self {
        self.definition.rules.completion = rule;
        self
    }

    pub fn clear_branches_on_page_change(mut self) -> Self {
        self.definition.rules.clear_branches_on_page_change = true;
        self
    }

    /// Finish the definition. Tab titles default to the page titles and
    /// `has_questions` follows the declared rows.
    pub fn build(mut self) -> ChecklistDefinition {
        let definition = &mut self.definition;
        if definition.config.has_sub_tabs && definition.config.page_titles.is_empty() {
            definition.config.page_titles = definition.pages.iter().map(|p| p.title.clone()).collect();
        }
        if definition
            .rows()
            .any(|row| matches!(row, RowSpec::Question(_)))
        {
            definition.config.has_questions = true;
        }
        self.definition
    }
}

pub struct PageBuilder {
    title: String,
    rows: Vec<RowSpec>,
}

impl PageBuilder {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            rows: Vec::new(),
        }
    }

    pub fn item(self, id: &str, text: &str) -> Self {
        self.item_with(ChecklistItem::new(id, text))
    }

    pub fn item_with(mut self, item: ChecklistItem) -> Self {
        self.rows.push(RowSpec::Item(item));
        self
    }

    pub fn question(mut self, question: Question) -> Self {
        self.rows.push(RowSpec::Question(question));
        self
    }

    pub fn panel(mut self, panel: Panel) -> Self {
        self.rows.push(RowSpec::Panel(panel));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_fills_tab_titles() {
        let def = ChecklistDefinition::builder("x", "X")
            .config(SessionConfig::default().with_pages())
            .page("ONE", |p| p.item("a", "A"))
            .page("TWO", |p| p.item("b", "B"))
            .build();
        assert_eq!(def.config.page_titles, vec!["ONE".to_string(), "TWO".to_string()]);
        assert!(!def.config.has_questions);
    }

    #[test]
    fn test_build_detects_questions() {
        let def = ChecklistDefinition::builder("x", "X")
            .page("ONE", |p| p.question(Question::yes_no("q1", "?")))
            .build();
        assert!(def.config.has_questions);
    }
}
