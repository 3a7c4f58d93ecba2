//! Checklist Session Engine
//!
//! Owns the mutable state of one open checklist: checked marks, answers,
//! the visible set, the active page and scroll state. Renderers never reach
//! into the session; they query it by id and subscribe to [`SessionEvent`]s.
//!
//! - disclosure: item toggling, question answers, prerequisite gating
//! - progress: counters, tab completion and completion predicates
//! - navigator: page changes
//! - scroll: native / transform / locked scroll strategies

mod disclosure;
mod navigator;
mod progress;
mod scroll;


use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::definition::{ChecklistDefinition, RowSpec, RuleSet};
use crate::domain::{
    ChecklistItem, DomainResult, ElementId, Entity, Page, Panel, PathKey, Question, Row, ScrollMode,
    SessionConfig,
};

pub use navigator::PagerState;
pub use progress::{FooterState, ProgressReport};
pub use scroll::{
    ElementBounds, LockedScroll, NativeScroll, ScrollAffordance, ScrollCommand, ScrollDirection, ScrollState,
    ScrollStrategy, TransformScroll, Viewport,
};

/// State-change notification delivered to subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ItemToggled { id: ElementId, checked: bool },
    QuestionAnswered { question: ElementId, choice: String },
    QuestionReset { question: ElementId },
    PrerequisitesChanged { question: ElementId, met: bool },
    VisibilityChanged { id: ElementId, visible: bool },
    PageChanged { index: usize },
    PagerUpdated(PagerState),
    ProgressUpdated(ProgressReport),
    FooterUpdated(FooterState),
    ScrollUpdated(ScrollAffordance),
    /// The renderer must apply this to the active scroll container
    Scroll(ScrollCommand),
    /// Newly shown content the renderer should bring into view
    RevealRequested { id: ElementId },
}

pub type ListenerId = u64;

type Listener = Box<dyn FnMut(&SessionEvent)>;

pub struct Session {
    slug: String,
    title: String,
    config: SessionConfig,
    rules: RuleSet,
    pages: Vec<Page>,
    items: HashMap<ElementId, ChecklistItem>,
    questions: HashMap<ElementId, Question>,
    panels: HashMap<ElementId, Panel>,
    owners: HashMap<ElementId, usize>,
    visible: HashSet<ElementId>,
    current_page: usize,
    pager: PagerState,
    progress: Option<ProgressReport>,
    footer: FooterState,
    scroll_strategy: Box<dyn ScrollStrategy>,
    scroll_states: Vec<ScrollState>,
    scroll_affordance: ScrollAffordance,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: ListenerId,
}

fn index_by_id<T: Entity>(entities: Vec<T>) -> HashMap<ElementId, T> {
    entities.into_iter().map(|e| (e.id().clone(), e)).collect()
}

impl Session {
    /// Validate `definition` and open a fresh session on its first page
    pub fn new(definition: ChecklistDefinition) -> DomainResult<Self> {
        definition.validate()?;
        let ChecklistDefinition {
            slug,
            title,
            config,
            pages: layouts,
            rules,
        } = definition;

        let mut items = Vec::new();
        let mut questions = Vec::new();
        let mut panels = Vec::new();
        let mut owners = HashMap::new();
        let mut visible = HashSet::new();
        let mut pages = Vec::with_capacity(layouts.len());

        for (index, layout) in layouts.into_iter().enumerate() {
            let mut rows = Vec::with_capacity(layout.rows.len());
            for spec in layout.rows {
                let id = spec.id().clone();
                owners.insert(id.clone(), index);
                match spec {
                    RowSpec::Item(item) => {
                        if !item.is_conditional() {
                            visible.insert(id.clone());
                        }
                        items.push(item);
                        rows.push(Row::Item(id));
                    }
                    RowSpec::Question(question) => {
                        if question.paths.is_empty() {
                            visible.insert(id.clone());
                        }
                        let mut proxy =
                            ChecklistItem::question_proxy(id.clone(), question.prompt.clone(), question.paths.clone());
                        proxy.checked = question.selected.is_some();
                        items.push(proxy);
                        questions.push(question);
                        rows.push(Row::Question(id));
                    }
                    RowSpec::Panel(panel) => {
                        if !panel.is_conditional() {
                            visible.insert(id.clone());
                        }
                        panels.push(panel);
                        rows.push(Row::Panel(id));
                    }
                }
            }
            pages.push(Page {
                index,
                title: layout.title,
                rows,
            });
        }

        let scroll_strategy: Box<dyn ScrollStrategy> = match config.scroll_mode() {
            ScrollMode::Native => Box::new(NativeScroll),
            ScrollMode::Transform => Box::new(TransformScroll),
            ScrollMode::Locked => Box::new(LockedScroll),
        };
        let scroll_slots = if config.has_pages { pages.len() } else { 1 };
        let pager = PagerState::at(0, pages.len(), config.page_titles.first().cloned());
        let footer = FooterState {
            pager_visible: config.has_pages,
            next_checklist_visible: false,
        };

        let mut session = Self {
            slug,
            title,
            config,
            rules,
            pages,
            items: index_by_id(items),
            questions: index_by_id(questions),
            panels: index_by_id(panels),
            owners,
            visible,
            current_page: 0,
            pager,
            progress: None,
            footer,
            scroll_strategy,
            scroll_states: vec![ScrollState::default(); scroll_slots],
            scroll_affordance: ScrollAffordance::DISABLED,
            listeners: Vec::new(),
            next_listener: 0,
        };
        session.initialize();
        Ok(session)
    }

    fn initialize(&mut self) {
        self.update_progress();
        if self.config.has_pages {
            self.show_page(0);
        }
        debug!(slug = %self.slug, pages = self.pages.len(), "session opened");
    }

    // ========================
    // Subscriptions
    // ========================

    /// Register a listener for every subsequent state change
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: SessionEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    // ========================
    // Queries
    // ========================

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn item(&self, id: &str) -> Option<&ChecklistItem> {
        self.items.get(id)
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.get(id)
    }

    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.panels.get(id)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.items.get(id).map_or(false, |item| item.checked)
    }

    /// Page owning `id`
    pub fn page_of(&self, id: &str) -> Option<usize> {
        self.owners.get(id).copied()
    }

    pub fn pager(&self) -> &PagerState {
        &self.pager
    }

    pub fn progress(&self) -> Option<&ProgressReport> {
        self.progress.as_ref()
    }

    pub fn footer(&self) -> FooterState {
        self.footer
    }

    // ========================
    // Visibility helpers
    // ========================

    fn paths_of(&self, id: &str) -> &[PathKey] {
        if let Some(item) = self.items.get(id) {
            &item.paths
        } else if let Some(panel) = self.panels.get(id) {
            &panel.paths
        } else {
            &[]
        }
    }

    /// Hidden by default and subject to disclosure
    fn is_conditional(&self, id: &str) -> bool {
        if let Some(item) = self.items.get(id) {
            item.is_conditional()
        } else {
            self.panels.get(id).map_or(false, Panel::is_conditional)
        }
    }

    /// Returns true when visibility actually changed
    fn set_visible(&mut self, id: &ElementId, visible: bool) -> bool {
        let changed = if visible {
            self.visible.insert(id.clone())
        } else {
            self.visible.remove(id.as_str())
        };
        if changed {
            self.emit(SessionEvent::VisibilityChanged {
                id: id.clone(),
                visible,
            });
        }
        changed
    }

    fn request_reveal(&mut self, id: ElementId) {
        self.emit(SessionEvent::RevealRequested { id });
    }

    /// Row ids of every page in display order
    fn ordered_ids(&self) -> Vec<ElementId> {
        self.pages
            .iter()
            .flat_map(|page| page.rows.iter().map(|row| row.id().clone()))
            .collect()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("slug", &self.slug)
            .field("current_page", &self.current_page)
            .field("visible", &self.visible.len())
            .field("progress", &self.progress)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
