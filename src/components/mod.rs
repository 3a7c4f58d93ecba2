//! UI Components
//!
//! Leptos components rendering the open checklist.

mod checklist_page;
mod item_row;
mod log_panel;
mod pager;
mod panel_row;
mod progress_footer;
mod question_row;
mod scroll_controls;
mod sub_tab_bar;
mod title_bar;

pub use checklist_page::ChecklistPage;
pub use item_row::ItemRow;
pub use log_panel::LogPanel;
pub use pager::Pager;
pub use panel_row::PanelRow;
pub use progress_footer::ProgressFooter;
pub use question_row::QuestionRow;
pub use scroll_controls::ScrollControls;
pub use sub_tab_bar::SubTabBar;
pub use title_bar::TitleBar;
