//! Layout Measurement
//!
//! Everything that touches element geometry. The engine works on the
//! numbers reported here and hands back [`ScrollCommand`]s to apply.

use rov_checklist_engine::session::{ElementBounds, ScrollCommand, Viewport};
use rov_checklist_engine::ElementId;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// Clipping container around the active page
pub const CONTAINER_ID: &str = "page-content";
/// Element that is translated (or natively scrolled)
pub const WRAPPER_ID: &str = "scroll-wrapper";

/// Wait for the DOM to reflect a change before measuring
pub const SETTLE_DELAY_MS: u32 = 50;
pub const REVEAL_DELAY_MS: u32 = 100;
pub const AUTO_SCROLL_DELAY_MS: u32 = 300;

/// Inline `display` for a row; an empty value falls back to the stylesheet
pub fn display(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        "none"
    }
}

fn element(id: &str) -> Option<Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

/// Current geometry of the active scroll container
pub fn measure_viewport(native: bool) -> Option<Viewport> {
    let wrapper = element(WRAPPER_ID)?;
    let content_height = f64::from(wrapper.scroll_height());
    if native {
        let viewport = Viewport::new(content_height, f64::from(wrapper.client_height()));
        return Some(viewport.with_scroll_top(f64::from(wrapper.scroll_top())));
    }
    let container = element(CONTAINER_ID)?;
    Some(Viewport::new(content_height, f64::from(container.client_height())))
}

pub fn apply_scroll(command: ScrollCommand) {
    let Some(wrapper) = element(WRAPPER_ID) else {
        return;
    };
    match command {
        ScrollCommand::ScrollBy(delta) => wrapper.scroll_by_with_x_and_y(0.0, delta),
        ScrollCommand::ScrollTo(top) => wrapper.set_scroll_top(top.round() as i32),
        ScrollCommand::Translate(offset) => {
            let Ok(wrapper) = wrapper.dyn_into::<HtmlElement>() else {
                return;
            };
            let transform = format!("translateY({}px)", offset);
            if let Err(e) = wrapper.style().set_property("transform", &transform) {
                tracing::warn!("failed to translate content: {:?}", e);
            }
        }
    }
}

/// Bottom edge of `id` against the bottom edge of the container
pub fn element_bounds(id: &str) -> Option<ElementBounds> {
    let target = element(id)?.get_bounding_client_rect();
    let container = element(CONTAINER_ID)?.get_bounding_client_rect();
    Some(ElementBounds {
        bottom: target.bottom(),
        container_bottom: container.bottom(),
    })
}

/// The ids among `ids` whose element lies entirely inside the container,
/// in the order given
pub fn fully_visible<'a>(ids: impl IntoIterator<Item = &'a ElementId>) -> Vec<ElementId> {
    let Some(container) = element(CONTAINER_ID).map(|c| c.get_bounding_client_rect()) else {
        return Vec::new();
    };
    ids.into_iter()
        .filter(|id| {
            element(id.as_str()).map_or(false, |el| {
                let rect = el.get_bounding_client_rect();
                // hidden rows collapse to an empty rect
                rect.height() > 0.0 && rect.top() >= container.top() && rect.bottom() <= container.bottom()
            })
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_rows_are_not_displayed() {
        assert_eq!(display(false), "none");
        assert_eq!(display(true), "");
    }

    #[test]
    fn test_stylesheet_is_bundled() {
        let index = include_str!("../index.html");
        assert!(index.contains(r#"<link data-trunk rel="css" href="styles.css" />"#));

        let css = include_str!("../styles.css");
        let container = format!("#{} {{", CONTAINER_ID);
        let rule = &css[css.find(&container).expect("container rule")..];
        let rule = &rule[..rule.find('}').unwrap_or(rule.len())];
        assert!(rule.contains("overflow: hidden"));
        assert!(css.contains(&format!("#{}.native", WRAPPER_ID)));
    }
}
