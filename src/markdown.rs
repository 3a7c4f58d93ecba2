//! Checklist Markdown
//!
//! Row and panel text is markdown, extended with colour spans:
//! `%r%red%r%`, `%g%`, `%b%`, `%y%`, `%o%`, `%p%`.

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser};

/// Color codes and their hex values
const COLORS: &[(&str, &str)] = &[
    ("r", "#e74c3c"), // red
    ("g", "#27ae60"), // green
    ("b", "#3498db"), // blue
    ("y", "#f1c40f"), // yellow
    ("o", "#e67e22"), // orange
    ("p", "#9b59b6"), // purple
];

/// Parse markdown with colour spans
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Parse markdown for inline use (strips outer <p> tags)
pub fn parse_markdown_inline(text: &str) -> String {
    let html = parse_markdown(text);

    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    for event in parser {
        match event {
            // Raw HTML in checklist text is shown, not injected
            Event::Html(html) | Event::InlineHtml(html) => events.push(Event::Text(html)),
            Event::Text(text) if contains_color(&text) => events.extend(color_events(&text)),
            other => events.push(other),
        }
    }
    events
}

fn contains_color(text: &str) -> bool {
    COLORS
        .iter()
        .any(|(code, _)| text.contains(&format!("%{}%", code)))
}

/// Split text at colour markers; an unterminated marker is kept as text
fn color_events(text: &str) -> Vec<Event<'static>> {
    let mut events = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        let earliest = COLORS
            .iter()
            .filter_map(|(code, color)| {
                let pattern = format!("%{}%", code);
                remaining.find(&pattern).map(|pos| (pos, pattern, *color))
            })
            .min_by_key(|(pos, _, _)| *pos);

        let Some((pos, pattern, color)) = earliest else {
            events.push(Event::Text(CowStr::from(remaining.to_string())));
            break;
        };

        if pos > 0 {
            events.push(Event::Text(CowStr::from(remaining[..pos].to_string())));
        }
        remaining = &remaining[pos + pattern.len()..];

        match remaining.find(&pattern) {
            Some(end_pos) => {
                events.push(Event::Html(CowStr::from(format!("<span style=\"color: {}\">", color))));
                if end_pos > 0 {
                    events.push(Event::Text(CowStr::from(remaining[..end_pos].to_string())));
                }
                events.push(Event::Html(CowStr::from("</span>")));
                remaining = &remaining[end_pos + pattern.len()..];
            }
            None => events.push(Event::Text(CowStr::from(pattern))),
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_markdown() {
        assert_eq!(parse_markdown_inline("**Power** on"), "<strong>Power</strong> on");
    }

    #[test]
    fn test_color_span() {
        assert_eq!(
            parse_markdown_inline("Check %r%tether%r% slack"),
            "Check <span style=\"color: #e74c3c\">tether</span> slack"
        );
    }

    #[test]
    fn test_unterminated_color_is_literal() {
        assert_eq!(parse_markdown_inline("50%g% done"), "50%g% done");
    }

    #[test]
    fn test_raw_html_is_escaped() {
        assert_eq!(parse_markdown_inline("a <b>b</b>"), "a &lt;b&gt;b&lt;/b&gt;");
    }
}
