//! Newsletter Markdown
//!
//! Campaign bodies are written in Markdown and mailed as HTML plus a
//! plain-text part. Extends pulldown-cmark with:
//! - Raw HTML in the source is escaped, never passed through
//! - Relative image/link URLs are resolved against the asset base
//! - Images get inline sizing so mail clients don't blow them up

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Rendered campaign body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub text: String,
}

/// Render `source` to HTML and plain text. `asset_base` is prefixed to
/// relative URLs (`/uploads/banner.png`).
pub fn render(source: &str, asset_base: &str) -> Rendered {
    Rendered {
        html: render_html(source, asset_base),
        text: render_text(source),
    }
}

pub fn render_html(source: &str, asset_base: &str) -> String {
    let parser = Parser::new_ext(source, get_options());
    let events = transform_events(parser, asset_base);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Plain-text part: inline markup and images dropped, links kept as
/// `text (url)`
pub fn render_text(source: &str) -> String {
    let mut out = String::new();
    let mut link_stack: Vec<String> = Vec::new();
    let mut in_image = false;

    for event in Parser::new_ext(source, get_options()) {
        match event {
            Event::Start(Tag::Image { .. }) => in_image = true,
            Event::End(TagEnd::Image) => in_image = false,
            _ if in_image => {}
            Event::Text(t) | Event::Code(t) | Event::Html(t) | Event::InlineHtml(t) => out.push_str(&t),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => out.push_str("- "),
            Event::Start(Tag::Link { dest_url, .. }) => link_stack.push(dest_url.to_string()),
            Event::End(TagEnd::Link) => {
                if let Some(url) = link_stack.pop() {
                    out.push_str(&format!(" ({})", url));
                }
            }
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock | TagEnd::TableRow) => {
                out.push('\n');
            }
            Event::End(TagEnd::TableCell) => out.push('\t'),
            Event::Rule => out.push_str("---\n"),
            _ => {}
        }
    }

    out.lines().map(str::trim_end).collect::<Vec<_>>().join("\n").trim().to_string()
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

// State for the event transformer
enum State {
    Normal,
    /// Inside an image; its alt text events are dropped
    InImage { depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>, asset_base: &str) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::Image { dest_url, title, .. }) => {
                    let url = resolve_url(&dest_url, asset_base);
                    let html = format!(
                        r#"<img src="{}" alt="{}" style="max-width: 100%; height: auto; display: block;" />"#,
                        escape_html(&url),
                        escape_html(&title)
                    );
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::InImage { depth: 0 };
                }
                Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                    let dest_url = CowStr::from(resolve_url(&dest_url, asset_base));
                    events.push(Event::Start(Tag::Link { link_type, dest_url, title, id }));
                }
                // Raw HTML is shown literally
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                other => events.push(other),
            },

            State::InImage { ref mut depth } => match event {
                Event::Start(_) => *depth += 1,
                Event::End(_) => {
                    if *depth == 0 {
                        state = State::Normal;
                    } else {
                        *depth -= 1;
                    }
                }
                _ => {}
            },
        }
    }

    events
}

const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Absolute, mailto and fragment URLs pass through; paths get the asset base
fn resolve_url(url: &str, asset_base: &str) -> String {
    let lower = url.to_lowercase();
    let is_absolute = lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("mailto:")
        || lower.starts_with("data:")
        || url.starts_with("//")
        || url.starts_with('#');

    if is_absolute || asset_base.is_empty() {
        return url.to_string();
    }

    let path = utf8_percent_encode(url.trim_start_matches("./").trim_start_matches('/'), PATH_ENCODE_SET);
    format!("{}/{}", asset_base.trim_end_matches('/'), path)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:5000";

    #[test]
    fn test_relative_image_uses_asset_base() {
        let html = render_html("![Banner](</uploads/spring sale.png>)", BASE);
        assert!(html.contains(r#"src="http://localhost:5000/uploads/spring%20sale.png""#), "{}", html);
        // alt text is not rendered as a separate text node
        assert!(!html.contains(">Banner<"));
    }

    #[test]
    fn test_absolute_urls_untouched() {
        let html = render_html("[Shop](https://shop.io/deals) ![x](https://cdn.io/a.png)", BASE);
        assert!(html.contains(r#"href="https://shop.io/deals""#));
        assert!(html.contains(r#"src="https://cdn.io/a.png""#));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_html("Hello <script>alert(1)</script>", BASE);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_tables_and_strikethrough() {
        let html = render_html("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~ new", BASE);
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_plain_text_part() {
        let text = render_text("# Spring Sale\n\nUp to **50%** off. [Shop now](https://shop.io)\n\n- Shoes\n- Bags");
        assert_eq!(text, "Spring Sale\nUp to 50% off. Shop now (https://shop.io)\n- Shoes\n- Bags");
    }

    #[test]
    fn test_render_both_parts() {
        let rendered = render("Hi *there*", BASE);
        assert_eq!(rendered.html.trim(), "<p>Hi <em>there</em></p>");
        assert_eq!(rendered.text, "Hi there");
    }
}
