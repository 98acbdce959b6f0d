//! Markdown rendering for product descriptions and posts

use pulldown_cmark::{Event, Options, Parser, html};

/// Render Markdown to HTML.
///
/// Raw HTML blocks and inline tags in the source are emitted as escaped
/// text, so content can never inject markup into a page.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
