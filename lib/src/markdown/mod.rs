//! Markdown to HTML conversion for documents.

mod heading;
mod highlight;

pub use heading::AutoHeading;
pub use highlight::SyntaxHighlight;

use pulldown_cmark::{html, Event, Options, Parser};

/// A stage in the event stream between the parser and the HTML writer.
pub trait Plugin {
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a;
}

/// Parser options: every extension except smart punctuation.
pub fn options() -> Options {
    Options::all().difference(Options::ENABLE_SMART_PUNCTUATION)
}

/// Renders `source` to HTML, with heading ids and highlighted code blocks.
pub fn render(source: &str) -> String {
    let mut headings = AutoHeading::default();
    let mut highlight = SyntaxHighlight;

    let events = Parser::new_ext(source, options());
    let events = headings.remap(events);
    let events = highlight.remap(events);

    let mut output = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut output, events);
    output
}

#[cfg(test)]
mod tests {
    use super::render;

    #[test]
    fn renders_common_markdown() {
        let html = render("# Title\n\nSome *emphasis* and a [link](other.md).\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<h1 id=\"title\">Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
        assert!(html.contains("<a href=\"other.md\">link</a>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn quotes_stay_straight() {
        let html = render("\"quoted\" -- text");
        assert!(!html.contains('\u{201c}'));
        assert!(!html.contains('\u{2013}'));
    }
}
