use pulldown_cmark::{Event, Tag, CodeBlockKind, TagEnd};
use syntect::html::{ClassedHTMLGenerator, ClassStyle};
use syntect::parsing::{SyntaxSet, SyntaxReference};
use once_cell::sync::Lazy;

use super::Plugin;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

static DEFAULT_SYNTAX: Lazy<&'static SyntaxReference>
    = Lazy::new(|| SYNTAX_SET.find_syntax_plain_text());

/// Highlights fenced code blocks into CSS-classed spans with line numbers.
/// Indented code blocks are left alone.
#[derive(Default, Clone)]
pub struct SyntaxHighlight;

pub struct Highlighter<I> {
    generator: Option<ClassedHTMLGenerator<'static>>,
    lines: usize,
    inner: I,
}

impl SyntaxHighlight {
    /// Loads the syntax definitions in the background.
    #[inline]
    pub fn warm_up() {
        rayon::spawn(|| { Lazy::force(&SYNTAX_SET); });
    }
}

impl Plugin for SyntaxHighlight {
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        Highlighter { generator: None, lines: 0, inner: events }
    }
}

fn html_generator(syntax: &SyntaxReference) -> ClassedHTMLGenerator<'_> {
    ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced)
}

fn code_div(lines: usize, code: String) -> String {
    use std::fmt::Write;

    let mut div = String::new();
    let _ = write!(&mut div, "<div class=\"code\" style=\"display: flex;\">");

    let _ = write!(&mut div, "<pre class=\"line-nums\">");
    for i in 1..=lines {
        if i < lines { let _ = writeln!(&mut div, "{}", i); }
        else { let _ = write!(&mut div, "{}", i); }
    }
    let _ = write!(&mut div, "</pre>");

    let _ = write!(&mut div, "<pre class=\"code\"><code>{}</code></pre>", code);
    let _ = write!(&mut div, "</div>");

    div
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for Highlighter<I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(label))) => {
                    let lang = label.split_once(',')
                        .map(|(prefix, _)| prefix)
                        .unwrap_or(&*label)
                        .trim();

                    let syntax = SYNTAX_SET.find_syntax_by_token(lang)
                        .unwrap_or_else(|| &*DEFAULT_SYNTAX);

                    self.generator = Some(html_generator(syntax));
                    self.lines = 0;
                }
                Event::Text(text) if self.generator.is_some() => {
                    if let Some(generator) = self.generator.as_mut() {
                        self.lines += memchr::memchr_iter(b'\n', text.as_bytes()).count();
                        if let Err(e) = generator.parse_html_for_line_which_includes_newline(&text) {
                            tracing::warn!("failed to highlight code block: {e}");
                        }
                    }
                }
                Event::End(TagEnd::CodeBlock) if self.generator.is_some() => {
                    if let Some(generator) = self.generator.take() {
                        let code_html = code_div(self.lines, generator.finalize());
                        return Some(Event::Html(code_html.into()));
                    }
                },
                ev => return Some(ev),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::markdown::render;

    #[test]
    fn fenced_blocks_are_highlighted() {
        let html = render("```rust\nfn main() {}\nlet x = 1;\n```\n");
        assert!(html.contains("<pre class=\"line-nums\">1\n2</pre>"));
        assert!(html.contains("<span class=\"source rust\">"));
        assert!(!html.contains("<pre><code"));
    }

    #[test]
    fn unknown_languages_fall_back_to_plain_text() {
        let html = render("```nosuchlang\n<tag> & text\n```\n");
        assert!(html.contains("<pre class=\"code\"><code>"));
        assert!(html.contains("&lt;tag&gt; &amp; text"));
    }

    #[test]
    fn indented_code_is_untouched() {
        let html = render("    plain code\n");
        assert!(html.contains("<pre><code>plain code\n</code></pre>"));
    }
}
