use std::collections::VecDeque;

use pulldown_cmark::{Event, Tag, TagEnd};
use rustc_hash::FxHashMap;

use super::Plugin;
use crate::util::{dedup_id, slugify};

/// Gives every heading without an explicit id a unique, slugified one.
#[derive(Default)]
pub struct AutoHeading {
    seen: FxHashMap<String, usize>,
}

struct HeadingIterator<'a, 's, I: Iterator<Item = Event<'a>>> {
    stack: VecDeque<Event<'a>>,
    seen: &'s mut FxHashMap<String, usize>,
    inner: I,
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for HeadingIterator<'a, '_, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.stack.pop_front() {
            return Some(event);
        }

        match self.inner.next()? {
            Event::Start(Tag::Heading { level, id: None, classes, attrs }) => {
                let mut text = String::new();
                loop {
                    let event = self.inner.next()?;
                    if let Event::Text(ref s) | Event::Code(ref s) = event {
                        text.push_str(s);
                    } else if let Event::SoftBreak | Event::HardBreak = event {
                        text.push(' ');
                    } else if let Event::End(TagEnd::Heading(..)) = event {
                        break;
                    }

                    self.stack.push_back(event);
                }

                let id = dedup_id(self.seen, slugify(&text));
                let tag = Tag::Heading { level, id: Some(id.into()), classes, attrs };
                self.stack.push_back(Event::End(TagEnd::Heading(level)));
                Some(Event::Start(tag))
            },
            event => Some(event)
        }
    }
}

impl Plugin for AutoHeading {
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        HeadingIterator {
            seen: &mut self.seen,
            inner: events,
            stack: VecDeque::with_capacity(4),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::markdown::render;

    #[test]
    fn repeated_headings_get_distinct_ids() {
        let html = render("# Setup\n\n## Setup\n\n## Usage `cli`\n\n# Custom {#mine}\n");
        assert!(html.contains("<h1 id=\"setup\">Setup</h1>"));
        assert!(html.contains("<h2 id=\"setup-1\">Setup</h2>"));
        assert!(html.contains("<h2 id=\"usage-cli\">Usage <code>cli</code></h2>"));
        assert!(html.contains("id=\"mine\""));
    }

    #[test]
    fn multiline_headings_keep_word_breaks() {
        let html = render("Getting\nstarted\n===\n");
        assert!(html.contains("<h1 id=\"getting-started\">"), "{html}");
    }
}
