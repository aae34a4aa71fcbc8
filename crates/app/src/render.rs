//! Markdown to plain terminal text.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

#[derive(Default)]
struct Writer {
    out: String,
    heading: Option<(HeadingLevel, String)>,
    lists: Vec<Option<u64>>,
    links: Vec<String>,
    in_code_block: bool,
    item_open: bool,
    cell: usize,
}

impl Writer {
    fn push(&mut self, text: &str) {
        self.item_open = false;
        match self.heading.as_mut() {
            Some((_, buf)) => buf.push_str(text),
            None => self.out.push_str(text),
        }
    }

    fn blank_line(&mut self) {
        if self.out.is_empty() {
            return;
        }
        while self.out.ends_with('\n') {
            self.out.pop();
        }
        self.out.push_str("\n\n");
    }

    fn newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn code_text(&mut self, text: &str) {
        for line in text.lines() {
            self.out.push_str("    ");
            self.out.push_str(line);
            self.out.push('\n');
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.in_code_block => self.code_text(&text),
            Event::Text(text) => self.push(&text),
            Event::Code(code) => self.push(&format!("`{code}`")),
            Event::SoftBreak => self.push(" "),
            Event::HardBreak => self.push("\n"),
            Event::Rule => {
                self.blank_line();
                self.out.push_str("----");
            }
            Event::TaskListMarker(done) => self.push(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.blank_line();
                self.heading = Some((level, String::new()));
            }
            Tag::Paragraph if !self.item_open => self.blank_line(),
            Tag::CodeBlock(_) => {
                self.blank_line();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.blank_line();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.newline();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "- ".to_owned(),
                };
                self.out.push_str(&"  ".repeat(depth));
                self.out.push_str(&marker);
                self.item_open = true;
            }
            Tag::Link { dest_url, .. } => self.links.push(dest_url.into_string()),
            Tag::Table(_) => self.blank_line(),
            Tag::TableCell => {
                if self.cell > 0 {
                    self.push(" | ");
                }
                self.cell += 1;
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                if let Some((level, title)) = self.heading.take() {
                    let title = title.trim();
                    self.out.push_str(title);
                    let underline = match level {
                        HeadingLevel::H1 => Some('='),
                        HeadingLevel::H2 => Some('-'),
                        _ => None,
                    };
                    if let Some(ch) = underline {
                        self.out.push('\n');
                        self.out
                            .extend(std::iter::repeat_n(ch, title.chars().count()));
                    }
                    self.out.push('\n');
                }
            }
            TagEnd::Paragraph => self.newline(),
            TagEnd::CodeBlock => self.in_code_block = false,
            TagEnd::List(_) => {
                self.lists.pop();
                self.newline();
            }
            TagEnd::Link => {
                if let Some(url) = self.links.pop() {
                    self.push(&format!(" ({url})"));
                }
            }
            TagEnd::TableHead | TagEnd::TableRow => {
                self.cell = 0;
                self.out.push('\n');
            }
            _ => {}
        }
    }
}

/// Render lesson markdown for a plain terminal.
///
/// Headings are underlined, lists keep their markers, code blocks are
/// indented and links print their target after the text. Raw HTML is dropped.
#[must_use]
pub fn to_terminal(markdown: &str) -> String {
    let mut writer = Writer::default();
    for event in Parser::new_ext(markdown, options()) {
        writer.event(event);
    }
    writer.out.trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_are_underlined() {
        assert_eq!(
            to_terminal("# Web3\n\n## Ownership\n\nYou own it."),
            "Web3\n====\n\nOwnership\n---------\n\nYou own it."
        );
    }

    #[test]
    fn lists_and_inline_code() {
        let text = to_terminal("Steps:\n\n1. Install `clarinet`\n2. Run it\n\n- nested\n  - deeper\n");
        assert!(text.contains("1. Install `clarinet`\n2. Run it"), "{text}");
        assert!(text.contains("- nested\n  - deeper"), "{text}");
    }

    #[test]
    fn code_blocks_are_indented() {
        let text = to_terminal("```clarity\n(define-public (hello) (ok true))\n```");
        assert_eq!(text, "    (define-public (hello) (ok true))");
    }

    #[test]
    fn links_show_their_target_and_html_is_dropped() {
        let text = to_terminal("See [Stacks](https://stacks.co) <b>now</b>.");
        assert_eq!(text, "See Stacks (https://stacks.co) now.");
    }
}
