use std::ops::Range;

use lesson_core::model::{Slide, SlideBody, SlideDeck};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Split lesson markdown into slides, one per level-2 heading.
///
/// Each slide runs from its heading to the next level-2 heading. Text before
/// the first one is not part of any slide, and headings inside code blocks
/// are ignored. A document without level-2 headings yields an empty deck.
#[must_use]
pub fn derive_slides(markdown: &str) -> SlideDeck {
    let mut headings: Vec<(String, Range<usize>)> = Vec::new();
    let mut open: Option<(String, Range<usize>)> = None;

    for (event, range) in Parser::new_ext(markdown, markdown_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H2,
                ..
            }) => open = Some((String::new(), range)),
            Event::Text(text) | Event::Code(text) => {
                if let Some((title, _)) = open.as_mut() {
                    title.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(HeadingLevel::H2)) => {
                if let Some((title, span)) = open.take() {
                    headings.push((title.trim().to_owned(), span));
                }
            }
            _ => {}
        }
    }

    let slides = headings
        .iter()
        .enumerate()
        .map(|(index, (title, span))| {
            let end = headings
                .get(index + 1)
                .map_or(markdown.len(), |(_, next)| next.start);
            let body = markdown.get(span.end..end).unwrap_or_default().trim();
            Slide::new(title.clone(), SlideBody::new(body))
        })
        .collect();
    SlideDeck::new(slides)
}
