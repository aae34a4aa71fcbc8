/// Opaque renderable payload of a slide.
///
/// Holds the markdown block for the slide; navigation never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideBody(String);

impl SlideBody {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    title: String,
    body: SlideBody,
}

impl Slide {
    #[must_use]
    pub fn new(title: impl Into<String>, body: SlideBody) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn body(&self) -> &SlideBody {
        &self.body
    }
}

/// The content slides of one lesson, derived once and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideDeck {
    slides: Vec<Slide>,
}

impl SlideDeck {
    #[must_use]
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { slides }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }
}
