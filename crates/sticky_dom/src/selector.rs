//! Compound selectors: `tag`, `.class`, `#id` and combinations like `section.card#intro`.
//!
//! Combinators, attribute selectors and pseudo-classes are not supported;
//! [`Selector::parse`] returns `None` for them.

use core::iter;

use smallvec::SmallVec;

use crate::document::ElementData;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    /// Lowercased tag name; `None` or `*` matches any tag.
    tag: Option<String>,
    id: Option<String>,
    /// Lowercased class names, all of which must be present.
    classes: SmallVec<String, 2>,
}

#[derive(Copy, Clone)]
enum Part {
    Tag,
    Class,
    Id,
}

impl Selector {
    pub fn parse(source: &str) -> Option<Self> {
        let source = source.trim();
        if source.is_empty()
            || source
                .chars()
                .any(|ch| ch.is_whitespace() || matches!(ch, '>' | '+' | '~' | '[' | ':' | ','))
        {
            return None;
        }
        let mut selector = Self::default();
        let mut part = Part::Tag;
        let mut buffer = String::new();
        for ch in source.chars().chain(iter::once('.')) {
            if ch != '.' && ch != '#' {
                buffer.push(ch);
                continue;
            }
            match part {
                Part::Tag => {
                    if !buffer.is_empty() && buffer != "*" {
                        selector.tag = Some(buffer.to_ascii_lowercase());
                    }
                }
                Part::Class => {
                    if buffer.is_empty() {
                        return None;
                    }
                    selector.classes.push(buffer.to_ascii_lowercase());
                }
                Part::Id => {
                    if buffer.is_empty() || selector.id.is_some() {
                        return None;
                    }
                    selector.id = Some(buffer.clone());
                }
            }
            buffer.clear();
            part = if ch == '#' { Part::Id } else { Part::Class };
        }
        Some(selector)
    }

    pub(crate) fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = &self.tag
            && !element.tag().eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && element.id() != Some(id.as_str())
        {
            return false;
        }
        self.classes.iter().all(|class| element.has_class(class))
    }
}
