pub mod footnotes;
pub mod html;
pub mod info;
pub mod plain;

pub use footnotes::ChapterNotes;
pub use html::render_verse_html;
pub use info::InfoPage;
pub use plain::verse_plain_text;

use serde::{Deserialize, Serialize};

use crate::{
    models::{Chapter, Footnote},
    registry::TagRegistry,
};

/// What happens to remaining `word_word(_word)*` runs in verse text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnderscorePolicy {
    /// Leave the run untouched.
    #[default]
    Keep,
    /// Replace underscores with spaces.
    Remove,
    /// Replace underscores with spaces and wrap the phrase in an emphasis
    /// marker.
    Bold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Prefix each verse badge with the raw source line number.
    #[serde(default)]
    pub show_line_numbers: bool,
    /// When off, footnote and cross-reference markers are deleted with no
    /// trace instead of rendered as clickable references.
    #[serde(default = "default_true")]
    pub show_footnotes: bool,
    #[serde(default)]
    pub underscore_policy: UnderscorePolicy,
}

fn default_true() -> bool {
    true
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            show_footnotes: true,
            underscore_policy: UnderscorePolicy::Keep,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedVerse {
    pub verse_number: u32,
    pub line_number: u32,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub title: String,
    pub verses: Vec<RenderedVerse>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedBody {
    Verses {
        sections: Vec<RenderedSection>,
        footnotes: Vec<Footnote>,
    },
    Info(InfoPage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChapter {
    pub number: u32,
    pub name: String,
    pub book: String,
    pub body: RenderedBody,
}

/// Renders one chapter to markup plus its chapter-scoped footnote list.
///
/// Information pages bypass the verse renderer entirely. Rendering never
/// fails; malformed markers degrade inside [`render_verse_html`].
pub fn render_chapter(
    chapter: &Chapter,
    registry: &TagRegistry,
    options: &RenderOptions,
) -> RenderedChapter {
    if chapter.is_information_page() {
        return RenderedChapter {
            number: chapter.number,
            name: chapter.name.clone(),
            book: chapter.book.clone(),
            body: RenderedBody::Info(info::parse_info_page(chapter)),
        };
    }

    let notes = footnotes::collect(chapter, registry);
    let sections = chapter
        .sections
        .iter()
        .map(|section| RenderedSection {
            title: section.title.clone(),
            verses: section
                .verses
                .iter()
                .map(|verse| RenderedVerse {
                    verse_number: verse.verse_number,
                    line_number: verse.line_number,
                    html: html::render_verse_html(verse, chapter.number, registry, options, &notes),
                })
                .collect(),
        })
        .collect();

    RenderedChapter {
        number: chapter.number,
        name: chapter.name.clone(),
        book: chapter.book.clone(),
        body: RenderedBody::Verses {
            sections,
            footnotes: notes.footnotes,
        },
    }
}

impl RenderedChapter {
    /// A full standalone markup fragment for the chapter, footnote list
    /// included.
    pub fn to_html(&self) -> String {
        let mut out = format!("<h1>{}</h1>", html_escape::encode_text(&self.name));
        match &self.body {
            RenderedBody::Info(page) => out.push_str(&page.to_html()),
            RenderedBody::Verses {
                sections,
                footnotes,
            } => {
                for section in sections {
                    if !section.title.is_empty() {
                        out.push_str(&format!(
                            "<h2>{}</h2>",
                            html_escape::encode_text(&section.title)
                        ));
                    }
                    for verse in &section.verses {
                        out.push_str(&format!("<p class=\"verse\">{}</p>", verse.html));
                    }
                }
                if !footnotes.is_empty() {
                    out.push_str(&format!(
                        "<h3>Footnotes for {} {}</h3><ol class=\"footnotes\">",
                        html_escape::encode_text(&self.book),
                        self.number
                    ));
                    for footnote in footnotes {
                        out.push_str(&format!(
                            "<li id=\"fn-{}\" value=\"{}\">{}</li>",
                            footnote.id,
                            footnote.ordinal,
                            html_escape::encode_text(&footnote.content)
                        ));
                    }
                    out.push_str("</ol>");
                }
            }
        }
        out
    }
}
