//! Verse-to-HTML emission over the scanned span list.
//!
//! Stage order is fixed: chapter divider, verse badge (with optional line
//! number), then a single positional walk that handles citations, footnote
//! and cross-reference markers, registry tags, the underscore-phrase policy
//! and emphasis shorthand. Unmatched or malformed markers degrade to being
//! stripped or kept as literal text; this function never fails.

use std::sync::LazyLock;

use regex::Regex;

use super::{RenderOptions, UnderscorePolicy, footnotes::ChapterNotes};
use crate::{
    markup::{Emphasis, MarkerKind, scan_markers},
    models::Verse,
    registry::{TagDefinition, TagRegistry},
};

static UNDERSCORE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9]+(?:_[A-Za-z0-9]+)+").expect("underscore phrase pattern")
});

/// What a pending open wrapper needs to be closed with.
#[derive(Debug, PartialEq, Eq)]
enum OpenWrapper {
    Citation,
    Emphasis(Emphasis),
    Tag(usize),
}

impl OpenWrapper {
    fn close_token(&self, registry: &TagRegistry) -> &'static str {
        match self {
            OpenWrapper::Citation => "</span>",
            OpenWrapper::Emphasis(Emphasis::Bold) => "</strong>",
            OpenWrapper::Emphasis(Emphasis::Italic) => "</em>",
            OpenWrapper::Emphasis(Emphasis::Underline) => "</u>",
            OpenWrapper::Tag(index) => registry
                .get(*index)
                .map_or("</span>", |def| tag_elements(def).1),
        }
    }
}

/// Renders one verse's raw text to markup.
///
/// Every rendered verse starts with a verse-number badge, synthesized from
/// the assigned number when no explicit marker is present.
pub fn render_verse_html(
    verse: &Verse,
    chapter_number: u32,
    registry: &TagRegistry,
    options: &RenderOptions,
    notes: &ChapterNotes,
) -> String {
    let spans = scan_markers(&verse.raw_text, registry);
    let mut out = String::new();

    // The chapter-boundary marker never starts mid-verse; at verse level it
    // becomes a layout divider, elsewhere it is stripped.
    if matches!(
        spans.first().map(|m| &m.kind),
        Some(MarkerKind::ChapterBreak)
    ) {
        out.push_str("<hr class=\"chapter-break\" />");
    }

    if options.show_line_numbers {
        out.push_str(&format!(
            "<span class=\"line-no\">{}</span> ",
            verse.line_number
        ));
    }

    let badge = spans
        .iter()
        .find_map(|m| match m.kind {
            MarkerKind::VerseNumber(n) => Some(n),
            _ => None,
        })
        .unwrap_or(verse.verse_number);
    out.push_str(&format!("<sup class=\"verse-num\">{badge}</sup> "));

    let mut open: Vec<OpenWrapper> = Vec::new();
    let mut note_occurrence = 0usize;
    let mut xref_occurrence = 0usize;

    for marker in &spans {
        match &marker.kind {
            MarkerKind::Text => {
                let text = &verse.raw_text[marker.span.start..marker.span.end];
                out.push_str(&apply_underscore_policy(text, options.underscore_policy));
            }
            // Consumed by the badge / divider above
            MarkerKind::VerseNumber(_) | MarkerKind::ChapterBreak => {}
            MarkerKind::FootnoteContent { .. } => {
                note_occurrence += 1;
                if options.show_footnotes {
                    let id = format!(
                        "c{chapter_number}l{}n{note_occurrence}",
                        verse.line_number
                    );
                    push_reference(&mut out, &id, notes.ordinal_of(&id));
                }
            }
            MarkerKind::CrossRef { complete, .. } => {
                xref_occurrence += 1;
                if options.show_footnotes {
                    let id = format!(
                        "c{chapter_number}l{}x{xref_occurrence}",
                        verse.line_number
                    );
                    // Incomplete matches keep the placeholder marker
                    let ordinal = if *complete { notes.ordinal_of(&id) } else { None };
                    push_reference(&mut out, &id, ordinal);
                }
            }
            MarkerKind::CitationOpen => {
                out.push_str("<br /><span class=\"citation-indent\">");
                open.push(OpenWrapper::Citation);
            }
            MarkerKind::CitationClose => {
                close_if_open(&mut out, &mut open, OpenWrapper::Citation, registry);
            }
            MarkerKind::EmphasisOpen(emphasis) => {
                out.push_str(match emphasis {
                    Emphasis::Bold => "<strong>",
                    Emphasis::Italic => "<em>",
                    Emphasis::Underline => "<u>",
                });
                open.push(OpenWrapper::Emphasis(*emphasis));
            }
            MarkerKind::EmphasisClose(emphasis) => {
                close_if_open(&mut out, &mut open, OpenWrapper::Emphasis(*emphasis), registry);
            }
            MarkerKind::TagOpen(index) => {
                let Some(def) = registry.get(*index) else {
                    continue;
                };
                if def.ignored {
                    continue;
                }
                // Symmetric delimiters toggle: a second occurrence closes
                if open.last() == Some(&OpenWrapper::Tag(*index)) {
                    close_if_open(&mut out, &mut open, OpenWrapper::Tag(*index), registry);
                    continue;
                }
                let (open_token, close_token) = tag_elements(def);
                if def.is_self_closing() {
                    out.push_str(&open_token);
                    out.push_str(close_token);
                } else {
                    out.push_str(&open_token);
                    open.push(OpenWrapper::Tag(*index));
                }
            }
            MarkerKind::TagClose(index) => {
                let ignored = registry.get(*index).is_none_or(|def| def.ignored);
                if !ignored {
                    close_if_open(&mut out, &mut open, OpenWrapper::Tag(*index), registry);
                }
            }
        }
    }

    // Close anything left dangling so the output is always well formed
    while let Some(wrapper) = open.pop() {
        out.push_str(wrapper.close_token(registry));
    }

    out
}

fn push_reference(out: &mut String, id: &str, ordinal: Option<u32>) {
    let label = ordinal.map_or_else(|| "*".to_string(), |n| n.to_string());
    out.push_str(&format!(
        "<sup class=\"footnote-ref\"><a href=\"#fn-{id}\">[{label}]</a></sup>"
    ));
}

/// Emits the close token when the marker actually has a matching open;
/// stray close markers are stripped.
fn close_if_open(
    out: &mut String,
    open: &mut Vec<OpenWrapper>,
    wrapper: OpenWrapper,
    registry: &TagRegistry,
) {
    if open.last() == Some(&wrapper) {
        out.push_str(wrapper.close_token(registry));
        open.pop();
    }
}

/// Open/close elements for a registry tag: its style class when set,
/// otherwise a semantic element chosen from the tag name, otherwise a
/// generic styled wrapper.
fn tag_elements(def: &TagDefinition) -> (String, &'static str) {
    if !def.style_class.is_empty() {
        let class = html_escape::encode_double_quoted_attribute(&def.style_class);
        return (format!("<span class=\"{class}\">"), "</span>");
    }
    let name = def.name.to_lowercase();
    if name.contains("bold") || name == "b" || name == "strong" {
        ("<strong>".to_string(), "</strong>")
    } else if name.contains("italic") || name == "i" || name == "em" {
        ("<em>".to_string(), "</em>")
    } else if name.contains("underline") || name == "u" {
        ("<u>".to_string(), "</u>")
    } else {
        let class = html_escape::encode_double_quoted_attribute(&def.name).into_owned();
        (format!("<span class=\"tag-{class}\">"), "</span>")
    }
}

/// Applies the configured policy to `word_word(_word)*` runs in plain text,
/// escaping everything for HTML on the way out.
pub(crate) fn apply_underscore_policy(text: &str, policy: UnderscorePolicy) -> String {
    if policy == UnderscorePolicy::Keep {
        return html_escape::encode_text(text).into_owned();
    }

    let mut out = String::new();
    let mut last = 0;
    for m in UNDERSCORE_RUN.find_iter(text) {
        out.push_str(&html_escape::encode_text(&text[last..m.start()]));
        let phrase = m.as_str().replace('_', " ");
        let escaped = html_escape::encode_text(&phrase).into_owned();
        match policy {
            UnderscorePolicy::Remove => out.push_str(&escaped),
            UnderscorePolicy::Bold => {
                out.push_str("<strong>");
                out.push_str(&escaped);
                out.push_str("</strong>");
            }
            UnderscorePolicy::Keep => unreachable!(),
        }
        last = m.end();
    }
    out.push_str(&html_escape::encode_text(&text[last..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::footnotes;
    use crate::models::{Chapter, LineRange, Section};
    use pretty_assertions::assert_eq;

    fn verse(number: u32, line: u32, text: &str) -> Verse {
        Verse {
            verse_number: number,
            line_number: line,
            raw_text: text.into(),
            footnotes: vec![],
            section_title: None,
        }
    }

    fn chapter_of(verses: Vec<Verse>) -> Chapter {
        let end = verses.len() as u32;
        Chapter {
            number: 1,
            name: "Genesis 1".into(),
            book: "Genesis".into(),
            sections: vec![Section {
                title: String::new(),
                range: LineRange::new(1, end),
                verses,
            }],
        }
    }

    fn render(text: &str, registry: &TagRegistry, options: &RenderOptions) -> String {
        let v = verse(1, 1, text);
        let chapter = chapter_of(vec![v.clone()]);
        let notes = footnotes::collect(&chapter, registry);
        render_verse_html(&v, 1, registry, options, &notes)
    }

    #[test]
    fn every_verse_starts_with_a_number_badge() {
        let html = render("plain text", &TagRegistry::empty(), &RenderOptions::default());
        assert!(html.starts_with("<sup class=\"verse-num\">1</sup> "));
        assert!(html.ends_with("plain text"));
    }

    #[test]
    fn explicit_marker_becomes_the_badge() {
        let html = render(
            "<V>23</V>marked",
            &TagRegistry::empty(),
            &RenderOptions::default(),
        );
        assert!(html.starts_with("<sup class=\"verse-num\">23</sup> "));
        assert!(!html.contains("<V>"));
    }

    #[test]
    fn line_number_prefix_is_optional() {
        let options = RenderOptions {
            show_line_numbers: true,
            ..RenderOptions::default()
        };
        let html = render("text", &TagRegistry::empty(), &options);
        assert!(html.starts_with("<span class=\"line-no\">1</span> "));
    }

    #[test]
    fn chapter_break_at_verse_start_becomes_a_divider() {
        let html = render("<CM>", &TagRegistry::empty(), &RenderOptions::default());
        assert!(html.starts_with("<hr class=\"chapter-break\" />"));
        assert!(!html.contains("<CM>"));
    }

    #[test]
    fn mid_verse_chapter_break_is_stripped() {
        let html = render("before<CM>after", &TagRegistry::empty(), &RenderOptions::default());
        assert!(!html.contains("<hr"));
        assert!(html.contains("beforeafter"));
    }

    #[test]
    fn footnote_marker_becomes_a_numbered_reference() {
        let html = render(
            "word<FN>the note</FN>",
            &TagRegistry::empty(),
            &RenderOptions::default(),
        );
        assert!(html.contains("<a href=\"#fn-c1l1n1\">[1]</a>"));
        assert!(!html.contains("the note"));
    }

    #[test]
    fn footnotes_disabled_removes_markers_without_trace() {
        let options = RenderOptions {
            show_footnotes: false,
            ..RenderOptions::default()
        };
        let html = render("word<FN>gone</FN>rest", &TagRegistry::empty(), &options);
        assert!(html.contains("wordrest"));
        assert!(!html.contains("gone"));
        assert!(!html.contains("footnote-ref"));
    }

    #[test]
    fn incomplete_cross_reference_renders_placeholder() {
        let html = render(
            "see<XR a>broken ref",
            &TagRegistry::empty(),
            &RenderOptions::default(),
        );
        assert!(html.contains("[*]"));
        assert!(!html.contains("broken ref"));
    }

    #[test]
    fn complete_cross_reference_gets_an_ordinal() {
        let html = render(
            "see<XR a>whole</XR>",
            &TagRegistry::empty(),
            &RenderOptions::default(),
        );
        assert!(html.contains("<a href=\"#fn-c1l1x1\">[1]</a>"));
    }

    #[test]
    fn citation_pair_becomes_indented_block() {
        let html = render(
            "intro<CL><PI>quoted words</PI></CL>end",
            &TagRegistry::empty(),
            &RenderOptions::default(),
        );
        assert!(html.contains("<br /><span class=\"citation-indent\">quoted words</span>end"));
    }

    #[test]
    fn unclosed_citation_is_closed_at_verse_end() {
        let html = render(
            "intro<CL><PI>quoted",
            &TagRegistry::empty(),
            &RenderOptions::default(),
        );
        assert!(html.ends_with("quoted</span>"));
    }

    #[test]
    fn shorthand_normalizes_to_semantic_elements() {
        let html = render(
            "<B>bold</B> <I>italic</I> <U>under</U>",
            &TagRegistry::empty(),
            &RenderOptions::default(),
        );
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
        assert!(html.contains("<u>under</u>"));
    }

    #[test]
    fn registry_tag_with_style_class_wraps_in_span() {
        let registry = TagRegistry::new(vec![TagDefinition {
            name: "divine".into(),
            open_delimiter: "<DN>".into(),
            close_delimiter: "</DN>".into(),
            style_class: "divine-name".into(),
            ignored: false,
        }]);
        let html = render("<DN>LORD</DN>", &registry, &RenderOptions::default());
        assert!(html.contains("<span class=\"divine-name\">LORD</span>"));
    }

    #[test]
    fn registry_tag_named_bold_falls_back_to_strong() {
        let registry = TagRegistry::new(vec![TagDefinition {
            name: "boldface".into(),
            open_delimiter: "{b}".into(),
            close_delimiter: "{/b}".into(),
            style_class: String::new(),
            ignored: false,
        }]);
        let html = render("{b}heavy{/b}", &registry, &RenderOptions::default());
        assert!(html.contains("<strong>heavy</strong>"));
    }

    #[test]
    fn ignored_registry_tag_is_stripped() {
        let registry = TagRegistry::new(vec![TagDefinition {
            name: "meta".into(),
            open_delimiter: "<META>".into(),
            close_delimiter: "</META>".into(),
            style_class: "meta".into(),
            ignored: true,
        }]);
        let html = render("a<META>b</META>c", &registry, &RenderOptions::default());
        assert!(html.contains("abc"));
        assert!(!html.contains("META"));
        assert!(!html.contains("span"));
    }

    #[test]
    fn self_closing_registry_tag_consumes_no_content() {
        let registry = TagRegistry::new(vec![TagDefinition {
            name: "selah".into(),
            open_delimiter: "<SELAH>".into(),
            close_delimiter: String::new(),
            style_class: "selah".into(),
            ignored: false,
        }]);
        let html = render("word <SELAH> after", &registry, &RenderOptions::default());
        assert!(html.contains("<span class=\"selah\"></span> after"));
    }

    #[test]
    fn underscore_policy_bold_wraps_and_despaces() {
        let html = apply_underscore_policy("their_gathering", UnderscorePolicy::Bold);
        assert_eq!(html, "<strong>their gathering</strong>");
    }

    #[test]
    fn underscore_policy_remove_replaces_with_spaces() {
        let html = apply_underscore_policy("a_b_c and plain", UnderscorePolicy::Remove);
        assert_eq!(html, "a b c and plain");
    }

    #[test]
    fn underscore_policy_keep_leaves_text_alone() {
        let html = apply_underscore_policy("a_b_c", UnderscorePolicy::Keep);
        assert_eq!(html, "a_b_c");
    }

    #[test]
    fn text_is_html_escaped() {
        let html = render("1 < 2 & 3", &TagRegistry::empty(), &RenderOptions::default());
        assert!(html.contains("1 &lt; 2 &amp; 3"));
    }

    #[test]
    fn stray_close_markers_are_stripped() {
        let html = render(
            "text</B> more</PI></CL>",
            &TagRegistry::empty(),
            &RenderOptions::default(),
        );
        assert!(html.contains("text more"));
        assert!(!html.contains("</strong>"));
    }
}
