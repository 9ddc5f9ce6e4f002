//! Information-page rendering.
//!
//! Some source files append non-scripture metadata as trailing "chapters".
//! Those bypass the verse renderer: their lines are scanned for `field=value`
//! metadata and laid out as a fixed informational page.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Chapter;

static FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(description|short[ _]?title|version[ _]?date|creator|about)\s*=\s*(.*\S)\s*$")
        .expect("info field pattern")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoPage {
    pub short_title: Option<String>,
    pub description: Option<String>,
    pub version_date: Option<String>,
    pub creator: Option<String>,
    pub about: Option<String>,
}

pub fn parse_info_page(chapter: &Chapter) -> InfoPage {
    let mut page = InfoPage::default();
    for verse in chapter.verses() {
        let Some(captures) = FIELD_LINE.captures(&verse.raw_text) else {
            continue;
        };
        let key = captures[1].to_lowercase().replace([' ', '_'], "");
        let value = captures[2].to_string();
        match key.as_str() {
            "description" => page.description = Some(value),
            "shorttitle" => page.short_title = Some(value),
            "versiondate" => page.version_date = Some(value),
            "creator" => page.creator = Some(value),
            "about" => page.about = Some(value),
            _ => {}
        }
    }
    page
}

impl InfoPage {
    pub fn to_html(&self) -> String {
        let mut out = String::from("<div class=\"info-page\">");
        if let Some(title) = &self.short_title {
            out.push_str(&format!(
                "<h2>{}</h2>",
                html_escape::encode_text(title)
            ));
        }
        if let Some(description) = &self.description {
            out.push_str(&format!(
                "<p class=\"description\">{}</p>",
                html_escape::encode_text(description)
            ));
        }
        if let Some(about) = &self.about {
            out.push_str(&format!(
                "<p class=\"about\">{}</p>",
                html_escape::encode_text(about)
            ));
        }
        let mut meta = Vec::new();
        if let Some(creator) = &self.creator {
            meta.push(format!(
                "<span class=\"creator\">{}</span>",
                html_escape::encode_text(creator)
            ));
        }
        if let Some(date) = &self.version_date {
            meta.push(format!(
                "<span class=\"version-date\">{}</span>",
                html_escape::encode_text(date)
            ));
        }
        if !meta.is_empty() {
            out.push_str(&format!("<p class=\"meta\">{}</p>", meta.join(" ")));
        }
        out.push_str("</div>");
        out
    }
}
