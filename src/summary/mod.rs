//! Reformatting of the Chinese summaries returned by the extraction
//! service.
//!
//! Summaries arrive as loosely structured text with up to three
//! labeled sections (标题 / 摘要 / 关键点), sometimes wrapped in
//! ```` ```text ```` code fences. [`SummaryDoc::parse`] splits the
//! sections into a structure the display layer can style;
//! [`strip_formatting`] removes only the fences and is the byte-exact
//! source for clipboard copies.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCE_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```text ?").unwrap());
static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"标题:\s*([^\n]+)").unwrap());
static POINT_SEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\s*").unwrap());
static EMOJI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\p{Emoji_Presentation})\s*").unwrap());

const SUMMARY_LABEL: &str = "摘要:";
const POINTS_LABEL: &str = "关键点:";

/// Remove code-fence delimiters, leaving everything else untouched.
///
/// Idempotent; applying it twice yields the same string.
pub fn strip_formatting(raw: &str) -> String {
    FENCE_OPEN_RE.replace_all(raw, "").replace("```", "")
}

/// One entry of the 关键点 list, with any leading emoji pulled into
/// its own slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPoint {
    pub emoji: Option<String>,
    pub text: String,
}

impl KeyPoint {
    fn from_text(body: &str) -> Self {
        if let Some(caps) = EMOJI_RE.captures(body) {
            let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
            Self {
                emoji: Some(caps[1].to_string()),
                text: body[end..].trim().to_string(),
            }
        } else {
            Self {
                emoji: None,
                text: body.trim().to_string(),
            }
        }
    }
}

/// A parsed summary. Sections are matched positionally and
/// independently; whatever is missing is simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryDoc {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub key_points: Vec<KeyPoint>,
}

impl SummaryDoc {
    /// Parse a raw summary. Total: input with none of the recognized
    /// labels is passed through as the summary body.
    pub fn parse(raw: &str) -> Self {
        let text = strip_formatting(raw);

        let title = TITLE_RE
            .captures(&text)
            .map(|caps| caps[1].trim().to_string())
            .filter(|t| !t.is_empty());

        let points_at = text.find(POINTS_LABEL);

        let summary = text
            .find(SUMMARY_LABEL)
            .map(|at| {
                let start = at + SUMMARY_LABEL.len();
                let end = points_at.filter(|&p| p >= start).unwrap_or(text.len());
                text[start..end].trim().to_string()
            })
            .filter(|s| !s.is_empty());

        let key_points = points_at
            .map(|at| split_points(&text[at + POINTS_LABEL.len()..]))
            .unwrap_or_default();

        if title.is_none() && summary.is_none() && key_points.is_empty() {
            let body = text.trim();
            return Self {
                title: None,
                summary: (!body.is_empty()).then(|| body.to_string()),
                key_points: Vec::new(),
            };
        }

        Self {
            title,
            summary,
            key_points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.summary.is_none() && self.key_points.is_empty()
    }

    /// Plain-text rendering for non-styled output.
    pub fn render_text(&self) -> String {
        let mut sections: Vec<String> = Vec::new();
        if let Some(title) = &self.title {
            sections.push(title.clone());
        }
        if let Some(summary) = &self.summary {
            sections.push(summary.clone());
        }
        if !self.key_points.is_empty() {
            let items = self
                .key_points
                .iter()
                .enumerate()
                .map(|(i, point)| match &point.emoji {
                    Some(emoji) => format!("{}. {} {}", i + 1, emoji, point.text),
                    None => format!("{}. {}", i + 1, point.text),
                })
                .collect::<Vec<_>>()
                .join("\n");
            sections.push(items);
        }
        sections.join("\n\n")
    }
}

fn split_points(section: &str) -> Vec<KeyPoint> {
    let marks: Vec<_> = POINT_SEP_RE.find_iter(section).collect();
    let mut points = Vec::new();
    for (i, mark) in marks.iter().enumerate() {
        let end = marks.get(i + 1).map(|next| next.start()).unwrap_or(section.len());
        let body = section[mark.end()..end].trim();
        if body.is_empty() {
            continue;
        }
        points.push(KeyPoint::from_text(body));
    }
    points
}
