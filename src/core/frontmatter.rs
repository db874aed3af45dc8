use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FRONTMATTER_RE: Regex = Regex::new(r"(?s)^---\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|$)").unwrap();
    static ref TITLE_RE: Regex = Regex::new(r"(?m)^title:[ \t]*(.*?)[ \t]*\r?$").unwrap();
    static ref FAVORITE_RE: Regex = Regex::new(r"(?m)^(?:favorite|isFavorite):[ \t]*(\w+)").unwrap();
}

/// The handful of frontmatter keys a note import cares about
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub favorite: bool,
}

impl Frontmatter {
    /// Separate a leading `---` block from the rest of the document.
    /// Without one, the whole content is the body.
    pub fn split(content: &str) -> (Option<Self>, &str) {
        let Some(caps) = FRONTMATTER_RE.captures(content) else {
            return (None, content);
        };
        let Some(whole) = caps.get(0) else {
            return (None, content);
        };
        // An empty block has no inner group
        let raw = caps.get(1).map_or("", |m| m.as_str());

        let title = TITLE_RE
            .captures(raw)
            .map(|c| c[1].trim_matches('"').trim_matches('\'').to_string())
            .filter(|t| !t.is_empty());
        let favorite = FAVORITE_RE
            .captures(raw)
            .map(|c| matches!(c[1].to_lowercase().as_str(), "true" | "yes"))
            .unwrap_or(false);

        (
            Some(Self { title, favorite }),
            &content[whole.end()..],
        )
    }
}
