use once_cell::sync::Lazy;
use regex::Regex;

/// Comma surrounded by optional whitespace; shared by headers and data rows.
static FIELD_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*").unwrap());

/// `name : value` with arbitrary whitespace around the first colon. The name
/// group is lazy so the split happens at the first colon, leaving any later
/// colons inside the value.
static STICKY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?)\s*:\s*(.*)$").unwrap());

/// What the body of a comment line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentLine {
    /// A `name : value` assignment that persists across subsequent data rows.
    Sticky { name: String, value: String },
    /// An ordered list of column names for the data rows that follow.
    Header(Vec<String>),
}

/// Classify the body of a comment line (marker and surrounding whitespace
/// already stripped). The sticky pattern is tried first; anything it does not
/// match, including a colon with an empty name, falls back to a plain header.
///
/// `#: name:value` is an accepted sticky spelling, so a leading colon left
/// over from the marker is dropped before matching.
pub fn classify_comment(body: &str) -> CommentLine {
    let body = match body.strip_prefix(':') {
        Some(rest) => rest.trim_start(),
        None => body,
    };
    if let Some(caps) = STICKY.captures(body) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        if !name.is_empty() {
            return CommentLine::Sticky {
                name: name.to_string(),
                value: caps.get(2).map_or("", |m| m.as_str()).to_string(),
            };
        }
    }
    CommentLine::Header(split_fields(body))
}

/// Split a header body or data row on commas, trimming the whitespace that
/// benchmark wrappers tend to leave around separators.
pub fn split_fields(line: &str) -> Vec<String> {
    FIELD_SPLIT.split(line).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sticky_with_whitespace_around_colon() {
        assert_eq!(
            classify_comment("benchmark  :  blstm"),
            CommentLine::Sticky {
                name: "benchmark".into(),
                value: "blstm".into(),
            }
        );
    }

    #[test]
    fn sticky_splits_at_first_colon() {
        assert_eq!(
            classify_comment("started: 2017-05-12 14:03:22"),
            CommentLine::Sticky {
                name: "started".into(),
                value: "2017-05-12 14:03:22".into(),
            }
        );
    }

    #[test]
    fn sticky_with_empty_value() {
        assert_eq!(
            classify_comment("note:"),
            CommentLine::Sticky {
                name: "note".into(),
                value: String::new(),
            }
        );
    }

    #[test]
    fn marker_colon_is_dropped() {
        // `#: a:1` arrives here as `: a:1`.
        assert_eq!(
            classify_comment(": a:1"),
            CommentLine::Sticky {
                name: "a".into(),
                value: "1".into(),
            }
        );
    }

    #[test]
    fn empty_name_falls_back_to_header() {
        // A colon with nothing usable before it is not an assignment.
        assert_eq!(
            classify_comment(": orphan"),
            CommentLine::Header(vec!["orphan".into()])
        );
    }

    #[test]
    fn plain_header_splits_on_comma() {
        assert_eq!(
            classify_comment("time, energy,power"),
            CommentLine::Header(vec!["time".into(), "energy".into(), "power".into()])
        );
    }

    #[test]
    fn split_fields_keeps_empty_cells() {
        assert_eq!(split_fields("1, , 3"), vec!["1", "", "3"]);
    }
}
