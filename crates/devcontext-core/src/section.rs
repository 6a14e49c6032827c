//! Markdown section extraction
//!
//! Documents that aggregate several topics (one `## ` heading per topic) can be
//! narrowed down to the part about a single topic. Lines are first tokenized
//! into headings and text; fenced code blocks are tracked so a `## ` inside a
//! fence is treated as text.
//!
//! A section starts at the first line mentioning the topic and runs up to the
//! next level-2 heading that does not mention it. Topic keys written with
//! hyphens (`react-app`) also match headings written with spaces (`React App`).
//! The extracted text is always a slice of the input, line endings included.

/// One tokenized line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Heading { level: usize, text: &'a str, raw: &'a str },
    Text(&'a str),
}

impl<'a> Line<'a> {
    pub fn raw(&self) -> &'a str {
        match *self {
            Line::Heading { raw, .. } => raw,
            Line::Text(raw) => raw,
        }
    }

    fn is_level(&self, wanted: usize) -> bool {
        matches!(self, Line::Heading { level, .. } if *level == wanted)
    }
}

/// Result of an extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub text: String,
    /// False when the topic was not found and `text` is the whole document
    pub matched: bool,
}

/// Strip one trailing `\n` or `\r\n`.
fn strip_line_end(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => line,
    }
}

/// Byte offset where each line of `content` starts.
fn line_starts(content: &str) -> Vec<usize> {
    content
        .split_inclusive('\n')
        .scan(0, |pos, line| {
            let start = *pos;
            *pos += line.len();
            Some(start)
        })
        .collect()
}

/// Tokenize `content` into headings and text lines.
///
/// `raw` never includes the line terminator.
pub fn tokenize(content: &str) -> Vec<Line<'_>> {
    let mut fence: Option<&str> = None;

    content
        .split_inclusive('\n')
        .map(strip_line_end)
        .map(|raw| {
            let trimmed = raw.trim_start();
            if let Some(marker) = fence_marker(trimmed) {
                match fence {
                    Some(open) if marker == open => fence = None,
                    None => fence = Some(marker),
                    Some(_) => {}
                }
                return Line::Text(raw);
            }
            if fence.is_some() {
                return Line::Text(raw);
            }
            parse_heading(raw).unwrap_or(Line::Text(raw))
        })
        .collect()
}

fn fence_marker(line: &str) -> Option<&'static str> {
    if line.starts_with("```") {
        Some("```")
    } else if line.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

fn parse_heading(raw: &str) -> Option<Line<'_>> {
    let level = raw.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &raw[level..];
    if !rest.is_empty() && !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    Some(Line::Heading {
        level,
        text: rest.trim(),
        raw,
    })
}

/// Lowercased key plus its hyphen-to-space variant.
fn topic_variants(topic_key: &str) -> Vec<String> {
    let key = topic_key.trim().to_lowercase();
    let spaced = key.replace('-', " ");
    if spaced == key {
        vec![key]
    } else {
        vec![key, spaced]
    }
}

fn mentions(line: &str, variants: &[String]) -> bool {
    let lower = line.to_lowercase();
    variants.iter().any(|v| lower.contains(v.as_str()))
}

/// Extract the section about `topic_key`, or the whole document if there is none.
///
/// The section starts at the first line of any kind that mentions the topic,
/// so a passing mention in body text ahead of the topic's own heading wins.
pub fn extract(content: &str, topic_key: &str) -> Section {
    let unmatched = || Section {
        text: content.to_string(),
        matched: false,
    };

    if topic_key.trim().is_empty() {
        return unmatched();
    }

    let variants = topic_variants(topic_key);
    let lines = tokenize(content);

    let Some(start) = lines.iter().position(|line| mentions(line.raw(), &variants)) else {
        return unmatched();
    };

    let end = lines[start + 1..]
        .iter()
        .position(|line| line.is_level(2) && !mentions(line.raw(), &variants))
        .map(|offset| start + 1 + offset)
        .unwrap_or(lines.len());

    let starts = line_starts(content);
    let from = starts[start];
    let to = starts.get(end).copied().unwrap_or(content.len());

    Section {
        text: strip_line_end(&content[from..to]).to_string(),
        matched: true,
    }
}

/// Convenience wrapper returning only the text.
pub fn extract_section(content: &str, topic_key: &str) -> String {
    extract(content, topic_key).text
}
