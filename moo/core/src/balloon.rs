//! Message Wrapping and Balloon Drawing
//!
//! [`split`] normalizes a free-form message into display lines, and
//! [`render_balloon`] frames those lines in a speech or thought balloon.
//!
//! Lengths are counted in Unicode scalar values, and "whitespace" is the
//! ECMAScript `\s` set plus NEL (U+0085), so that output matches the web
//! version of the tool character for character.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

/// Hard line breaks: CRLF, LF, CR, VT, FF, NEL, LS, PS
const BREAK: &str = r"\r\n|[\n\r\x0B\x0C\u{85}\u{2028}\u{2029}]";

/// Whitespace characters as a character-class body (ECMAScript `\s` plus NEL)
pub(crate) const SPACE_CLASS: &str =
    r"\t\n\x0B\x0C\r \u{85}\u{A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}";

/// Replacement expanding one tab
const TAB: &str = "        ";

/// Lines produced for a wrap column too small to hold any text
const DEGENERATE: &str = "0";

static BREAK_RE: LazyLock<Regex> = LazyLock::new(|| compile(BREAK));

// A break followed by visible text is a soft join
static SOFT_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("(?:{BREAK})([^{SPACE_CLASS}])")));

// A break followed by whitespace (more breaks included) starts a paragraph
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("(?:{BREAK})[{SPACE_CLASS}]+")));

static TRAILING_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| compile(&format!("(?:{BREAK})$")));

static SPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| compile(&format!("[{SPACE_CLASS}]+")));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("invalid balloon regex")
}

/// Whether `c` belongs to [`SPACE_CLASS`]
pub(crate) fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{85}'
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// What the cow does with the message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Speech balloon, `\` connector
    #[default]
    Say,
    /// Thought balloon, `o` connector
    Think,
}

impl Action {
    /// Connector glyph drawn between the balloon and the character
    #[must_use]
    pub fn thoughts(&self) -> &'static str {
        match self {
            Self::Say => "\\",
            Self::Think => "o",
        }
    }

    /// Borders of a single-line balloon
    fn single(self) -> (&'static str, &'static str) {
        match self {
            Self::Say => ("< ", " >"),
            Self::Think => ("( ", " )"),
        }
    }

    /// Action name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Say => "say",
            Self::Think => "think",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Multi-line borders are shared by both actions
const FIRST: (&str, &str) = ("/ ", " \\");
const MIDDLE: (&str, &str) = ("| ", " |");
const LAST: (&str, &str) = ("\\ ", " /");

/// Wrap column for [`split`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wrap {
    /// Word-wrap so lines fit in `column - 1` characters
    Column(usize),
    /// Keep the message's own line breaks only
    Disabled,
}

impl Wrap {
    /// Whether wrapping is active
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Column(_))
    }
}

impl Serialize for Wrap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Column(column) => serializer.serialize_u64(*column as u64),
            Self::Disabled => serializer.serialize_bool(false),
        }
    }
}

/// Split a message into display lines
///
/// # Normalization
///
/// 1. A leading byte-order mark is dropped and tabs become 8 spaces.
/// 2. A hard break followed by visible text becomes a single space; a hard
///    break followed by whitespace becomes exactly one blank line.
/// 3. A hard break at the very end becomes a single space.
///
/// With [`Wrap::Disabled`] the normalized lines are returned as they are.
/// Otherwise whitespace runs are collapsed, surplus blank lines dropped and
/// every line greedily word-wrapped to `column - 1` characters.
///
/// A column below 2 yields the single placeholder line `"0"`.
#[must_use]
pub fn split(message: &str, wrap: Wrap) -> Vec<String> {
    if let Wrap::Column(column) = wrap {
        if column < 2 {
            return vec![DEGENERATE.to_string()];
        }
    }

    let text = message.strip_prefix('\u{FEFF}').unwrap_or(message);
    let text = text.replace('\t', TAB);
    let text = SOFT_BREAK_RE.replace_all(&text, " ${1}");
    let text = PARAGRAPH_RE.replace_all(&text, "\n\n");
    let text = TRAILING_BREAK_RE.replace_all(&text, " ");

    let lines = BREAK_RE.split(&text).map(str::to_string);

    match wrap {
        Wrap::Disabled => lines.collect(),
        Wrap::Column(column) => wrap_lines(lines, column),
    }
}

fn wrap_lines(lines: impl Iterator<Item = String>, column: usize) -> Vec<String> {
    let collapsed: Vec<String> = lines
        .enumerate()
        .map(|(i, line)| {
            if line.chars().all(is_space) {
                String::new()
            } else if i > 0 {
                SPACE_RUN_RE
                    .replace_all(&line, " ")
                    .trim_start_matches(is_space)
                    .to_string()
            } else {
                SPACE_RUN_RE.replace_all(&line, " ").into_owned()
            }
        })
        .collect();

    // Keep at most one blank line in a row (the first two lines always stay)
    let mut lines: Vec<String> = collapsed
        .iter()
        .enumerate()
        .filter(|(i, line)| !line.is_empty() || *i <= 1 || !collapsed[i - 1].is_empty())
        .map(|(_, line)| line.clone())
        .collect();

    if lines.iter().all(String::is_empty) {
        return vec![String::new()];
    }

    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }

    let mut wrapped = Vec::with_capacity(lines.len());
    for line in &lines {
        if line.is_empty() {
            wrapped.push(String::new());
        } else {
            wrap_line(line, column, &mut wrapped);
        }
    }
    wrapped
}

/// Greedy word-wrap of one logical line into `out`
fn wrap_line(line: &str, column: usize, out: &mut Vec<String>) {
    let col = column - 1;
    let chars: Vec<char> = line.chars().collect();

    // The first chunk may keep a trailing space when the line is exactly `column` long
    let space = space_before(&chars, column, col);
    let exact_with_space = chars.len() == column && chars.last() == Some(&' ');
    let br = match space {
        Some(space) if space > 0 && space < col => space,
        _ if exact_with_space => column,
        _ => col,
    };
    let br = br.min(chars.len());

    out.push(chars[..br].iter().collect());
    let mut rest = trim_start(&chars[br..]);

    while !rest.is_empty() {
        let br = match space_before(rest, column, col) {
            Some(space) if space > 0 && space < col => space,
            _ => col,
        };
        let br = br.min(rest.len());

        out.push(rest[..br].iter().collect());
        rest = trim_start(&rest[br..]);
    }
}

/// Break candidate: the whole text when it is shorter than `column`,
/// otherwise the last space at or before index `col`
fn space_before(chars: &[char], column: usize, col: usize) -> Option<usize> {
    if chars.len() < column {
        return Some(chars.len());
    }
    chars[..=col.min(chars.len() - 1)]
        .iter()
        .rposition(|&c| c == ' ')
}

fn trim_start(chars: &[char]) -> &[char] {
    let start = chars.iter().position(|&c| !is_space(c)).unwrap_or(chars.len());
    &chars[start..]
}

/// Draw the balloon around already split lines
///
/// The top and bottom rules are one space followed by `_` and `-` runs.
/// They span `width + 3` columns, where `width` is the longest line (at least 1).
/// A lone empty line gets a shorter rule: 2 columns when wrapping, 3 when not.
#[must_use]
pub fn render_balloon(action: Action, lines: &[String], wrap: Wrap) -> String {
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .fold(1, usize::max);

    let span = match lines {
        [only] if only.is_empty() => {
            if wrap.is_enabled() {
                2
            } else {
                3
            }
        }
        _ => width + 3,
    };

    let mut balloon = Vec::with_capacity(lines.len() + 2);
    balloon.push(rule('_', span));

    match lines {
        [only] => balloon.push(row(action.single(), only, width)),
        _ => {
            let last = lines.len().saturating_sub(1);
            for (i, line) in lines.iter().enumerate() {
                let borders = match i {
                    0 => FIRST,
                    i if i == last => LAST,
                    _ => MIDDLE,
                };
                balloon.push(row(borders, line, width));
            }
        }
    }

    balloon.push(rule('-', span));
    balloon.join("\n")
}

/// Split `message` and draw its balloon
#[must_use]
pub fn balloon(action: Action, message: &str, wrap: Wrap) -> String {
    render_balloon(action, &split(message, wrap), wrap)
}

fn rule(fill: char, span: usize) -> String {
    let mut rule = String::with_capacity(span);
    rule.push(' ');
    rule.extend(std::iter::repeat(fill).take(span.saturating_sub(1)));
    rule
}

fn row((left, right): (&str, &str), line: &str, width: usize) -> String {
    let pad = width.saturating_sub(line.chars().count());
    format!("{left}{line}{}{right}", " ".repeat(pad))
}
