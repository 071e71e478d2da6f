//! `.env` files.
//!
//! The converter loads its API key with python-dotenv, so the verifier
//! reads the same file the same way to see what the application will see.
//! Only assignments are understood; variable expansion is not.

use std::path::Path;

use crate::error::Result;

/// Assignments read from a `.env` file, in file order.
///
/// A key assigned more than once keeps its last value.
///
/// # Example
///
/// ```
/// use scanready::config::DotEnv;
///
/// let env = DotEnv::parse(r#"
/// # Cloud vision
/// OPENAI_API_KEY=sk-test   # rotated monthly
/// export OPENAI_ORG="acme # corp"
/// EMPTY=
/// "#);
///
/// assert_eq!(env.get("OPENAI_API_KEY"), Some("sk-test"));
/// assert_eq!(env.get("OPENAI_ORG"), Some("acme # corp"));
/// assert!(!env.has_value("EMPTY"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotEnv {
    entries: Vec<(String, String)>,
}

impl DotEnv {
    /// Parse file contents. Lines that are not assignments are ignored.
    pub fn parse(content: &str) -> Self {
        let mut env = Self::default();
        for (key, value) in content.lines().filter_map(parse_assignment) {
            env.entries.retain(|(k, _)| *k != key);
            env.entries.push((key, value));
        }
        env
    }

    /// Read `path`, or `None` when there is no such file.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(Self::parse(&content))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `key` is assigned something other than whitespace.
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.trim().is_empty())
    }
}

fn parse_assignment(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, raw) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key.to_string(), parse_value(raw.trim())))
}

fn parse_value(raw: &str) -> String {
    if let Some(rest) = raw.strip_prefix('"') {
        if let Some(end) = closing_quote(rest, '"') {
            return unescape(&rest[..end], "\\'\"abfnrtv");
        }
    } else if let Some(rest) = raw.strip_prefix('\'') {
        if let Some(end) = closing_quote(rest, '\'') {
            return unescape(&rest[..end], "\\'");
        }
    }

    // Unquoted: a ` #` starts a trailing comment.
    match raw.find(" #") {
        Some(pos) => raw[..pos].trim_end().to_string(),
        None => raw.to_string(),
    }
}

/// Resolve backslash escapes of the characters in `known`; any other
/// backslash is kept as written.
fn unescape(s: &str, known: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if known.contains(next) => out.push(match next {
                'a' => '\u{07}',
                'b' => '\u{08}',
                'f' => '\u{0c}',
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                'v' => '\u{0b}',
                other => other,
            }),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Byte offset of the first unescaped `quote` in `s`.
fn closing_quote(s: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            c if c == quote && !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assignments_and_skips_noise() {
        let env = DotEnv::parse(
            r#"
# converter settings
OPENAI_API_KEY=sk-abc

not an assignment
=orphan
STREAMLIT_PORT = 8501
"#,
        );

        assert_eq!(env.get("OPENAI_API_KEY"), Some("sk-abc"));
        assert_eq!(env.get("STREAMLIT_PORT"), Some("8501"));
        assert_eq!(env.get("not an assignment"), None);
        assert_eq!(env.get(""), None);
    }

    #[test]
    fn handles_quoting() {
        let env = DotEnv::parse(
            "DOUBLE=\"two words\"\nSINGLE='it''s'\nESCAPED=\"say \\\"hi\\\"\"\nRAW='a\\nb'",
        );

        assert_eq!(env.get("DOUBLE"), Some("two words"));
        assert_eq!(env.get("SINGLE"), Some("it"));
        assert_eq!(env.get("ESCAPED"), Some("say \"hi\""));
        assert_eq!(env.get("RAW"), Some("a\\nb"));
    }

    #[test]
    fn double_quotes_resolve_python_escapes() {
        let env = DotEnv::parse(
            r#"PATHLIKE="C:\\ocr\\bin"
TABBED="a\tb"
APOS="it\'s"
UNKNOWN="keep \d"
SINGLE='it\'s \\ \n'"#,
        );

        assert_eq!(env.get("PATHLIKE"), Some(r"C:\ocr\bin"));
        assert_eq!(env.get("TABBED"), Some("a\tb"));
        assert_eq!(env.get("APOS"), Some("it's"));
        assert_eq!(env.get("UNKNOWN"), Some(r"keep \d"));
        assert_eq!(env.get("SINGLE"), Some(r"it's \ \n"));
    }

    #[test]
    fn strips_trailing_comments_from_unquoted_values() {
        let env = DotEnv::parse("KEY=value # note\nURL=https://example.com/#anchor");

        assert_eq!(env.get("KEY"), Some("value"));
        assert_eq!(env.get("URL"), Some("https://example.com/#anchor"));
    }

    #[test]
    fn last_assignment_wins() {
        let env = DotEnv::parse("OPENAI_API_KEY=old\nOTHER=x\nOPENAI_API_KEY=new");

        assert_eq!(env.get("OPENAI_API_KEY"), Some("new"));
        assert_eq!(env.entries.len(), 2);
    }

    #[test]
    fn blank_values_have_no_value() {
        let env = DotEnv::parse("EMPTY=\nSPACES=\"  \"\nSET=1");

        assert!(!env.has_value("EMPTY"));
        assert!(!env.has_value("SPACES"));
        assert!(!env.has_value("UNSET"));
        assert!(env.has_value("SET"));
    }

    #[test]
    fn strips_export_prefix() {
        let env = DotEnv::parse("export OPENAI_API_KEY=sk-abc");
        assert_eq!(env.get("OPENAI_API_KEY"), Some("sk-abc"));
    }

    #[test]
    fn load_missing_file_is_none() {
        let temp = tempfile::TempDir::new().unwrap();
        assert_eq!(DotEnv::load(&temp.path().join(".env")).unwrap(), None);
    }

    #[test]
    fn load_reads_file_from_disk() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, "# converter settings\nOPENAI_API_KEY='sk-from-file'\n").unwrap();

        let env = DotEnv::load(&path).unwrap().unwrap();

        assert_eq!(env.get("OPENAI_API_KEY"), Some("sk-from-file"));
    }

    #[test]
    fn load_directory_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(DotEnv::load(temp.path()).is_err());
    }
}
