//! Ignore-file patterns
//!
//! Each non-blank, non-comment line of an ignore file compiles to an
//! [`IgnorePattern`]: a glob translated into an anchored regex, plus the
//! negation (`!`) and directory-only (trailing `/`) flags. An [`IgnoreSet`]
//! evaluates its patterns in file order and the last matching pattern decides,
//! so a later `!pattern` re-includes what an earlier one excluded.
//!
//! Candidate paths are relative to the walk root and use `/` separators.
//! Patterns without an inner `/` match at any depth; patterns with a leading
//! or inner `/` are anchored to the root.

use anyhow::{Context, Result};
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::{Component, Path};

pub const GIT_IGNORE_FILE: &str = ".gitignore";

/// One compiled ignore rule
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    raw: String,
    regex: Regex,
    negated: bool,
    dir_only: bool,
}

impl IgnorePattern {
    /// Compile a single ignore-file line
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let raw = line.trim_end_matches(['\r', '\n']).trim_end();
        if raw.trim_start().is_empty() || raw.starts_with('#') {
            return Ok(None);
        }

        let mut body = raw;
        let mut negated = false;
        if let Some(rest) = body.strip_prefix('!') {
            negated = true;
            body = rest;
        } else if body.starts_with("\\!") || body.starts_with("\\#") {
            body = &body[1..];
        }

        let mut dir_only = false;
        if let Some(rest) = body.strip_suffix('/') {
            dir_only = true;
            body = rest;
        }

        let anchored = body.contains('/');
        let body = body.trim_start_matches('/');
        if body.is_empty() {
            return Ok(None);
        }

        let translated = glob_to_regex(body);
        let source = if anchored {
            format!("^{}$", translated)
        } else {
            format!("(?:^|/){}$", translated)
        };

        let regex = Regex::new(&source)
            .with_context(|| format!("Invalid ignore pattern: {}", raw))?;

        Ok(Some(Self {
            raw: raw.to_string(),
            regex,
            negated,
            dir_only,
        }))
    }

    /// Test a root-relative path against this pattern
    ///
    /// Negation is not applied here; see [`IgnoreSet::is_ignored`].
    pub fn matches(&self, path: &str, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        self.regex.is_match(path)
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }
}

impl fmt::Display for IgnorePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Translate glob syntax into (unanchored) regex syntax
fn glob_to_regex(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                let segment_start = i == 0 || chars[i - 1] == '/';
                let after = i + 2;
                if segment_start && chars.get(after) == Some(&'/') {
                    out.push_str("(?:.*/)?");
                    i = after + 1;
                } else if segment_start && after == chars.len() {
                    out.push_str(".*");
                    i = after;
                } else {
                    // `**` inside a segment is just a wildcard
                    out.push_str("[^/]*");
                    i = after;
                }
            }
            '*' => {
                out.push_str("[^/]*");
                i += 1;
            }
            '?' => {
                out.push_str("[^/]");
                i += 1;
            }
            '[' => match bracket_class(&chars, i) {
                Some((class, next)) => {
                    out.push_str(&class);
                    i = next;
                }
                None => {
                    out.push_str(r"\[");
                    i += 1;
                }
            },
            '\\' if i + 1 < chars.len() => {
                out.push_str(&regex::escape(&chars[i + 1].to_string()));
                i += 2;
            }
            c => {
                out.push_str(&regex::escape(&c.to_string()));
                i += 1;
            }
        }
    }

    out
}

/// Translate a `[...]` class starting at `open`; `None` if it never closes
fn bracket_class(chars: &[char], open: usize) -> Option<(String, usize)> {
    let mut j = open + 1;
    let mut class = String::from("[");

    if matches!(chars.get(j), Some('!') | Some('^')) {
        class.push('^');
        j += 1;
    }

    // A `]` right after the opening bracket is a literal member.
    let first = j;
    loop {
        let c = *chars.get(j)?;
        if c == ']' && j > first {
            break;
        }
        match c {
            '\\' | '[' | ']' | '&' | '~' => {
                class.push('\\');
                class.push(c);
            }
            _ => class.push(c),
        }
        j += 1;
    }

    class.push(']');
    Some((class, j + 1))
}

/// Ordered collection of compiled ignore patterns
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<IgnorePattern>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the contents of an ignore file
    pub fn parse(contents: &str) -> Result<Self> {
        let mut set = Self::new();
        set.extend(contents.lines())?;
        Ok(set)
    }

    /// Compile an ignore file; unreadable files are an error
    pub fn compile(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read ignore file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse ignore file: {}", path.display()))
    }

    /// Load the patterns for a walk over `root`
    ///
    /// An explicitly given ignore file must exist. Without one, `root/.gitignore`
    /// is used when present and an empty set otherwise. An empty path counts as
    /// not given.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        if let Some(path) = explicit.filter(|path| !path.as_os_str().is_empty()) {
            return Self::compile(path);
        }

        let default_path = root.join(GIT_IGNORE_FILE);
        if default_path.is_file() {
            Self::compile(&default_path)
        } else {
            Ok(Self::new())
        }
    }

    /// Append more pattern lines after the existing ones
    pub fn extend<'a, I>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for (idx, line) in lines.into_iter().enumerate() {
            if let Some(pattern) =
                IgnorePattern::parse(line).with_context(|| format!("line {}", idx + 1))?
            {
                self.patterns.push(pattern);
            }
        }
        Ok(())
    }

    /// Whether a root-relative path is excluded; last match wins
    pub fn is_ignored(&self, path: &str, is_dir: bool) -> bool {
        let mut ignored = false;
        for pattern in &self.patterns {
            if pattern.matches(path, is_dir) {
                ignored = !pattern.negated;
            }
        }
        ignored
    }

    pub fn iter(&self) -> impl Iterator<Item = &IgnorePattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Render `path` relative to `root` with `/` separators
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
