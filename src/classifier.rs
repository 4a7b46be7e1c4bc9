//! Line-by-line comment classification
//!
//! Classification is a pure transition `(syntax, state, line) -> state`.
//! [`Classifier`] wraps that transition for the common case of walking one
//! file top to bottom; a fresh classifier (or a default [`ClassifyState`])
//! must be used for every file.

use crate::syntax::{CommentSyntax, LineType};

/// Classification state carried from one line to the next within a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyState<'a> {
    /// Type of the most recently classified line
    pub line_type: LineType,

    /// Delimiter that produced `line_type`, if any
    pub prefix: Option<&'a str>,

    /// End delimiter still awaited while a block comment is open
    pub open_block: Option<&'a str>,
}

impl ClassifyState<'_> {
    pub fn in_block(&self) -> bool {
        self.open_block.is_some()
    }
}

/// Classify `line` given the state left behind by the previous line
pub fn classify<'a>(
    syntax: &'a CommentSyntax,
    state: ClassifyState<'a>,
    line: &str,
) -> ClassifyState<'a> {
    let trimmed = line.trim_start();

    // Inside an open block every line is a continuation until the matching
    // end delimiter shows up.
    if let Some(end) = state.open_block {
        if trimmed.trim_end().ends_with(end) {
            return ClassifyState {
                line_type: LineType::MultiEnd,
                prefix: Some(end),
                open_block: None,
            };
        }
        return state;
    }

    // A repeat of the active line-comment or closing delimiter keeps the
    // current classification.
    if matches!(state.line_type, LineType::Single | LineType::MultiEnd) {
        if let Some(prefix) = state.prefix {
            if trimmed.starts_with(prefix) || trimmed.trim_end().ends_with(prefix) {
                return state;
            }
        }
    }

    for prefix in &syntax.single_line {
        if trimmed.starts_with(prefix.as_str()) {
            return ClassifyState {
                line_type: LineType::Single,
                prefix: Some(prefix.as_str()),
                open_block: None,
            };
        }
    }

    // Start wins over end for the same pair, so `/* x */` is a MultiStart.
    for delimiter in &syntax.multi_line {
        if trimmed.starts_with(delimiter.start.as_str()) {
            let rest = trimmed[delimiter.start.len()..].trim_end();
            let closed = rest.ends_with(delimiter.end.as_str());
            return ClassifyState {
                line_type: LineType::MultiStart,
                prefix: Some(delimiter.start.as_str()),
                open_block: if closed { None } else { Some(delimiter.end.as_str()) },
            };
        }

        if trimmed.trim_end().ends_with(delimiter.end.as_str()) {
            return ClassifyState {
                line_type: LineType::MultiEnd,
                prefix: Some(delimiter.end.as_str()),
                open_block: None,
            };
        }
    }

    ClassifyState::default()
}

/// Stateful classifier for a single file scan
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    syntax: &'a CommentSyntax,
    state: ClassifyState<'a>,
}

impl<'a> Classifier<'a> {
    pub fn new(syntax: &'a CommentSyntax) -> Self {
        Self {
            syntax,
            state: ClassifyState::default(),
        }
    }

    /// Classify the next line of the file, returning its type and active prefix
    pub fn classify(&mut self, line: &str) -> (LineType, Option<&'a str>) {
        self.state = classify(self.syntax, self.state, line);
        (self.state.line_type, self.state.prefix)
    }

    pub fn state(&self) -> ClassifyState<'a> {
        self.state
    }
}
