use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// How a single line relates to the comment structure of its file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineType {
    /// Plain source code, no comment delimiter recognized
    #[default]
    SrcCode,
    /// A single-line comment (`// ...`, `# ...`)
    Single,
    /// Opens a multi-line block, or continues one that is still open
    MultiStart,
    /// Closes a multi-line block
    MultiEnd,
}

/// Opening and closing delimiter of one multi-line comment form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDelimiter {
    pub start: String,
    pub end: String,
}

impl BlockDelimiter {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// Comment rules for one language family
///
/// A language may offer several block forms (Python has both `"""` and `'''`),
/// so `multi_line` keeps each start delimiter paired with its own end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSyntax {
    #[serde(default)]
    pub single_line: Vec<String>,

    #[serde(default)]
    pub multi_line: Vec<BlockDelimiter>,
}

impl CommentSyntax {
    pub fn new(single_line: &[&str], multi_line: &[(&str, &str)]) -> Self {
        Self {
            single_line: single_line.iter().map(|s| s.to_string()).collect(),
            multi_line: multi_line
                .iter()
                .map(|(start, end)| BlockDelimiter::new(start, end))
                .collect(),
        }
    }

    /// `//` line comments and `/* */` blocks
    pub fn c_style() -> Self {
        Self::new(&["//"], &[("/*", "*/")])
    }

    pub fn python() -> Self {
        Self::new(&["#"], &[("\"\"\"", "\"\"\""), ("'''", "'''")])
    }

    /// HTML comments only, no line comment form
    pub fn html() -> Self {
        Self::new(&[], &[("<!--", "-->")])
    }

    /// Fallback for unknown extensions: `#` everywhere
    pub fn hash() -> Self {
        Self::new(&["#"], &[("#", "#")])
    }
}

const C_STYLE_EXTENSIONS: &[&str] = &[
    "c", "h", "cc", "cpp", "hpp", "cs", "go", "java", "js", "jsx", "kt", "m", "php", "rs",
    "scala", "swift", "ts", "tsx",
];

const HTML_EXTENSIONS: &[&str] = &["md", "html", "xml", "vue"];

/// Read-only lookup from file extension to comment syntax
///
/// Built once at startup and handed to every scan; there is no way to mutate
/// it after construction.
#[derive(Debug, Clone)]
pub struct SyntaxRegistry {
    by_extension: HashMap<String, Arc<CommentSyntax>>,
    default: Arc<CommentSyntax>,
}

impl Default for SyntaxRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SyntaxRegistry {
    /// Registry with the built-in language table
    pub fn builtin() -> Self {
        let mut by_extension = HashMap::new();

        let c_style = Arc::new(CommentSyntax::c_style());
        for ext in C_STYLE_EXTENSIONS {
            by_extension.insert(ext.to_string(), Arc::clone(&c_style));
        }

        let html = Arc::new(CommentSyntax::html());
        for ext in HTML_EXTENSIONS {
            by_extension.insert(ext.to_string(), Arc::clone(&html));
        }

        let line_slashes = Arc::new(CommentSyntax::new(&["//"], &[]));
        for ext in ["jai", "zig"] {
            by_extension.insert(ext.to_string(), Arc::clone(&line_slashes));
        }

        let semicolon = Arc::new(CommentSyntax::new(&[";"], &[]));
        for ext in ["lisp", "clj", "asm"] {
            by_extension.insert(ext.to_string(), Arc::clone(&semicolon));
        }

        by_extension.insert("py".to_string(), Arc::new(CommentSyntax::python()));
        // `--[[` would always be caught by the `--` line prefix first
        by_extension.insert(
            "lua".to_string(),
            Arc::new(CommentSyntax::new(&["--"], &[])),
        );
        by_extension.insert(
            "hs".to_string(),
            Arc::new(CommentSyntax::new(&["--"], &[("{-", "-}")])),
        );
        by_extension.insert(
            "ml".to_string(),
            Arc::new(CommentSyntax::new(&[], &[("(*", "*)")])),
        );
        by_extension.insert(
            "vim".to_string(),
            Arc::new(CommentSyntax::new(&["\""], &[])),
        );

        Self {
            by_extension,
            default: Arc::new(CommentSyntax::hash()),
        }
    }

    /// Built-in table with user-supplied entries layered on top
    pub fn with_overrides(overrides: &HashMap<String, CommentSyntax>) -> Self {
        let mut registry = Self::builtin();
        for (ext, syntax) in overrides {
            let ext = ext.trim_start_matches('.').to_string();
            registry.by_extension.insert(ext, Arc::new(syntax.clone()));
        }
        registry
    }

    /// Syntax for an extension, with or without the leading dot
    pub fn syntax_for(&self, extension: &str) -> &CommentSyntax {
        let ext = extension.trim_start_matches('.');
        self.by_extension
            .get(ext)
            .or_else(|| self.by_extension.get(&ext.to_lowercase()))
            .unwrap_or(&self.default)
    }

    pub fn syntax_for_path(&self, path: &Path) -> &CommentSyntax {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.syntax_for(ext)
    }

    pub fn default_syntax(&self) -> &CommentSyntax {
        &self.default
    }
}
