use crate::syntax::LineType;

/// Pull comment content out of a classified line
///
/// Returns the text following `annotation` and `true` when the annotation
/// token appears as a whitespace-delimited field. Otherwise returns the text
/// after the last occurrence of `prefix` and `false`, which is how
/// description lines of a block surface their content.
///
/// On a `MultiEnd` line a trailing field equal to `prefix` (the closing
/// delimiter) is dropped first.
pub fn extract(
    line: &str,
    annotation: &str,
    line_type: LineType,
    prefix: Option<&str>,
) -> (String, bool) {
    let mut fields: Vec<&str> = line.split_whitespace().collect();
    if fields.is_empty() {
        return (String::new(), false);
    }

    if line_type == LineType::MultiEnd && fields.last().copied() == prefix {
        fields.pop();
    }

    let mut start = 0;
    for (i, field) in fields.iter().enumerate() {
        if Some(*field) == prefix {
            start = i + 1;
        }

        if *field == annotation {
            return (fields[i + 1..].join(" "), true);
        }
    }

    (fields[start..].join(" "), false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_annotation() {
        let (content, found) = extract("// @TODO fix bug", "@TODO", LineType::Single, Some("//"));
        assert_eq!(content, "fix bug");
        assert!(found);
    }

    #[test]
    fn test_multi_end_strips_closing_delimiter() {
        let (content, found) = extract(
            "   this function later */",
            "@TODO",
            LineType::MultiEnd,
            Some("*/"),
        );
        assert_eq!(content, "this function later");
        assert!(!found);
    }

    #[test]
    fn test_one_liner_block_keeps_closing_delimiter() {
        let (content, found) = extract(
            "/* @TODO one-liner */",
            "@TODO",
            LineType::MultiStart,
            Some("/*"),
        );
        assert_eq!(content, "one-liner */");
        assert!(found);
    }

    #[test]
    fn test_missing_annotation_returns_text_after_prefix() {
        let (content, found) =
            extract("let x = 1; // note here", "@TODO", LineType::Single, Some("//"));
        assert_eq!(content, "note here");
        assert!(!found);

        let (content, found) =
            extract("  * more detail", "@TODO", LineType::MultiStart, Some("/*"));
        assert_eq!(content, "* more detail");
        assert!(!found);
    }

    #[test]
    fn test_annotation_must_be_whole_field() {
        let (content, found) = extract("// @TODO: later", "@TODO", LineType::Single, Some("//"));
        assert_eq!(content, "@TODO: later");
        assert!(!found);
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(
            extract("   ", "@TODO", LineType::SrcCode, None),
            (String::new(), false)
        );
    }

    #[test]
    fn test_closing_delimiter_only() {
        let (content, found) = extract("*/", "@TODO", LineType::MultiEnd, Some("*/"));
        assert_eq!(content, "");
        assert!(!found);
    }
}
