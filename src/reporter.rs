use crate::cli::OutputFormat;
use crate::issue::build_payloads;
use crate::models::TagReport;
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::fs;
use std::path::Path;

const TOP_FILES: usize = 10;

/// Generate and output a report in the specified format
pub fn generate_report(
    report: &TagReport,
    format: OutputFormat,
    output_path: Option<&Path>,
) -> Result<()> {
    let output = match format {
        OutputFormat::Terminal => format_terminal(report),
        OutputFormat::Markdown => format_markdown(report),
        OutputFormat::Json => format_json(report)?,
        OutputFormat::Issues => format_issues(report)?,
    };

    if let Some(path) = output_path {
        fs::write(path, output)
            .with_context(|| format!("Failed to write output to {}", path.display()))?;
        eprintln!("Report written to {}", path.display());
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Format report as terminal table
fn format_terminal(report: &TagReport) -> String {
    let mut output = String::new();

    // Header
    let line = "─".repeat(58);
    output.push_str(&format!("╭{}╮\n", line));
    output.push_str(&format!("│ {:^56} │\n", "Issue Summoner - Tag Report"));
    output.push_str(&format!("│ Scanned: {:<47} │\n", report.scan_path.display()));
    if let Some(ref repo) = report.repository {
        output.push_str(&format!("│ Repository: {:<44} │\n", repo.to_string()));
    }
    output.push_str(&format!("│ Annotation: {:<44} │\n", report.annotation));
    output.push_str(&format!("│ Total Tags: {:<44} │\n", report.total_count));
    output.push_str(&format!("╰{}╯\n\n", line));

    // Summary by file
    let files = report.busiest_files(TOP_FILES);
    if !files.is_empty() {
        output.push_str("Summary by File:\n");
        let mut file_table = Table::new();
        file_table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("File").fg(Color::Cyan),
                Cell::new("Count").fg(Color::Cyan),
            ]);

        for (path, count) in files {
            file_table.add_row(vec![path.display().to_string(), count.to_string()]);
        }

        output.push_str(&format!("{}\n\n", file_table));
    }

    // Every tag, in traversal order
    if !report.tags.is_empty() {
        output.push_str("Tags:\n");
        let mut tag_table = Table::new();
        tag_table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("File").fg(Color::Cyan),
                Cell::new("Line").fg(Color::Cyan),
                Cell::new("Title").fg(Color::Cyan),
                Cell::new("Description").fg(Color::Cyan),
            ]);

        for tag in &report.tags {
            tag_table.add_row(vec![
                Cell::new(tag.file_path.display().to_string()),
                Cell::new(tag.line_number.to_string()),
                Cell::new(&tag.title),
                Cell::new(&tag.description),
            ]);
        }

        output.push_str(&format!("{}\n", tag_table));
    }

    output
}

/// Format report as Markdown
fn format_markdown(report: &TagReport) -> String {
    let mut output = String::new();

    // Header
    output.push_str("# Issue Summoner - Tag Report\n\n");
    output.push_str(&format!("**Scanned**: `{}`\n", report.scan_path.display()));
    if let Some(ref repo) = report.repository {
        output.push_str(&format!("**Repository**: {}\n", repo));
    }
    output.push_str(&format!("**Annotation**: `{}`\n", report.annotation));
    output.push_str(&format!("**Total Tags**: {}\n", report.total_count));
    output.push_str(&format!(
        "**Generated**: {}\n\n",
        report.scan_time.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    let files = report.busiest_files(TOP_FILES);
    if !files.is_empty() {
        output.push_str(&format!("## Summary by File (Top {})\n\n", TOP_FILES));
        for (path, count) in files {
            output.push_str(&format!("- `{}`: {}\n", path.display(), count));
        }
        output.push('\n');
    }

    if !report.tags.is_empty() {
        output.push_str("## Tags\n\n");

        for (idx, tag) in report.tags.iter().enumerate() {
            output.push_str(&format!(
                "{}. **{}** in `{}:{}`\n",
                idx + 1,
                tag.title,
                tag.file_path.display(),
                tag.line_number
            ));

            if !tag.description.is_empty() {
                output.push_str("```\n");
                output.push_str(&tag.description);
                output.push_str("\n```\n");
            }
            output.push('\n');
        }
    }

    output
}

/// Format report as JSON
fn format_json(report: &TagReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}

/// Format the tags as issue payloads ready to be filed
fn format_issues(report: &TagReport) -> Result<String> {
    let payloads = build_payloads(&report.tags, report.repository.as_ref());
    serde_json::to_string_pretty(&payloads).context("Failed to serialize issue payloads")
}
