//! Markdown summary generation (`--export-summary`, §10.2).

use crate::output::traits::{CrawlSummary, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Formats and writes `summary` to `output_path` as markdown.
pub fn write_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);
    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;
    Ok(())
}

pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    md.push_str("# Document Frontier Crawl Summary\n\n");
    md.push_str(&format!("- **Config hash**: {}\n", summary.config_hash));
    md.push_str(&format!("- **Roots processed**: {}\n", summary.runs.len()));
    md.push_str(&format!("- **Total targets found**: {}\n", summary.total_targets()));
    md.push_str(&format!("- **Total seeds found**: {}\n", summary.total_seeds()));
    md.push_str(&format!("- **Total failed URLs**: {}\n\n", summary.total_failed()));

    let stats = &summary.overall_statistics;
    md.push_str("## Overall Frontier Statistics\n\n");
    md.push_str("| Metric | Value |\n|---|---|\n");
    md.push_str(&format!("| Total entries | {} |\n", stats.total));
    md.push_str(&format!("| Targets | {} |\n", stats.targets));
    md.push_str(&format!("| Pending | {} |\n", stats.pending));
    md.push_str(&format!("| Processing | {} |\n", stats.processing));
    md.push_str(&format!("| Processed | {} |\n", stats.processed));
    md.push_str(&format!("| Failed | {} |\n", stats.failed));
    md.push_str(&format!("| Skipped | {} |\n", stats.skipped));
    md.push_str(&format!("| Unique domains | {} |\n", stats.unique_domains));
    md.push_str(&format!("| Max reached depth | {} |\n", stats.max_reached_depth));
    md.push_str(&format!("| Success rate | {:.2}% |\n\n", stats.success_rate() * 100.0));

    md.push_str("## Runs\n\n");
    md.push_str("| URL | Category | Type | Status | Targets | Seeds | Failed | Reached depth |\n");
    md.push_str("|---|---|---|---|---|---|---|---|\n");
    for entry in &summary.runs {
        let run = &entry.run;
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
            run.url,
            run.category,
            run.url_type,
            run.status,
            run.target_urls_found,
            run.seed_urls_found,
            run.failed_urls,
            run.reached_depth
        ));
    }
    md.push('\n');

    let warnings: Vec<&str> = summary
        .runs
        .iter()
        .flat_map(|e| e.run.warning_messages.iter().map(String::as_str))
        .collect();

    if !warnings.is_empty() {
        md.push_str("## Warnings\n\n");
        for warning in warnings {
            md.push_str(&format!("- {}\n", warning));
        }
        md.push('\n');
    }

    md
}
