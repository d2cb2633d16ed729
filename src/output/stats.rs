//! `--stats` CLI output: prints frontier statistics to stdout (§10.2).

use crate::storage::FrontierStatistics;

/// Prints `stats` in a human-readable form, optionally labeled by category.
pub fn print_statistics(stats: &FrontierStatistics, category: Option<&str>) {
    match category {
        Some(c) => println!("=== Frontier Statistics ({}) ===\n", c),
        None => println!("=== Frontier Statistics ===\n"),
    }

    println!("Total entries: {}", stats.total);
    println!("Targets found: {}", stats.targets);
    println!();

    println!("By status:");
    println!("  Pending:    {}", stats.pending);
    println!("  Processing: {}", stats.processing);
    println!("  Processed:  {}", stats.processed);
    println!("  Failed:     {}", stats.failed);
    println!("  Skipped:    {}", stats.skipped);
    println!();

    println!("Unique domains: {}", stats.unique_domains);
    println!("Max reached depth: {}", stats.max_reached_depth);
    println!("Success rate: {:.1}%", stats.success_rate() * 100.0);

    if let Some(first) = stats.first_insert {
        println!("First insert: {}", first);
    }
    if let Some(last) = stats.last_update {
        println!("Last update: {}", last);
    }
}
