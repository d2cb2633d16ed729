//! Pure regex-based partitioning of a set of extracted links into target and
//! seed candidates (§4.6 "regex-based partition").

use crate::url::{is_seed, is_target};

/// Splits `links` into targets (matching `target_patterns`) and seeds
/// (matching `seed_pattern`), discarding any link equal to `self_url`
/// (shared admission rule: "a discovered URL equal to the current page URL
/// is discarded"). A link matching both is classified as a target — targets
/// take precedence per the tie-break rule in §4.6.
pub fn partition_by_patterns(
    links: &[String],
    self_url: &str,
    target_patterns: &[String],
    seed_pattern: Option<&str>,
) -> (Vec<String>, Vec<String>) {
    let mut targets = Vec::new();
    let mut seeds = Vec::new();

    for link in links {
        if link == self_url {
            continue;
        }

        if is_target(link, target_patterns) {
            targets.push(link.clone());
        } else if is_seed(link, seed_pattern) {
            seeds.push(link.clone());
        }
    }

    (targets, seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_splits_targets_and_seeds() {
        let links = vec![
            "https://r/p1.pdf".to_string(),
            "https://r/year/2024".to_string(),
            "https://r/about".to_string(),
        ];
        let (targets, seeds) = partition_by_patterns(
            &links,
            "https://r/",
            &[r"\.pdf$".to_string()],
            Some(r"/year/"),
        );
        assert_eq!(targets, vec!["https://r/p1.pdf".to_string()]);
        assert_eq!(seeds, vec!["https://r/year/2024".to_string()]);
    }

    #[test]
    fn test_partition_excludes_self_reference() {
        let links = vec!["https://r/".to_string(), "https://r/p1.pdf".to_string()];
        let (targets, seeds) = partition_by_patterns(
            &links,
            "https://r/",
            &[r"\.pdf$".to_string()],
            Some(r"/year/"),
        );
        assert_eq!(targets, vec!["https://r/p1.pdf".to_string()]);
        assert!(seeds.is_empty());
    }

    #[test]
    fn test_partition_target_takes_precedence_over_seed() {
        let links = vec!["https://r/year/report.pdf".to_string()];
        let (targets, seeds) = partition_by_patterns(
            &links,
            "https://r/",
            &[r"\.pdf$".to_string()],
            Some(r"/year/"),
        );
        assert_eq!(targets.len(), 1);
        assert!(seeds.is_empty());
    }

    #[test]
    fn test_partition_no_seed_pattern_configured() {
        let links = vec!["https://r/year/2024".to_string()];
        let (targets, seeds) = partition_by_patterns(&links, "https://r/", &[], None);
        assert!(targets.is_empty());
        assert!(seeds.is_empty());
    }

    #[test]
    fn test_partition_unmatched_links_dropped() {
        let links = vec!["https://r/about".to_string()];
        let (targets, seeds) = partition_by_patterns(
            &links,
            "https://r/",
            &[r"\.pdf$".to_string()],
            Some(r"/year/"),
        );
        assert!(targets.is_empty());
        assert!(seeds.is_empty());
    }
}
