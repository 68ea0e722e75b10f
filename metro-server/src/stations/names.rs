//! Station name lookup.

use std::collections::HashSet;

use crate::domain::StationCatalog;

/// Sorted, de-duplicated station names with case-insensitive substring
/// search for autocomplete.
#[derive(Debug, Clone)]
pub struct StationNames {
    names: Vec<String>,
    /// Lowercased copy of `names`, index for index.
    folded: Vec<String>,
}

impl StationNames {
    /// Collect every station name in the catalog.
    pub fn from_catalog(catalog: &StationCatalog) -> Self {
        Self::from_sorted(catalog.list_station_names())
    }

    fn from_sorted(names: Vec<String>) -> Self {
        let folded = names.iter().map(|n| n.to_lowercase()).collect();
        Self { names, folded }
    }

    /// All names, sorted.
    pub fn all(&self) -> &[String] {
        &self.names
    }

    /// Get the number of names in the lookup.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the lookup is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names containing `query` (ignoring case), in sorted order, skipping
    /// any listed in `exclude`, at most `limit` of them.
    ///
    /// A blank query matches nothing.
    pub fn search(&self, query: &str, limit: usize, exclude: &[String]) -> Vec<&str> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let exclude: HashSet<&str> = exclude.iter().map(String::as_str).collect();

        self.names
            .iter()
            .zip(&self.folded)
            .filter(|(name, folded)| folded.contains(&query) && !exclude.contains(name.as_str()))
            .map(|(name, _)| name.as_str())
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::named_catalog;

    fn sample() -> StationNames {
        let catalog = named_catalog(&[
            ("Inokashira", &["Shibuya", "Shimo-Kitazawa", "Meidaimae", "Kichijoji"]),
            ("Odakyu", &["Shinjuku", "Shimo-Kitazawa", "Shin-Yurigaoka"]),
        ]);
        StationNames::from_catalog(&catalog)
    }

    #[test]
    fn all_names_sorted_and_distinct() {
        let names = sample();
        assert_eq!(names.len(), 6);
        assert_eq!(
            names.all(),
            [
                "Kichijoji",
                "Meidaimae",
                "Shibuya",
                "Shimo-Kitazawa",
                "Shin-Yurigaoka",
                "Shinjuku"
            ]
        );
    }

    #[test]
    fn search_ignores_case() {
        let names = sample();
        assert_eq!(
            names.search("shi", 10, &[]),
            vec!["Shibuya", "Shimo-Kitazawa", "Shin-Yurigaoka", "Shinjuku"]
        );
        assert_eq!(names.search("KITA", 10, &[]), vec!["Shimo-Kitazawa"]);
    }

    #[test]
    fn search_respects_limit_and_exclusions() {
        let names = sample();
        assert_eq!(names.search("shi", 2, &[]), vec!["Shibuya", "Shimo-Kitazawa"]);

        let exclude = vec!["Shibuya".to_string(), "Shinjuku".to_string()];
        assert_eq!(
            names.search("shi", 10, &exclude),
            vec!["Shimo-Kitazawa", "Shin-Yurigaoka"]
        );
    }

    #[test]
    fn blank_query_matches_nothing() {
        let names = sample();
        assert!(names.search("", 10, &[]).is_empty());
        assert!(names.search("   ", 10, &[]).is_empty());
    }
}
