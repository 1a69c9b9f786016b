//! Static longest-prefix routing table.

use ims_config::RouteConfig;

/// Result of resolving a request path.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteTarget<'a> {
    /// Backend base URL without a trailing slash.
    pub upstream: &'a str,

    /// The full original path. Backends consume the same prefix they were
    /// registered under; nothing is stripped.
    pub forward_path: String,
}

/// Immutable mapping from path prefix to backend base URL.
///
/// Built once at startup and shared read-only across all request tasks, so
/// routing needs no locking.
#[derive(Debug)]
pub struct RoutingTable {
    // Sorted by prefix length descending so the most specific match wins;
    // the stable sort keeps configuration order for equal-length prefixes.
    entries: Vec<RouteConfig>,
}

impl RoutingTable {
    /// Builds the table from configured route entries.
    #[must_use]
    pub fn new(mut routes: Vec<RouteConfig>) -> Self {
        routes.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { entries: routes }
    }

    /// Resolves a request path to its backend, if any prefix matches.
    ///
    /// The path is normalized to begin with `/` before matching.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<RouteTarget<'_>> {
        let forward_path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        self.entries
            .iter()
            .find(|entry| forward_path.starts_with(&entry.prefix))
            .map(|entry| RouteTarget {
                upstream: &entry.upstream,
                forward_path,
            })
    }

    /// Returns the configured prefixes in match order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.prefix.as_str())
    }
}
