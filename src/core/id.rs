//! Identifier generation — prefix-scoped monotonic counters.
//!
//! One [`IdGen`] lives for the whole app run and is threaded through every
//! portal registration, so generated ids are unique across all portals on the
//! page without relying on ambient global state.  Tests construct their own
//! generator, which keeps them hermetic.

use std::collections::HashMap;

/// Prefix-scoped id generator.  `next("url-portlet-")` yields
/// `url-portlet-1`, `url-portlet-2`, … for the generator's lifetime.
#[derive(Debug, Default)]
pub struct IdGen {
    counters: HashMap<String, u64>,
}

impl IdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a fresh identifier under `prefix`.  Never repeats for a given
    /// prefix on the same generator.
    pub fn next(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        format!("{prefix}{counter}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_within_a_prefix() {
        let mut gen = IdGen::new();
        let ids: HashSet<String> = (0..100).map(|_| gen.next("url-portlet-")).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn prefixes_count_independently() {
        let mut gen = IdGen::new();
        assert_eq!(gen.next("url-portal-"), "url-portal-1");
        assert_eq!(gen.next("url-portal-column-"), "url-portal-column-1");
        assert_eq!(gen.next("url-portal-"), "url-portal-2");
    }

    #[test]
    fn separate_generators_are_independent() {
        let mut a = IdGen::new();
        let mut b = IdGen::new();
        assert_eq!(a.next("url-portlet-"), "url-portlet-1");
        assert_eq!(b.next("url-portlet-"), "url-portlet-1");
    }
}
