//! Score ordering over the distinct identities.

use super::Registry;
use crate::identity::Identity;

impl Registry {
    /// All distinct identities, highest score first.
    ///
    /// With `filter_merge_rights`, only identities whose merge rights are
    /// known to be `true` are kept. Equal scores keep registry order.
    pub fn ordered_by_score(&self, filter_merge_rights: bool) -> Vec<&Identity> {
        let mut ordered: Vec<&Identity> = self
            .recommendations()
            .filter(|identity| !filter_merge_rights || identity.has_merge_rights() == Some(true))
            .collect();
        ordered.sort_by(|a, b| b.cmp_score(a));
        ordered
    }

    /// First `n` of [`ordered_by_score`](Self::ordered_by_score); fewer when
    /// the registry holds fewer identities.
    pub fn top_n(&self, n: usize, filter_merge_rights: bool) -> Vec<&Identity> {
        let mut ordered = self.ordered_by_score(filter_merge_rights);
        ordered.truncate(n);
        ordered
    }

    /// Detached copies of the top `n` identities, for consumers that outlive
    /// the registry.
    pub fn ranked_snapshot(&self, n: usize, filter_merge_rights: bool) -> Vec<Identity> {
        self.top_n(n, filter_merge_rights)
            .into_iter()
            .map(Identity::detached)
            .collect()
    }
}
