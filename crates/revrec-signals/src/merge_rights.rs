//! Repository membership: who may approve and merge.

use revrec_core::constants::SIGNAL_MERGE_RIGHTS;
use revrec_core::traits::WeightTable;
use revrec_core::types::FxHashSet;
use revrec_core::{IdentityId, SignalError};
use revrec_registry::{Identity, Registry};

use crate::person::PersonRef;
use crate::source::{ContributionSummary, SignalSource, SignalStage};

/// Marks known members with merge rights and everyone else without.
///
/// Members that no earlier source produced evidence for are not added: a
/// person with no score is not a recommendation.
#[derive(Debug, Clone, Default)]
pub struct MergeRightsSignal {
    members: Vec<PersonRef>,
}

impl MergeRightsSignal {
    pub fn new(members: Vec<PersonRef>) -> Self {
        Self { members }
    }
}

impl SignalSource for MergeRightsSignal {
    fn name(&self) -> &str {
        SIGNAL_MERGE_RIGHTS
    }

    fn stage(&self) -> SignalStage {
        SignalStage::MergeRights
    }

    fn contribute(
        &self,
        registry: &mut Registry,
        _weights: &WeightTable,
    ) -> Result<ContributionSummary, SignalError> {
        let mut summary = ContributionSummary::new(self.name());

        let mut members: FxHashSet<IdentityId> = FxHashSet::default();
        for member in &self.members {
            match member.find(registry) {
                Some(id) => {
                    members.insert(id);
                }
                None => summary.skipped += 1,
            }
        }

        let everyone: Vec<IdentityId> = registry.recommendations().filter_map(Identity::id).collect();
        for id in everyone {
            if let Some(mut identity) = registry.identity_mut(id) {
                identity.set_merge_rights(members.contains(&id));
                summary.flagged += 1;
            }
        }

        tracing::debug!(
            members = members.len(),
            flagged = summary.flagged,
            unknown = summary.skipped,
            "merge rights assigned"
        );
        Ok(summary)
    }
}
