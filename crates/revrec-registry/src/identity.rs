//! A single recommended person.

use std::cmp::Ordering;

use revrec_core::{IdentityId, RegistryError};
use serde::{Deserialize, Serialize};

use crate::names::NameIndex;
use crate::warnings::IndexWarning;

/// One recommended-reviewer record: an optional canonical email, the display
/// names seen for the person, an accumulated score, and the merge-rights flag.
///
/// An `Identity` always carries an email or at least one name. Once added to
/// a [`Registry`](crate::Registry) it remembers the slot it lives in; that
/// back-reference is a plain index and never keeps the registry alive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "IdentityRecord")]
pub struct Identity {
    email: Option<String>,
    names: NameIndex,
    score: f64,
    has_merge_rights: Option<bool>,
    #[serde(skip)]
    owner: Option<IdentityId>,
}

/// Wire shape of an [`Identity`]. Deserialization goes through
/// [`Identity::new`] so stored records obey the same rules as built ones.
#[derive(Deserialize)]
struct IdentityRecord {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    has_merge_rights: Option<bool>,
}

impl TryFrom<IdentityRecord> for Identity {
    type Error = RegistryError;

    fn try_from(record: IdentityRecord) -> Result<Self, Self::Error> {
        Identity::new(
            record.email.as_deref(),
            record.names,
            record.score,
            record.has_merge_rights,
        )
    }
}

/// Lower-cases an email; empty input means "no email".
pub(crate) fn normalize_email(email: &str) -> Option<String> {
    if email.is_empty() {
        None
    } else {
        Some(email.to_lowercase())
    }
}

impl Identity {
    /// Build an identity. Fails with `InvalidIdentity` when neither an email
    /// nor a non-empty name is given.
    pub fn new<I, S>(
        email: Option<&str>,
        names: I,
        score: f64,
        has_merge_rights: Option<bool>,
    ) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let email = email.and_then(normalize_email);
        let names: NameIndex = names.into_iter().collect();
        if email.is_none() && names.is_empty() {
            return Err(RegistryError::InvalidIdentity);
        }
        Ok(Self {
            email,
            names,
            score,
            has_merge_rights,
            owner: None,
        })
    }

    pub fn with_email(email: &str) -> Result<Self, RegistryError> {
        Self::new(Some(email), Vec::<String>::new(), 0.0, None)
    }

    pub fn with_name(name: impl Into<String>) -> Result<Self, RegistryError> {
        Self::new(None, [name.into()], 0.0, None)
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Set the email on a detached identity.
    ///
    /// The email is set-once: a second call leaves the stored value alone and
    /// returns the warning describing the rejected update.
    pub fn set_email(&mut self, email: &str) -> Option<IndexWarning> {
        let Some(email) = normalize_email(email) else {
            return Some(IndexWarning::EmptyIdentifier);
        };
        if let Some(current) = &self.email {
            let warning = IndexWarning::EmailAlreadySet {
                current: current.clone(),
                attempted: email,
            };
            tracing::warn!(%warning, "rejected email update");
            return Some(warning);
        }
        self.email = Some(email);
        None
    }

    pub fn names(&self) -> &NameIndex {
        &self.names
    }

    /// Add a name to a detached identity. Returns `true` if it was new.
    pub fn add_name(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name)
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Add `value` multiplied by every weight, in order.
    ///
    /// Negative products are penalties and are accepted. A product that is
    /// NaN or infinite is skipped and `false` is returned.
    pub fn add_score(&mut self, value: f64, weights: &[f64]) -> bool {
        let contribution = weights.iter().fold(value, |acc, w| acc * w);
        if !contribution.is_finite() {
            tracing::warn!(value, ?weights, "skipping non-finite contribution");
            return false;
        }
        self.score += contribution;
        true
    }

    pub fn has_merge_rights(&self) -> Option<bool> {
        self.has_merge_rights
    }

    pub fn set_merge_rights(&mut self, value: bool) {
        self.has_merge_rights = Some(value);
    }

    /// Slot this identity occupies in its registry, if attached.
    pub fn id(&self) -> Option<IdentityId> {
        self.owner
    }

    pub fn is_attached(&self) -> bool {
        self.owner.is_some()
    }

    /// Email if known, otherwise the first name.
    pub fn display_key(&self) -> &str {
        self.email
            .as_deref()
            .or_else(|| self.names.first())
            .unwrap_or_default()
    }

    /// Orders identities by score only.
    pub fn cmp_score(&self, other: &Identity) -> Ordering {
        self.score.total_cmp(&other.score)
    }

    /// Copy of this identity with the registry back-reference cleared.
    pub fn detached(&self) -> Identity {
        Identity {
            owner: None,
            ..self.clone()
        }
    }

    pub(crate) fn attach(&mut self, id: IdentityId) {
        self.owner = Some(id);
    }

    pub(crate) fn names_mut(&mut self) -> &mut NameIndex {
        &mut self.names
    }

    pub(crate) fn store_email(&mut self, email: String) {
        self.email = Some(email);
    }

    pub(crate) fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    /// An identity with no identifier, for exercising the registry's own guard.
    #[cfg(test)]
    pub(crate) fn blank() -> Identity {
        Identity {
            email: None,
            names: NameIndex::default(),
            score: 0.0,
            has_merge_rights: None,
            owner: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_email_or_name() {
        let err = Identity::new(None, Vec::<String>::new(), 0.0, None).unwrap_err();
        assert_eq!(err, RegistryError::InvalidIdentity);

        let err = Identity::new(Some(""), [""], 0.0, None).unwrap_err();
        assert_eq!(err, RegistryError::InvalidIdentity);

        assert!(Identity::with_email("a@x.com").is_ok());
        assert!(Identity::with_name("Alice").is_ok());
    }

    #[test]
    fn test_email_is_lowercased() {
        let identity = Identity::with_email("Alice@Example.COM").unwrap();
        assert_eq!(identity.email(), Some("alice@example.com"));
    }

    #[test]
    fn test_email_is_set_once() {
        let mut identity = Identity::with_name("Alice").unwrap();
        assert!(identity.set_email("A@x.com").is_none());
        assert_eq!(identity.email(), Some("a@x.com"));

        let warning = identity.set_email("other@x.com").unwrap();
        assert_eq!(warning.kind(), "email_already_set");
        assert_eq!(identity.email(), Some("a@x.com"));
    }

    #[test]
    fn test_add_score_multiplies_weights() {
        let mut identity = Identity::with_name("Alice").unwrap();
        assert!(identity.add_score(10.0, &[0.5, 2.0, 0.25]));
        assert_eq!(identity.score(), 2.5);
        assert!(identity.add_score(4.0, &[]));
        assert_eq!(identity.score(), 6.5);
        assert!(identity.add_score(-1.5, &[1.0]));
        assert_eq!(identity.score(), 5.0);
    }

    #[test]
    fn test_non_finite_contribution_skipped() {
        let mut identity = Identity::with_name("Alice").unwrap();
        assert!(!identity.add_score(f64::NAN, &[1.0]));
        assert!(!identity.add_score(1.0, &[f64::INFINITY]));
        assert_eq!(identity.score(), 0.0);
    }

    #[test]
    fn test_merge_rights_unknown_until_set() {
        let mut identity = Identity::with_name("Alice").unwrap();
        assert_eq!(identity.has_merge_rights(), None);
        identity.set_merge_rights(false);
        assert_eq!(identity.has_merge_rights(), Some(false));
    }

    #[test]
    fn test_cmp_score() {
        let low = Identity::new(None, ["a"], 1.0, None).unwrap();
        let high = Identity::new(None, ["b"], 2.0, None).unwrap();
        assert_eq!(low.cmp_score(&high), Ordering::Less);
        assert_eq!(high.cmp_score(&low), Ordering::Greater);
    }

    #[test]
    fn test_display_key_prefers_email() {
        let identity = Identity::new(Some("a@x.com"), ["Alice"], 0.0, None).unwrap();
        assert_eq!(identity.display_key(), "a@x.com");
        let identity = Identity::with_name("Alice").unwrap();
        assert_eq!(identity.display_key(), "Alice");
    }

    #[test]
    fn test_serialized_snapshot_has_no_owner() {
        let mut identity = Identity::new(Some("a@x.com"), ["Alice"], 3.0, Some(true)).unwrap();
        identity.attach(IdentityId(4));
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["names"], serde_json::json!(["Alice"]));
        assert_eq!(json["score"], 3.0);
        assert_eq!(json["has_merge_rights"], true);
        assert!(json.get("owner").is_none());
    }

    #[test]
    fn test_deserialize_normalizes_email() {
        let identity: Identity = serde_json::from_str(
            r#"{"email": "A@X.COM", "names": ["Alice", "Alice", ""], "score": 2.0}"#,
        )
        .unwrap();
        assert_eq!(identity.email(), Some("a@x.com"));
        assert_eq!(identity.names().to_vec(), vec!["Alice"]);
        assert_eq!(identity.has_merge_rights(), None);
        assert!(!identity.is_attached());
    }

    #[test]
    fn test_deserialize_rejects_empty_record() {
        let err = serde_json::from_str::<Identity>(r#"{"email": null, "names": []}"#).unwrap_err();
        assert!(err.to_string().contains("email or at least one name"));
        assert!(serde_json::from_str::<Identity>(r#"{"email": "", "names": [""]}"#).is_err());
    }
}
