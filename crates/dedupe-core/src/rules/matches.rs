use crate::domain::ContactId;
use crate::error::CoreError;

/// Search hits for a dedupe key with the subject contact removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    ids: Vec<ContactId>,
}

impl MatchSet {
    /// Drops the subject and repeated ids, keeping first-seen order. A
    /// contact matching both the phone and mobile groups shows up twice in
    /// a search.
    pub fn excluding_subject<I>(subject: ContactId, candidates: I) -> Self
    where
        I: IntoIterator<Item = ContactId>,
    {
        let mut ids: Vec<ContactId> = Vec::new();
        for id in candidates {
            if id != subject && !ids.contains(&id) {
                ids.push(id);
            }
        }
        Self { ids }
    }

    pub fn ids(&self) -> &[ContactId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn decide(self) -> Result<MatchDecision, CoreError> {
        match self.ids.len() {
            0 => Ok(MatchDecision::NoMatch),
            1 => Ok(MatchDecision::MergeInto(self.ids[0])),
            _ => Err(CoreError::AmbiguousMatch {
                candidates: self.ids,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDecision {
    NoMatch,
    /// Merge the subject into this surviving contact.
    MergeInto(ContactId),
}

pub fn resolve_matches(
    subject: ContactId,
    candidates: &[ContactId],
) -> Result<MatchDecision, CoreError> {
    MatchSet::excluding_subject(subject, candidates.iter().copied()).decide()
}
