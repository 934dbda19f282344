use std::collections::HashSet;

use shared::domain::{PairKey, PersonId};

use crate::member::Member;

/// Counting identity: a couple collapses to its pair key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TallyKey {
    Couple(PairKey),
    Single(PersonId),
}

impl TallyKey {
    pub fn of(member: &Member) -> Self {
        match member.spouse_id {
            Some(spouse) if member.is_couple => TallyKey::Couple(PairKey::new(member.id, spouse)),
            _ => TallyKey::Single(member.id),
        }
    }
}

/// Distinct households offering to host.
pub fn host_count(members: &[Member]) -> usize {
    members
        .iter()
        .filter(|m| m.is_host())
        .map(TallyKey::of)
        .collect::<HashSet<_>>()
        .len()
}

/// Participating children, counting each couple's children once. The first
/// partner listed with a non-zero count supplies the number.
pub fn participating_children_total(members: &[Member]) -> u32 {
    let mut seen = HashSet::new();
    members
        .iter()
        .filter(|m| m.participating_children_count > 0)
        .filter(|m| seen.insert(TallyKey::of(m)))
        .map(|m| m.participating_children_count)
        .sum()
}

#[cfg(test)]
#[path = "tests/tally_tests.rs"]
mod tests;
