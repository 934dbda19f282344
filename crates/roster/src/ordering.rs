use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};
use tracing::warn;

use crate::member::Member;

/// Ordering atom: a resolved couple or a single member.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub members: Vec<Member>,
}

impl Unit {
    /// 1 for units with a leader, 2 for units offering to host, 3 otherwise.
    pub fn weight(&self) -> u8 {
        if self.members.iter().any(Member::is_leader) {
            1
        } else if self.members.iter().any(Member::is_host) {
            2
        } else {
            3
        }
    }

    pub fn sort_name(&self) -> &str {
        self.members
            .first()
            .map(|m| m.full_name.as_str())
            .unwrap_or_default()
    }
}

/// Splits a group into units. A couple unit takes the position of whichever
/// partner appears first and keeps the partners in list order.
pub fn build_units(members: Vec<Member>) -> Vec<Unit> {
    let ids: Vec<_> = members.iter().map(|m| m.id).collect();
    let mut slots: Vec<Option<Member>> = members.into_iter().map(Some).collect();
    let mut units = Vec::with_capacity(slots.len());

    for i in 0..slots.len() {
        let Some(member) = slots[i].take() else {
            continue;
        };
        let partner_idx = member
            .spouse_id
            .filter(|_| member.is_couple)
            .and_then(|spouse| {
                (i + 1..slots.len()).find(|&j| {
                    ids[j] == spouse
                        && slots[j]
                            .as_ref()
                            .is_some_and(|p| p.spouse_id == Some(member.id))
                })
            });

        let mut unit = vec![member];
        if let Some(partner) = partner_idx.and_then(|j| slots[j].take()) {
            unit.push(partner);
        }
        units.push(Unit { members: unit });
    }

    units
}

/// Root-locale collator at primary strength. Case and accents are ignored and
/// letters without a decomposition (ø, æ, ß, ł) sort with their base letters.
pub struct NameCollator(Option<Collator>);

impl NameCollator {
    pub fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Primary);
        let collator = Collator::try_new(&Default::default(), options)
            .map_err(|err| warn!(error = ?err, "collator unavailable, comparing lowercase names"))
            .ok();
        Self(collator)
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.0 {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    NameCollator::new().compare(a, b)
}

pub fn sort_units(units: &mut [Unit]) {
    let collator = NameCollator::new();
    units.sort_by(|a, b| {
        a.weight()
            .cmp(&b.weight())
            .then_with(|| collator.compare(a.sort_name(), b.sort_name()))
    });
}

/// Canonical display order for one group.
pub fn order_members(members: Vec<Member>) -> Vec<Member> {
    let mut units = build_units(members);
    sort_units(&mut units);
    units.into_iter().flat_map(|unit| unit.members).collect()
}

#[cfg(test)]
#[path = "tests/ordering_tests.rs"]
mod tests;
