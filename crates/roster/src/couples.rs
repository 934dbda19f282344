use std::collections::HashMap;

use shared::domain::{CoupleColor, CoupleToken, PairKey};
use tracing::debug;

use crate::member::{name_key, Member};

/// Hands out palette slots round-robin, one per distinct couple. A pair seen
/// again gets the token it was first given.
#[derive(Debug, Default)]
pub struct CouplePalette {
    next_slot: usize,
    assigned: HashMap<PairKey, CoupleToken>,
}

impl CouplePalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token_for(&mut self, pair: PairKey) -> CoupleToken {
        let next_slot = &mut self.next_slot;
        *self.assigned.entry(pair).or_insert_with(|| {
            let color = CoupleColor::from_slot(*next_slot);
            *next_slot += 1;
            CoupleToken { pair, color }
        })
    }

    pub fn couples(&self) -> usize {
        self.assigned.len()
    }
}

/// Pairs members of one group that name each other as spouse.
pub fn resolve_couples(members: &mut [Member]) {
    let mut palette = CouplePalette::new();
    resolve_couples_with(members, &mut palette);
}

pub fn resolve_couples_with(members: &mut [Member], palette: &mut CouplePalette) {
    for member in members.iter_mut() {
        member.clear_pairing();
    }

    let names: Vec<String> = members.iter().map(|m| name_key(&m.full_name)).collect();
    let spouses: Vec<String> = members.iter().map(|m| name_key(&m.spouse_name)).collect();

    for i in 0..members.len() {
        if spouses[i].is_empty() || members[i].spouse_id.is_some() {
            continue;
        }

        // First member carrying the named spouse's name who names us back.
        let Some(j) = (0..members.len())
            .find(|&j| j != i && names[j] == spouses[i] && spouses[j] == names[i])
        else {
            debug!(
                member = %members[i].id,
                spouse = %members[i].spouse_name,
                "spouse reference has no mutual match in group"
            );
            continue;
        };

        if members[j].spouse_id.is_some() {
            debug!(
                member = %members[i].id,
                spouse = %members[j].id,
                "spouse already paired; leaving member unpaired"
            );
            continue;
        }

        let token = palette.token_for(PairKey::new(members[i].id, members[j].id));
        let (first_id, second_id) = (members[i].id, members[j].id);
        for (idx, partner) in [(i, second_id), (j, first_id)] {
            let member = &mut members[idx];
            member.is_couple = true;
            member.spouse_id = Some(partner);
            member.couple_token = Some(token);
        }
    }
}

#[cfg(test)]
#[path = "tests/couples_tests.rs"]
mod tests;
