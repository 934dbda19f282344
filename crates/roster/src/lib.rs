//! Roster derivation: raw group records in, ordered and annotated groups out.

use chrono::{DateTime, Utc};
use shared::protocol::GroupResponse;

pub mod couples;
pub mod member;
pub mod normalize;
pub mod ordering;
pub mod tally;
pub mod view;
pub mod view_state;

pub use member::{ChildRecord, Member};
pub use view::{GroupView, MemberView};
pub use view_state::{DropTarget, RosterGroup, ViewError, ViewState};

/// Normalizes, pairs and orders one group.
pub fn build_group(response: &GroupResponse, now: DateTime<Utc>) -> RosterGroup {
    let mut members: Vec<Member> = response
        .group_person_response_list
        .iter()
        .map(|record| normalize::normalize_member(record, now))
        .collect();
    couples::resolve_couples(&mut members);

    RosterGroup {
        id: response.id,
        name: response.name.clone(),
        status: response.status.clone(),
        members: ordering::order_members(members),
    }
}

pub fn build_groups(responses: &[GroupResponse], now: DateTime<Utc>) -> Vec<RosterGroup> {
    responses.iter().map(|group| build_group(group, now)).collect()
}

/// Full pipeline; the result replaces any previous state wholesale.
pub fn build_view_state(responses: &[GroupResponse], now: DateTime<Utc>) -> ViewState {
    ViewState::new(build_groups(responses, now))
}
