use serde::Serialize;
use shared::domain::{CoupleColor, GroupId, PersonId};

use crate::{
    member::Member,
    tally::{host_count, participating_children_total},
    view_state::ViewState,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberView {
    pub id: PersonId,
    pub full_name: String,
    pub role: String,
    pub day_of_week: String,
    pub civil_status: String,
    pub number_of_children: u32,
    pub participating_children: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_child_age: Option<i64>,
    pub small_group_priority: f64,
    pub is_leader: bool,
    pub is_host: bool,
    pub is_couple: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse_id: Option<PersonId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub couple_color: Option<CoupleColor>,
}

impl From<&Member> for MemberView {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            full_name: member.full_name.clone(),
            role: member.role.clone(),
            day_of_week: member.day_of_week.clone(),
            civil_status: member.civil_status.clone(),
            number_of_children: member.number_of_children,
            participating_children: member.participating_children_count,
            average_child_age: (member.average_child_age > 0).then_some(member.average_child_age),
            small_group_priority: member.small_group_priority,
            is_leader: member.is_leader(),
            is_host: member.is_host(),
            is_couple: member.is_couple,
            spouse_id: member.spouse_id,
            couple_color: member.couple_token.map(|token| token.color),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    pub id: GroupId,
    pub name: String,
    pub status: String,
    pub member_count: usize,
    pub host_count: usize,
    pub child_count: u32,
    pub collapsed: bool,
    pub members: Vec<MemberView>,
}

impl ViewState {
    /// View model for every visible group, tallied over the displayed lists.
    pub fn render(&self) -> Vec<GroupView> {
        self.visible_groups()
            .map(|group| {
                let members = self.members(group.id).unwrap_or_default();
                GroupView {
                    id: group.id,
                    name: group.name.clone(),
                    status: group.status.clone(),
                    member_count: members.len(),
                    host_count: host_count(members),
                    child_count: participating_children_total(members),
                    collapsed: self.is_collapsed(group.id),
                    members: members.iter().map(MemberView::from).collect(),
                }
            })
            .collect()
    }
}
