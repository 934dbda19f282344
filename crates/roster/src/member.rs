use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::domain::{CoupleToken, PersonId};

/// Answer the backend forms use for "yes".
pub const AFFIRMATIVE: &str = "sim";

const LEADER_MARKERS: [&str; 2] = ["líder", "leader"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildRecord {
    /// 1-based position in the `child{i}...` property family.
    pub index: u32,
    pub name: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub will_join: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub id: PersonId,
    pub full_name: String,
    pub role: String,
    pub day_of_week: String,
    pub civil_status: String,
    pub number_of_children: u32,
    pub children: Vec<ChildRecord>,
    pub participating_children_count: u32,
    pub average_child_age: i64,
    pub small_group_priority: f64,
    pub host_availability: String,
    pub spouse_name: String,
    pub is_couple: bool,
    pub spouse_id: Option<PersonId>,
    pub couple_token: Option<CoupleToken>,
}

impl Member {
    /// Bare member with every optional field defaulted.
    pub fn new(id: PersonId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            role: String::new(),
            day_of_week: String::new(),
            civil_status: String::new(),
            number_of_children: 0,
            children: Vec::new(),
            participating_children_count: 0,
            average_child_age: 0,
            small_group_priority: 0.0,
            host_availability: String::new(),
            spouse_name: String::new(),
            is_couple: false,
            spouse_id: None,
            couple_token: None,
        }
    }

    pub fn is_leader(&self) -> bool {
        let role = self.role.to_lowercase();
        LEADER_MARKERS.iter().any(|marker| role.contains(marker))
    }

    pub fn is_host(&self) -> bool {
        self.host_availability.to_lowercase().contains(AFFIRMATIVE)
    }

    pub fn participating_children(&self) -> impl Iterator<Item = &ChildRecord> {
        self.children.iter().filter(|child| child.will_join)
    }

    pub(crate) fn clear_pairing(&mut self) {
        self.is_couple = false;
        self.spouse_id = None;
        self.couple_token = None;
    }
}

/// Case- and whitespace-insensitive form used for name matching.
pub(crate) fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
