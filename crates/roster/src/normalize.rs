use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use shared::protocol::{ExtraProperties, GroupPersonResponse};

use crate::member::{ChildRecord, Member, AFFIRMATIVE};

const MILLIS_PER_YEAR: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 365.25;
/// Upper bound on `child{i}` slots inspected, whatever the declared count says.
const MAX_CHILD_SLOTS: u32 = 64;

/// Typed view over the person's extra-properties bag, parsed once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberProfile {
    pub number_of_children: u32,
    pub children: Vec<ChildRecord>,
    pub day_of_week: String,
    pub small_group_priority: f64,
    pub host_availability: String,
    pub spouse_name: String,
}

impl MemberProfile {
    pub fn from_extra(props: &ExtraProperties) -> Self {
        let number_of_children = declared_child_count(props);
        let children = (1..=number_of_children.min(MAX_CHILD_SLOTS))
            .map(|index| ChildRecord {
                index,
                name: props
                    .text(&format!("child{index}Name"))
                    .filter(|name| !name.trim().is_empty()),
                date_of_birth: props
                    .text(&format!("child{index}Dob"))
                    .as_deref()
                    .and_then(parse_date_of_birth),
                will_join: props
                    .text(&format!("child{index}WillJoin"))
                    .is_some_and(|answer| answer.trim().to_lowercase() == AFFIRMATIVE),
            })
            .collect();

        Self {
            number_of_children,
            children,
            day_of_week: props.text("dayOfWeek").unwrap_or_default(),
            small_group_priority: props.number("smallGroupPriority").unwrap_or(0.0),
            host_availability: props.text("hostAvailability").unwrap_or_default(),
            spouse_name: props.text("spouseName").unwrap_or_default(),
        }
    }
}

fn declared_child_count(props: &ExtraProperties) -> u32 {
    match props.number("numberOfChildren") {
        Some(n) if n >= 1.0 => n.min(f64::from(u32::MAX)).trunc() as u32,
        _ => 0,
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 and naive ISO timestamps. Anything else is
/// treated as unknown.
pub fn parse_date_of_birth(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

pub fn age_in_years(date_of_birth: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - date_of_birth).num_milliseconds() as f64 / MILLIS_PER_YEAR
}

/// Rounded mean age of the participating children with a known birth date.
pub fn average_child_age(children: &[ChildRecord], now: DateTime<Utc>) -> i64 {
    let ages: Vec<f64> = children
        .iter()
        .filter(|child| child.will_join)
        .filter_map(|child| child.date_of_birth)
        .map(|dob| age_in_years(dob, now))
        .filter(|age| age.is_finite())
        .collect();

    if ages.is_empty() {
        return 0;
    }
    let mean = ages.iter().sum::<f64>() / ages.len() as f64;
    mean.round() as i64
}

pub fn normalize_member(record: &GroupPersonResponse, now: DateTime<Utc>) -> Member {
    let person = &record.person;
    let profile = MemberProfile::from_extra(&person.extra_properties);
    let participating = profile.children.iter().filter(|c| c.will_join).count() as u32;
    let average_child_age = average_child_age(&profile.children, now);

    Member {
        role: record.role.clone(),
        day_of_week: profile.day_of_week,
        civil_status: person.civil_status.clone(),
        number_of_children: profile.number_of_children,
        participating_children_count: participating,
        average_child_age,
        children: profile.children,
        small_group_priority: profile.small_group_priority,
        host_availability: profile.host_availability,
        spouse_name: profile.spouse_name,
        ..Member::new(person.id, person.full_name.clone())
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
