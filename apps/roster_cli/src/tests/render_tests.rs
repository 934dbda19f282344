use super::*;
use shared::domain::{CoupleColor, GroupId, PersonId};

fn member(id: i64, name: &str) -> MemberView {
    MemberView {
        id: PersonId(id),
        full_name: name.to_string(),
        role: "member".into(),
        day_of_week: "Terça".into(),
        civil_status: "Casada".into(),
        number_of_children: 2,
        participating_children: 1,
        average_child_age: Some(7),
        small_group_priority: 2.0,
        is_leader: false,
        is_host: true,
        is_couple: true,
        spouse_id: Some(PersonId(id + 1)),
        couple_color: Some(CoupleColor::Teal),
    }
}

fn group(collapsed: bool, members: Vec<MemberView>) -> GroupView {
    GroupView {
        id: GroupId(1),
        name: "Grupo Centro".into(),
        status: "ACTIVE".into(),
        member_count: members.len(),
        host_count: 1,
        child_count: 1,
        collapsed,
        members,
    }
}

#[test]
fn collapsed_group_shows_only_the_header() {
    let text = format_group(&group(true, vec![member(1, "Ana")]), false);
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("Grupo Centro [ACTIVE]"));
    assert!(text.contains("👥 1"));
    assert!(text.ends_with("▾\n"));
}

#[test]
fn expanded_group_lists_members_with_badges() {
    let text = format_group(&group(false, vec![member(1, "Ana")]), false);
    assert!(text.contains("  - Ana <teal> (1) 💑 🏠"));
    assert!(text.contains("children: 2 (avg age 7) | priority: 2"));
}

#[test]
fn terminal_output_colours_couples() {
    let text = format_group(&group(false, vec![member(1, "Ana")]), true);
    assert!(text.contains("\x1b[36mAna\x1b[0m"));
}

#[test]
fn empty_group_says_so() {
    let text = format_group(&group(false, Vec::new()), false);
    assert!(text.contains("(no members)"));
    assert_eq!(status_label(""), "(no status)");
}
