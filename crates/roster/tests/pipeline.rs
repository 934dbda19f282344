use chrono::{TimeZone, Utc};
use roster::{build_view_state, DropTarget};
use serde_json::json;
use shared::{
    domain::{GroupId, PersonId},
    protocol::{decode_group_list, GroupResponse},
};

fn payload() -> Vec<GroupResponse> {
    serde_json::from_value(json!([
        {
            "id": 1,
            "name": "Grupo Centro",
            "status": "ACTIVE",
            "groupPersonResponseList": [
                {
                    "person": {"id": 30, "fullName": "Carlos", "extraProperties": {"hostAvailability": "não"}},
                    "role": "member"
                },
                {
                    "person": {
                        "id": 21,
                        "fullName": "Bruno Silva",
                        "civilStatus": "Casado",
                        "extraProperties": {
                            "spouseName": "Ana Silva",
                            "hostAvailability": "Sim",
                            "numberOfChildren": "1",
                            "child1WillJoin": "sim",
                            "child1Dob": "2017-01-01"
                        }
                    },
                    "role": "member"
                },
                {
                    "person": {"id": 40, "fullName": "Dora", "extraProperties": {"hostAvailability": "não"}},
                    "role": "Leader"
                },
                {
                    "person": {
                        "id": 20,
                        "fullName": "Ana Silva",
                        "civilStatus": "Casada",
                        "extraProperties": {
                            "spouseName": "bruno silva",
                            "hostAvailability": "sim",
                            "numberOfChildren": 1,
                            "child1WillJoin": "sim",
                            "child1Dob": "2017-01-01"
                        }
                    },
                    "role": "member"
                }
            ]
        },
        {
            "id": 2,
            "name": "Grupo Norte",
            "status": "PAUSED",
            "groupPersonResponseList": [
                {"person": {"id": 50, "fullName": "Eva"}, "role": "member"}
            ]
        },
        {"id": 3, "name": "Grupo Sul", "status": "ACTIVE", "groupPersonResponseList": null}
    ]))
    .expect("payload")
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

#[test]
fn leader_then_host_then_plain_member() {
    let groups: Vec<GroupResponse> = serde_json::from_value(json!([{
        "id": 9,
        "name": "G",
        "status": "ACTIVE",
        "groupPersonResponseList": [
            {"person": {"id": 3, "fullName": "C", "extraProperties": {"hostAvailability": "não"}}, "role": "member"},
            {"person": {"id": 2, "fullName": "B", "extraProperties": {"hostAvailability": "sim"}}, "role": "member"},
            {"person": {"id": 1, "fullName": "A", "extraProperties": {"hostAvailability": "não"}}, "role": "Leader"}
        ]
    }]))
    .expect("payload");

    let state = build_view_state(&groups, now());
    let order: Vec<&str> = state
        .members(GroupId(9))
        .expect("group")
        .iter()
        .map(|m| m.full_name.as_str())
        .collect();
    assert_eq!(order, vec!["A", "B", "C"]);
}

#[test]
fn malformed_member_is_dropped_without_losing_the_group() {
    let raw = r#"[
        {
            "id": 5,
            "name": "Grupo Leste",
            "status": "ACTIVE",
            "groupPersonResponseList": [
                {"person": {"id": null, "fullName": "Quebrado"}, "role": "member"},
                {
                    "person": {
                        "id": "61",
                        "fullName": "Gil",
                        "civilStatus": 2,
                        "extraProperties": {"hostAvailability": "sim"}
                    },
                    "role": "member"
                }
            ]
        },
        {"id": 6, "name": "Grupo Oeste", "status": "ACTIVE", "groupPersonResponseList": []}
    ]"#;

    let groups = decode_group_list(raw).expect("decode");
    let state = build_view_state(&groups, now());
    assert_eq!(state.groups().len(), 2);

    let leste = state.members(GroupId(5)).expect("group");
    assert_eq!(leste.len(), 1);
    assert_eq!(leste[0].id, PersonId(61));
    assert_eq!(leste[0].civil_status, "2");
    assert!(leste[0].is_host());

    let views = state.render();
    assert_eq!(views[0].member_count, 1);
    assert_eq!(views[0].host_count, 1);
}

#[test]
fn couple_is_adjacent_tokened_and_counted_once() {
    let state = build_view_state(&payload(), now());
    let members = state.members(GroupId(1)).expect("group");
    let order: Vec<i64> = members.iter().map(|m| m.id.0).collect();
    // Dora leads; the Silvas host and stay together; Carlos last.
    assert_eq!(order, vec![40, 21, 20, 30]);

    let (bruno, ana) = (&members[1], &members[2]);
    assert!(ana.is_couple && bruno.is_couple);
    assert_eq!(ana.spouse_id, Some(PersonId(21)));
    assert_eq!(ana.couple_token, bruno.couple_token);

    let views = state.render();
    let centro = &views[0];
    assert_eq!(centro.member_count, 4);
    assert_eq!(centro.host_count, 1);
    assert_eq!(centro.child_count, 1);
    assert!(centro.collapsed);
    assert_eq!(centro.members[1].average_child_age, Some(8));
    assert_eq!(centro.members[0].average_child_age, None);
    assert!(centro.members[0].is_leader);
    assert!(centro.members[1].couple_color.is_some());
}

#[test]
fn participation_never_exceeds_declared_children() {
    let state = build_view_state(&payload(), now());
    for group in state.groups() {
        for member in &group.members {
            assert!(member.participating_children_count <= member.number_of_children);
        }
    }
}

#[test]
fn moving_between_groups_updates_rendered_counts() {
    let mut state = build_view_state(&payload(), now());
    state
        .move_member(
            GroupId(1),
            0,
            Some(DropTarget {
                group: GroupId(2),
                index: 2,
            }),
        )
        .expect("move");

    let views = state.render();
    assert_eq!(views[0].member_count, 3);
    assert_eq!(views[1].member_count, 2);
    assert_eq!(views[1].members[1].id, PersonId(40));
}

#[test]
fn filter_and_render_agree() {
    let mut state = build_view_state(&payload(), now());
    state.set_status_filter(["PAUSED"]);
    let views = state.render();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].name, "Grupo Norte");

    state.set_status_filter(Vec::<String>::new());
    assert_eq!(state.render().len(), 3);
    assert_eq!(state.members(GroupId(3)).map(|members| members.len()), Some(0));
}

#[test]
fn rendered_view_serializes_for_the_presentation_layer() {
    let state = build_view_state(&payload(), now());
    let value = serde_json::to_value(state.render()).expect("json");
    let first = &value[0];
    assert_eq!(first["name"], "Grupo Centro");
    assert_eq!(first["host_count"], 1);
    assert_eq!(first["members"][1]["couple_color"], "pink");
}
