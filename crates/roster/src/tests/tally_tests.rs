use super::*;
use crate::couples::resolve_couples;

fn member(id: i64, name: &str, spouse: &str, host: &str, kids: u32) -> Member {
    let mut m = Member::new(PersonId(id), name);
    m.spouse_name = spouse.to_string();
    m.host_availability = host.to_string();
    m.number_of_children = kids;
    m.participating_children_count = kids;
    m
}

#[test]
fn couple_counts_once_for_hosts_and_children() {
    let mut members = vec![
        member(20, "Ana Silva", "Bruno Silva", "sim", 2),
        member(5, "Bruno Silva", "Ana Silva", "Sim", 2),
        member(7, "Carla", "", "sim", 1),
        member(8, "Davi", "", "não", 3),
    ];
    resolve_couples(&mut members);

    assert_eq!(host_count(&members), 2);
    assert_eq!(participating_children_total(&members), 2 + 1 + 3);
}

#[test]
fn pair_key_does_not_depend_on_who_comes_first() {
    let mut forward = vec![
        member(1, "Ana", "Bruno", "sim", 1),
        member(2, "Bruno", "Ana", "sim", 1),
    ];
    let mut backward = vec![forward[1].clone(), forward[0].clone()];
    resolve_couples(&mut forward);
    resolve_couples(&mut backward);

    assert_eq!(TallyKey::of(&forward[0]), TallyKey::of(&backward[0]));
    assert_eq!(TallyKey::of(&forward[0]), TallyKey::of(&forward[1]));
    assert_eq!(host_count(&backward), 1);
}

#[test]
fn first_listed_partner_with_children_supplies_the_count() {
    let mut members = vec![
        member(1, "Ana", "Bruno", "", 0),
        member(2, "Bruno", "Ana", "", 3),
    ];
    resolve_couples(&mut members);
    members[0].participating_children_count = 0;

    assert_eq!(participating_children_total(&members), 3);
}

#[test]
fn unpaired_members_count_individually() {
    let members = vec![
        member(1, "Ana", "Bruno", "sim", 1),
        member(2, "Bruno", "", "sim", 1),
    ];
    assert_eq!(host_count(&members), 2);
    assert_eq!(participating_children_total(&members), 2);
}
