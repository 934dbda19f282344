use std::fmt::Write;

use roster::{GroupView, MemberView};

pub fn status_label(status: &str) -> &str {
    if status.is_empty() {
        "(no status)"
    } else {
        status
    }
}

pub fn format_group(group: &GroupView, color: bool) -> String {
    let mut out = String::new();
    let arrow = if group.collapsed { '▾' } else { '▴' };
    let _ = writeln!(
        out,
        "{} [{}]  👥 {}  🏠 {}  👶 {}  {arrow}",
        group.name,
        status_label(&group.status),
        group.member_count,
        group.host_count,
        group.child_count,
    );

    if group.collapsed {
        return out;
    }
    if group.members.is_empty() {
        out.push_str("    (no members)\n");
    }
    for member in &group.members {
        out.push_str(&format_member(member, color));
    }
    out.push('\n');
    out
}

fn format_member(member: &MemberView, color: bool) -> String {
    let mut badges = String::new();
    if member.is_leader {
        badges.push_str(" 🌟");
    }
    if member.is_couple {
        badges.push_str(" 💑");
    }
    if member.is_host {
        badges.push_str(" 🏠");
    }

    let name = match member.couple_color {
        Some(couple) if color => format!("\x1b[{}m{}\x1b[0m", couple.ansi_code(), member.full_name),
        Some(couple) => format!("{} <{couple}>", member.full_name),
        None => member.full_name.clone(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "  - {name} ({}){badges}", member.id);
    let _ = write!(
        out,
        "      role: {} | day: {} | civil status: {} | children: {}",
        member.role, member.day_of_week, member.civil_status, member.number_of_children
    );
    if let Some(age) = member.average_child_age {
        let _ = write!(out, " (avg age {age})");
    }
    let _ = writeln!(out, " | priority: {}", member.small_group_priority);
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
