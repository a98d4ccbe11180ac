use super::{opt, table};
use comfy_table::{Attribute, Cell, CellAlignment, Color};
use shiftdesk_core::dashboard::{chart_max, weekly_hours, HospitalMetrics};
use shiftdesk_core::directory::DirectoryResults;
use shiftdesk_core::display::number;
use shiftdesk_core::password::{band, can_submit_reset, strength, StrengthBand};
use shiftdesk_core::protocol::schedule::StaffDashboardResponse;
use shiftdesk_core::session::{Role, StoredProfile};

const BAR_WIDTH: f64 = 30.0;

pub fn staff_dashboard(summary: &StaffDashboardResponse) {
    let name = if summary.greeting_name.is_empty() {
        "there"
    } else {
        summary.greeting_name.as_str()
    };
    println!("👋 Hello, {}!", name);

    let mut counts = table(&["Pending", "Accepted", "Completed"]);
    counts.add_row(vec![
        Cell::new(summary.pending_applications).fg(Color::Yellow),
        Cell::new(summary.accepted_shifts).fg(Color::Green),
        Cell::new(summary.completed_shifts),
    ]);
    println!("{}", counts);

    let days = weekly_hours(summary);
    let max = chart_max(&days);
    let mut chart = table(&["Day", "Hours", ""]);
    for day in &days {
        let bar = "█".repeat((day.hours / max * BAR_WIDTH).round() as usize);
        chart.add_row(vec![
            Cell::new(day.day),
            Cell::new(number(day.hours)),
            Cell::new(bar).fg(Color::Cyan),
        ]);
    }
    if let Some(col) = chart.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("{}", chart);

    if !summary.recent_activity.is_empty() {
        let mut t = table(&["Recent activity", "Hospital", "Department", "Status", "When"]);
        for item in &summary.recent_activity {
            t.add_row(vec![
                Cell::new(&item.title),
                Cell::new(&item.hospital),
                Cell::new(&item.department),
                Cell::new(item.status),
                Cell::new(&item.time),
            ]);
        }
        println!("{}", t);
    }
}

pub fn hospital_dashboard(metrics: &HospitalMetrics) {
    let mut t = table(&["Open shifts", "Pending approvals", "Active staff", "Staffing ratio"]);
    t.add_row(vec![
        Cell::new(metrics.open_shifts).add_attribute(Attribute::Bold),
        Cell::new(metrics.pending_approvals).fg(Color::Yellow),
        Cell::new(metrics.active_staff).fg(Color::Green),
        Cell::new(format!("{}%", metrics.staffing_ratio)),
    ]);
    println!("{}", t);
}

pub fn directory(results: &DirectoryResults) {
    if results.is_empty() {
        println!("{}", results.empty_message());
        return;
    }
    match results {
        DirectoryResults::Hospital(r) => {
            if !r.departments.is_empty() {
                let mut t = table(&["Department", "Id"]);
                for d in &r.departments {
                    t.add_row(vec![Cell::new(&d.name), Cell::new(d.id)]);
                }
                println!("{}", t);
            }
            if !r.staff_profiles.is_empty() {
                let mut t = table(&["Staff", "Id", "Profession", "Rating", "Completed"]);
                for s in &r.staff_profiles {
                    t.add_row(vec![
                        Cell::new(&s.full_name).add_attribute(Attribute::Bold),
                        Cell::new(s.id),
                        Cell::new(opt(s.profession.as_deref())),
                        Cell::new(opt(s.rating_avg)),
                        Cell::new(s.total_completed_shifts),
                    ]);
                }
                println!("{}", t);
            }
        }
        DirectoryResults::Staff(r) => {
            if !r.departments.is_empty() {
                let mut t = table(&["Department", "Hospital"]);
                for d in &r.departments {
                    t.add_row(vec![
                        Cell::new(&d.name),
                        Cell::new(opt(d.hospital_name.as_deref())),
                    ]);
                }
                println!("{}", t);
            }
            if !r.hospitals.is_empty() {
                let mut t = table(&["Hospital", "Id", "Location", "Open shifts"]);
                for h in &r.hospitals {
                    let location: Vec<&str> = [&h.city, &h.state, &h.country]
                        .into_iter()
                        .filter_map(|part| part.as_deref())
                        .filter(|part| !part.is_empty())
                        .collect();
                    t.add_row(vec![
                        Cell::new(&h.name).add_attribute(Attribute::Bold),
                        Cell::new(h.id),
                        Cell::new(location.join(", ")),
                        Cell::new(h.open_shift_count),
                    ]);
                }
                println!("{}", t);
            }
        }
    }
}

/// Prints the strength check. Returns whether a reset would be accepted.
pub fn password(password: &str, confirmation: Option<&str>) -> bool {
    let score = strength(password);
    let level = band(score);
    let color = match level {
        StrengthBand::Weak => Color::Red,
        StrengthBand::Fair => Color::Yellow,
        StrengthBand::Good => Color::Cyan,
        StrengthBand::Strong => Color::Green,
    };
    let mut t = table(&["Strength", "Band"]);
    t.add_row(vec![Cell::new(format!("{}%", score)), Cell::new(level).fg(color)]);
    println!("{}", t);

    match confirmation {
        Some(confirmation) => {
            let ok = can_submit_reset(password, confirmation);
            if ok {
                println!("Password can be reset.");
            } else {
                println!("Reset blocked: needs full strength and a matching confirmation.");
            }
            ok
        }
        None => true,
    }
}

pub fn sessions(rows: &[(Role, Option<u64>, Option<StoredProfile>, bool)]) {
    let mut t = table(&["Role", "Id", "Name", "Profession", "Token"]);
    for (role, id, profile, has_token) in rows {
        t.add_row(vec![
            Cell::new(role).add_attribute(Attribute::Bold),
            Cell::new(opt(*id)),
            Cell::new(opt(profile.as_ref().map(|p| p.full_name.clone()))),
            Cell::new(opt(profile.as_ref().and_then(|p| p.profession.clone()))),
            Cell::new(if *has_token { "yes" } else { "no" }),
        ]);
    }
    println!("{}", t);
}
