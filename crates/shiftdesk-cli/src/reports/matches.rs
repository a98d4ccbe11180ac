use super::{opt, table};
use comfy_table::{Attribute, Cell, CellAlignment, Color};
use shiftdesk_core::coordinator::board::CandidateRow;
use shiftdesk_core::coordinator::hospital::HospitalMatchesView;
use shiftdesk_core::coordinator::staff::StaffMatchesView;
use shiftdesk_core::coordinator::{ButtonLabels, ButtonState, APPLY_LABELS, INVITE_LABELS};
use shiftdesk_core::display::{
    ai_banner, ai_score_text, factors_text, match_band, match_text, reason_text, tag_text,
    MatchBand,
};
use shiftdesk_core::session::Role;

fn match_cell(pct: f64) -> Cell {
    let color = match match_band(pct) {
        MatchBand::High => Color::Green,
        MatchBand::Medium => Color::Yellow,
        MatchBand::Low => Color::Red,
    };
    Cell::new(match_text(pct)).fg(color)
}

fn action_cell(state: ButtonState, labels: &ButtonLabels) -> Cell {
    let cell = Cell::new(state.label(labels));
    match state {
        ButtonState::Idle => cell,
        ButtonState::InFlight => cell.fg(Color::Yellow),
        ButtonState::Done => cell.fg(Color::DarkGrey),
    }
}

fn why(role: Role, row: &CandidateRow) -> String {
    let mut lines = vec![reason_text(role, row.ai_reason_short.as_deref())];
    if let Some(score) = row.ai_score {
        lines.push(ai_score_text(score));
    }
    if let Some(factors) = factors_text(&row.ai_reason_details) {
        lines.push(factors);
    }
    let tags: Vec<_> = row.tags.iter().map(|t| tag_text(role, t)).collect();
    if !tags.is_empty() {
        lines.push(tags.join(", "));
    }
    lines.join("\n")
}

pub fn staff(view: &StaffMatchesView, button: impl Fn(u64) -> ButtonState) {
    if let Some(banner) = ai_banner(view.ai_meta.as_ref()) {
        println!("✨ {}", banner);
    }
    if view.rows.is_empty() {
        println!("No recommendations for {}.", view.department);
        return;
    }

    let mut t = table(&["Job", "Title", "Department", "Match", "Rate", "Why", "Action"]);
    for row in &view.rows {
        let rate = match (&row.hourly_rate, &row.currency) {
            (Some(rate), Some(cur)) => format!("{} {}/h", rate, cur),
            (Some(rate), None) => format!("{}/h", rate),
            _ => "-".into(),
        };
        t.add_row(vec![
            Cell::new(row.job_id),
            Cell::new(&row.display_name).add_attribute(Attribute::Bold),
            Cell::new(opt(row.department.as_deref())),
            match_cell(row.match_percent),
            Cell::new(rate),
            Cell::new(why(Role::Staff, row)),
            action_cell(button(row.job_id), &APPLY_LABELS),
        ]);
    }
    if let Some(col) = t.column_mut(3) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("{}", t);

    if view.baseline != view.rows {
        let order: Vec<_> = view.baseline.iter().map(|r| r.job_id.to_string()).collect();
        println!("Baseline order: {}", order.join(", "));
    }
}

pub fn hospital_groups(view: &HospitalMatchesView, button: impl Fn(u64, u64) -> ButtonState) {
    if let Some(banner) = ai_banner(view.ai_meta.as_ref()) {
        println!("✨ {}", banner);
    }
    if view.groups.is_empty() {
        println!("No recommendations for {}.", view.department);
        return;
    }

    for group in &view.groups {
        let anchor = group
            .job_id()
            .map(|id| format!(" (job #{})", id))
            .unwrap_or_default();
        println!("\n🏥 {}{}", group.department, anchor);
        if let Some(placeholder) = group.status().placeholder() {
            println!("   {}", placeholder);
            continue;
        }

        let mut t = table(&["Staff", "Name", "Role", "Rating", "Shifts", "Match", "Why", "Action"]);
        for row in &group.rows {
            t.add_row(vec![
                Cell::new(row.subject_id),
                Cell::new(&row.display_name).add_attribute(Attribute::Bold),
                Cell::new(&row.role_label),
                Cell::new(opt(row.rating)),
                Cell::new(opt(row.completed_shifts)),
                match_cell(row.match_percent),
                Cell::new(why(Role::Hospital, row)),
                action_cell(button(row.job_id, row.subject_id), &INVITE_LABELS),
            ]);
        }
        println!("{}", t);
    }
}
