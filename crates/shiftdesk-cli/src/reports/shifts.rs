use super::{opt, table};
use comfy_table::{Attribute, Cell, Color};
use shiftdesk_core::coordinator::hospital::ShiftManagerView;
use shiftdesk_core::coordinator::staff::ScheduleView;
use shiftdesk_core::display::initials;
use shiftdesk_core::protocol::status::ApplicationStatus;

fn status_cell(status: ApplicationStatus) -> Cell {
    let color = match status {
        ApplicationStatus::Accepted => Color::Green,
        ApplicationStatus::Shortlisted => Color::Cyan,
        ApplicationStatus::Rejected | ApplicationStatus::Withdrawn => Color::DarkGrey,
        _ => Color::Yellow,
    };
    Cell::new(status).fg(color)
}

pub fn schedule(view: &ScheduleView) {
    if view.groups.is_empty() {
        println!("Your schedule is empty.");
        return;
    }

    let current = view.current_group().map(|g| g.id);
    let mut hospitals = table(&["", "Hospital", "Active", "Last activity"]);
    for group in &view.groups {
        let marker = if Some(group.id) == current { "▶" } else { "" };
        hospitals.add_row(vec![
            Cell::new(marker),
            Cell::new(&group.title).add_attribute(Attribute::Bold),
            Cell::new(group.total_active),
            Cell::new(opt(group.last_activity.as_deref())),
        ]);
    }
    println!("{}", hospitals);

    let Some(group) = view.current_group() else {
        return;
    };

    println!("\n📅 Confirmed shifts at {}", group.title);
    if group.confirmed_shifts.is_empty() {
        println!("   None yet.");
    } else {
        let mut t = table(&["Assignment", "Shift", "Role", "Date", "Time", "Pay", "Status"]);
        for shift in &group.confirmed_shifts {
            let pay = match (&shift.pay, &shift.currency) {
                (Some(p), Some(c)) => format!("{} {}", p, c),
                (Some(p), None) => p.clone(),
                _ => "-".into(),
            };
            t.add_row(vec![
                Cell::new(shift.assignment_id),
                Cell::new(&shift.name),
                Cell::new(&shift.role),
                Cell::new(&shift.date),
                Cell::new(&shift.time),
                Cell::new(pay),
                Cell::new(&shift.status).fg(Color::Green),
            ]);
        }
        println!("{}", t);
    }

    println!("\n⏳ Pending applications at {}", group.title);
    if group.pending_applications.is_empty() {
        println!("   None.");
        return;
    }
    let mut t = table(&["Application", "Job", "Shift", "Rating", "Pay", "Status", "Actions"]);
    for app in &group.pending_applications {
        let actions = if app.status.is_invitation() {
            "approve, withdraw"
        } else {
            "withdraw"
        };
        t.add_row(vec![
            Cell::new(app.application_id),
            Cell::new(app.job_id),
            Cell::new(&app.name),
            Cell::new(opt(app.rating)),
            Cell::new(opt(app.pay.as_deref())),
            status_cell(app.status),
            Cell::new(actions),
        ]);
    }
    println!("{}", t);
}

pub fn shift_board(view: &ShiftManagerView) {
    if view.cards.is_empty() {
        println!("No shifts posted yet.");
        return;
    }

    let current = view.current().map(|c| c.id);
    let mut cards = table(&["", "Job", "Shift", "Time", "Status", "Staffed", "Applicants"]);
    for card in &view.cards {
        let marker = if Some(card.id) == current { "▶" } else { "" };
        cards.add_row(vec![
            Cell::new(marker),
            Cell::new(card.id),
            Cell::new(&card.title).add_attribute(Attribute::Bold),
            Cell::new(&card.time),
            Cell::new(&card.status),
            Cell::new(format!("{}/{}", card.assigned_count, card.capacity)),
            Cell::new(card.applicant_count),
        ]);
    }
    println!("{}", cards);

    let assigned = view.assigned_rows();
    println!("\n👥 Assigned staff");
    if assigned.is_empty() {
        println!("   Nobody assigned yet.");
    } else {
        let mut t = table(&["", "Staff", "Name", "Role", "Status"]);
        for row in &assigned {
            t.add_row(vec![
                Cell::new(initials(&row.name)),
                Cell::new(opt(row.staff_id)),
                Cell::new(&row.name),
                Cell::new(&row.role),
                Cell::new(&row.status),
            ]);
        }
        println!("{}", t);
    }

    let applicants = view.applicant_rows();
    println!("\n📨 Applicants");
    if applicants.is_empty() {
        println!("   No applicants yet.");
    } else {
        let mut t = table(&["Application", "Staff", "Name", "Rating", "Shifts", "Status"]);
        for row in &applicants {
            t.add_row(vec![
                Cell::new(row.application_id),
                Cell::new(opt(row.staff_id)),
                Cell::new(&row.name),
                Cell::new(opt(row.rating)),
                Cell::new(row.shifts),
                status_cell(row.status),
            ]);
        }
        println!("{}", t);
    }

    if let Some(saga) = &view.last_accept {
        if !saga.stage().is_terminal() || saga.failure().is_some() {
            println!(
                "\n⚠️  Last accept of application {} stopped at {}: {}",
                saga.application_id,
                saga.stage(),
                saga.failure().unwrap_or("unknown error")
            );
        }
    }
}
