use crate::api::ShiftApi;
use crate::notify::Notifier;
use crate::session::Session;
use shiftdesk_protocol::schedule::StaffDashboardResponse;
use shiftdesk_protocol::shifts::ShiftSummary;
use tracing::debug;

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Headline numbers on the hospital dashboard, derived from the shift summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HospitalMetrics {
    pub open_shifts: usize,
    pub pending_approvals: u64,
    pub active_staff: u64,
    /// Assigned over capacity, as a rounded percentage. Not capped at 100.
    pub staffing_ratio: u64,
}

impl HospitalMetrics {
    pub fn from_rows(rows: &[ShiftSummary]) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let assigned: u64 = rows.iter().map(|r| u64::from(r.assigned_count)).sum();
        let capacity: u64 = rows.iter().map(|r| u64::from(r.capacity)).sum();
        Self {
            open_shifts: rows.iter().filter(|r| r.status == "OPEN").count(),
            pending_approvals: rows.iter().map(|r| u64::from(r.applicant_count)).sum(),
            active_staff: assigned,
            staffing_ratio: (assigned as f64 / capacity.max(1) as f64 * 100.0).round() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayHours {
    pub day: &'static str,
    pub hours: f64,
}

/// Mon..Sun, zero-filled.
pub fn weekly_hours(summary: &StaffDashboardResponse) -> Vec<DayHours> {
    WEEKDAYS
        .iter()
        .map(|&day| DayHours {
            day,
            hours: summary
                .weekly_performance_hours
                .get(day)
                .copied()
                .unwrap_or(0.0),
        })
        .collect()
}

/// Bar chart scale; never below 1 so an empty week still renders.
pub fn chart_max(days: &[DayHours]) -> f64 {
    days.iter().map(|d| d.hours).fold(1.0, f64::max)
}

/// Fetches the staff dashboard. Failures are notified and yield `None`.
pub async fn load_staff_dashboard(
    api: &dyn ShiftApi,
    session: &Session,
    notifier: &dyn Notifier,
) -> Option<StaffDashboardResponse> {
    let Some(staff_id) = session.id() else {
        notifier.error("Please login as staff first.");
        return None;
    };
    match api.staff_dashboard(staff_id).await {
        Ok(summary) => {
            debug!("📊 Dashboard for staff {} loaded", staff_id);
            Some(summary)
        }
        Err(e) => {
            notifier.error(&e.message_or("Unable to load dashboard."));
            None
        }
    }
}

/// Fetches the shift summary rows behind the hospital dashboard.
pub async fn load_hospital_dashboard(
    api: &dyn ShiftApi,
    session: &Session,
    notifier: &dyn Notifier,
) -> Option<Vec<ShiftSummary>> {
    let Some(hospital_id) = session.id() else {
        notifier.error("Please login as hospital first.");
        return None;
    };
    match api.shift_summary(hospital_id).await {
        Ok(resp) => Some(resp.results),
        Err(e) => {
            notifier.error(&e.message_or("Unable to load dashboard data."));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(status: &str, capacity: u32, assigned: u32, applicants: u32) -> ShiftSummary {
        serde_json::from_value(json!({
            "id": 1, "title": "ICU", "status": status, "capacity": capacity,
            "assigned_count": assigned, "applicant_count": applicants
        }))
        .unwrap()
    }

    #[test]
    fn test_metrics_sum_over_rows() {
        let rows = [row("OPEN", 4, 1, 3), row("FILLED", 2, 2, 0), row("OPEN", 3, 0, 5)];
        let m = HospitalMetrics::from_rows(&rows);
        assert_eq!(m.open_shifts, 2);
        assert_eq!(m.pending_approvals, 8);
        assert_eq!(m.active_staff, 3);
        assert_eq!(m.staffing_ratio, 33);
    }

    #[test]
    fn test_no_rows_is_all_zero() {
        assert_eq!(HospitalMetrics::from_rows(&[]), HospitalMetrics::default());
    }

    #[test]
    fn test_weekly_hours_zero_fills_and_orders() {
        let summary: StaffDashboardResponse = serde_json::from_value(json!({
            "weekly_performance_hours": {"Wed": 8.0, "Mon": 4.5}
        }))
        .unwrap();
        let days = weekly_hours(&summary);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], DayHours { day: "Mon", hours: 4.5 });
        assert_eq!(days[1].hours, 0.0);
        assert_eq!(chart_max(&days), 8.0);
        assert_eq!(chart_max(&weekly_hours(&StaffDashboardResponse::default())), 1.0);
    }
}
