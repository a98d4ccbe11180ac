use super::{parse_weekday, Context};
use crate::reports;
use clap::{Args, Subcommand};
use shiftdesk_core::api::ALL_DEPARTMENTS;
use shiftdesk_core::auth::{AuthFlow, StaffSignup};
use shiftdesk_core::coordinator::{StaffMatches, StaffSchedule, APPLY_LABELS};
use shiftdesk_core::dashboard::load_staff_dashboard;
use shiftdesk_core::directory::DirectorySearch;
use shiftdesk_core::session::{Role, Session};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct StaffArgs {
    #[command(subcommand)]
    pub command: StaffCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum StaffCommand {
    /// Create a staff account and log it in locally
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        profession: String,
        /// Available weekday (name or 0-6, Monday first). Repeatable.
        #[arg(long = "day", value_parser = parse_weekday)]
        days: Vec<u8>,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Ranked job recommendations
    Matches {
        #[arg(long, default_value = ALL_DEPARTMENTS)]
        department: String,
    },
    /// Quick Apply to a job
    Apply {
        #[arg(long)]
        job: u64,
    },
    /// Confirmed shifts and pending applications, grouped by hospital
    Schedule {
        #[arg(long)]
        hospital: Option<u64>,
    },
    Withdraw {
        #[arg(long)]
        application: u64,
    },
    /// Approve a hospital invitation
    Approve {
        #[arg(long)]
        application: u64,
    },
    Dashboard,
    /// Search departments and hospitals
    Search { query: String },
}

pub async fn run(args: StaffArgs, ctx: &Context) -> bool {
    let session = ctx.session(Role::Staff);

    match args.command {
        StaffCommand::Register {
            name,
            email,
            password,
            profession,
            days,
        } => {
            let mut form = StaffSignup {
                full_name: name,
                email,
                password,
                profession,
                availability_days: Vec::new(),
            };
            for day in days {
                form.toggle_day(day);
            }
            AuthFlow::new(ctx.api.clone(), ctx.notifier.clone())
                .staff_register(&session, &form)
                .await
                .is_some()
        }
        StaffCommand::Login { email, password } => AuthFlow::new(ctx.api.clone(), ctx.notifier.clone())
            .staff_login(&session, &email, &password)
            .await
            .is_some(),
        StaffCommand::Logout => match session.logout() {
            Ok(()) => {
                ctx.notifier.success("Logged out.");
                true
            }
            Err(e) => {
                ctx.notifier.error(&e.to_string());
                false
            }
        },
        StaffCommand::Matches { department } => {
            let matches = StaffMatches::new(
                ctx.api.clone(),
                session.clone(),
                ctx.notifier.clone(),
                &ctx.config,
            );
            let ok = matches.set_department(&department).await;
            if ok {
                reports::print_staff_matches(&matches.view(), |job| matches.button(job));
            }
            ok
        }
        StaffCommand::Apply { job } => {
            let matches = StaffMatches::new(
                ctx.api.clone(),
                session.clone(),
                ctx.notifier.clone(),
                &ctx.config,
            );
            let ok = matches.apply(job).await;
            info!("Job {}: {}", job, matches.button(job).label(&APPLY_LABELS));
            ok
        }
        StaffCommand::Schedule { hospital } => {
            let schedule = StaffSchedule::new(
                ctx.api.clone(),
                session.clone(),
                ctx.notifier.clone(),
                &ctx.config,
            );
            if let Some(id) = hospital {
                schedule.select(id);
            }
            let ok = schedule.load().await;
            if ok {
                reports::print_schedule(&schedule.view());
            }
            ok
        }
        StaffCommand::Withdraw { application } => {
            schedule_action(ctx, session, application, false).await
        }
        StaffCommand::Approve { application } => {
            schedule_action(ctx, session, application, true).await
        }
        StaffCommand::Dashboard => {
            match load_staff_dashboard(ctx.api.as_ref(), &session, ctx.notifier.as_ref()).await {
                Some(summary) => {
                    reports::print_staff_dashboard(&summary);
                    true
                }
                None => false,
            }
        }
        StaffCommand::Search { query } => {
            let search = DirectorySearch::new(
                ctx.api.clone(),
                session.clone(),
                ctx.notifier.clone(),
                ctx.debounce(),
            );
            let ok = search.search(&query).await;
            if let Some(results) = search.results() {
                reports::print_directory(&results);
            }
            ok
        }
    }
}

/// Withdraw and approve act on rows of the loaded schedule, so it is loaded first.
async fn schedule_action(ctx: &Context, session: Session, application: u64, approve: bool) -> bool {
    let schedule = StaffSchedule::new(ctx.api.clone(), session, ctx.notifier.clone(), &ctx.config);
    if !schedule.load().await {
        return false;
    }
    let ok = if approve {
        schedule.approve(application).await
    } else {
        schedule.withdraw(application).await
    };
    if ok {
        reports::print_schedule(&schedule.view());
    }
    ok
}
