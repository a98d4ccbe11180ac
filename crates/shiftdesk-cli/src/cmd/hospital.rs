use super::Context;
use crate::reports;
use clap::{Args, Subcommand};
use shiftdesk_core::auth::{AuthFlow, HospitalSignup};
use shiftdesk_core::coordinator::{HospitalMatches, ShiftManager, INVITE_LABELS};
use shiftdesk_core::dashboard::{load_hospital_dashboard, HospitalMetrics};
use shiftdesk_core::directory::DirectorySearch;
use shiftdesk_core::forms::{ShiftPosting, ShiftPoster};
use shiftdesk_core::session::{Role, Session};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct HospitalArgs {
    #[command(subcommand)]
    pub command: HospitalCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum HospitalCommand {
    /// Register a hospital. Log in afterwards.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        registration_number: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Dashboard,
    /// Top staff per department, or for one open job
    Matches {
        #[arg(long, conflicts_with = "job")]
        department: Option<String>,
        #[arg(long)]
        job: Option<u64>,
    },
    /// Quick Invite a recommended staff member to a job
    Invite {
        #[arg(long)]
        job: u64,
        #[arg(long)]
        staff: u64,
    },
    /// Shift cards with assigned staff and applicants
    Shifts {
        #[arg(long)]
        job: Option<u64>,
    },
    /// Accept an applicant and assign them to the shift
    Accept {
        #[arg(long)]
        application: u64,
        #[arg(long)]
        job: Option<u64>,
    },
    Decline {
        #[arg(long)]
        application: u64,
        #[arg(long)]
        job: Option<u64>,
    },
    /// Post a new shift
    Post(PostArgs),
    /// Search departments and staff profiles
    Search { query: String },
}

#[derive(Args, Debug, Clone)]
pub struct PostArgs {
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    #[arg(long, default_value = "08:00")]
    pub start: String,
    #[arg(long, default_value = "16:00")]
    pub end: String,
    #[arg(long, default_value_t = 2)]
    pub count: u32,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Defaults to the first department on offer
    #[arg(long)]
    pub department: Option<u64>,
    /// Defaults to the first profession on offer
    #[arg(long)]
    pub profession: Option<u64>,
}

pub async fn run(args: HospitalArgs, ctx: &Context) -> bool {
    let session = ctx.session(Role::Hospital);

    match args.command {
        HospitalCommand::Register {
            name,
            registration_number,
            email,
            phone,
            location,
            password,
            confirm_password,
        } => {
            let form = HospitalSignup {
                hospital_name: name,
                registration_number,
                email,
                phone,
                location,
                password,
                confirm_password,
            };
            AuthFlow::new(ctx.api.clone(), ctx.notifier.clone())
                .hospital_register(&form)
                .await
                .is_some()
        }
        HospitalCommand::Login { email, password } => {
            AuthFlow::new(ctx.api.clone(), ctx.notifier.clone())
                .hospital_login(&session, &email, &password)
                .await
                .is_some()
        }
        HospitalCommand::Logout => match session.logout() {
            Ok(()) => {
                ctx.notifier.success("Logged out.");
                true
            }
            Err(e) => {
                ctx.notifier.error(&e.to_string());
                false
            }
        },
        HospitalCommand::Dashboard => {
            match load_hospital_dashboard(ctx.api.as_ref(), &session, ctx.notifier.as_ref()).await {
                Some(rows) => {
                    reports::print_hospital_dashboard(&HospitalMetrics::from_rows(&rows));
                    true
                }
                None => false,
            }
        }
        HospitalCommand::Matches { department, job } => {
            let matches = recommendations(ctx, session);
            let ok = match (department, job) {
                (_, Some(job)) => matches.load_for_job(job).await,
                (Some(department), None) => matches.set_department(&department).await,
                (None, None) => matches.mount().await,
            };
            if ok {
                reports::print_hospital_matches(&matches.view(), |job, staff| {
                    matches.button(job, staff)
                });
            }
            ok
        }
        HospitalCommand::Invite { job, staff } => {
            let matches = recommendations(ctx, session);
            let ok = matches.invite(job, staff).await;
            info!(
                "Job {} / staff {}: {}",
                job,
                staff,
                matches.button(job, staff).label(&INVITE_LABELS)
            );
            ok
        }
        HospitalCommand::Shifts { job } => {
            let Some(manager) = open_shift(ctx, session, job).await else {
                return false;
            };
            reports::print_shift_board(&manager.view());
            true
        }
        HospitalCommand::Accept { application, job } => {
            let Some(manager) = open_shift(ctx, session, job).await else {
                return false;
            };
            let ok = manager.accept(application).await;
            reports::print_shift_board(&manager.view());
            ok
        }
        HospitalCommand::Decline { application, job } => {
            let Some(manager) = open_shift(ctx, session, job).await else {
                return false;
            };
            let ok = manager.decline(application).await;
            reports::print_shift_board(&manager.view());
            ok
        }
        HospitalCommand::Post(post) => {
            let poster = ShiftPoster::new(ctx.api.clone(), session, ctx.notifier.clone());
            let mut form = ShiftPosting::builder()
                .required_staff_count(post.count)
                .date(post.date)
                .start_time(post.start)
                .end_time(post.end)
                .description(post.description)
                .build();
            form.department_id = post.department;
            form.profession_id = post.profession;

            if poster.load_options(&mut form).await.is_none() {
                return false;
            }
            if !form.can_submit() {
                ctx.notifier
                    .error("Department, profession, date and times are all required.");
                return false;
            }
            poster.submit(&mut form).await.is_some()
        }
        HospitalCommand::Search { query } => {
            let search =
                DirectorySearch::new(ctx.api.clone(), session, ctx.notifier.clone(), ctx.debounce());
            let ok = search.search(&query).await;
            if let Some(results) = search.results() {
                reports::print_directory(&results);
            }
            ok
        }
    }
}

fn recommendations(ctx: &Context, session: Session) -> HospitalMatches {
    HospitalMatches::new(ctx.api.clone(), session, ctx.notifier.clone(), &ctx.config)
}

/// Loads the shift board and focuses `job` when given.
async fn open_shift(ctx: &Context, session: Session, job: Option<u64>) -> Option<ShiftManager> {
    let manager = ShiftManager::new(ctx.api.clone(), session, ctx.notifier.clone(), &ctx.config);
    if !manager.load().await {
        return None;
    }
    if let Some(job) = job {
        if !manager.select(job).await {
            return None;
        }
    }
    Some(manager)
}
