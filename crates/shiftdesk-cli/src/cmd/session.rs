use super::Context;
use crate::reports;
use clap::{Args, Subcommand};
use shiftdesk_core::session::Role;

#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// Show who is logged in for each role
    Show,
}

pub fn run(args: SessionArgs, ctx: &Context) -> bool {
    match args.command {
        SessionCommand::Show => {
            let rows: Vec<_> = [Role::Staff, Role::Hospital]
                .into_iter()
                .map(|role| {
                    let session = ctx.session(role);
                    (
                        role,
                        session.id(),
                        session.profile(),
                        session.access_token().is_some(),
                    )
                })
                .collect();
            println!("📂 {}", ctx.config.session_file.display());
            reports::print_sessions(&rows);
            true
        }
    }
}
