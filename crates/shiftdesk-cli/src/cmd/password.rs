use crate::reports;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct PasswordArgs {
    pub password: String,

    /// Also check a reset: requires full strength and this to match
    #[arg(long)]
    pub confirm: Option<String>,
}

pub fn run(args: PasswordArgs) -> bool {
    reports::print_password_check(&args.password, args.confirm.as_deref())
}
