mod matches;
mod overview;
mod shifts;

pub use self::matches::{hospital_groups as print_hospital_matches, staff as print_staff_matches};
pub use self::overview::{
    directory as print_directory, hospital_dashboard as print_hospital_dashboard,
    password as print_password_check, sessions as print_sessions,
    staff_dashboard as print_staff_dashboard,
};
pub use self::shifts::{schedule as print_schedule, shift_board as print_shift_board};

use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}
