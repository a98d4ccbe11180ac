use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum StrengthBand {
    Weak,
    Fair,
    Good,
    Strong,
}

/// 0..=100 in steps of 25: one step each for length >= 8, an ASCII capital,
/// an ASCII digit, and anything outside `[A-Za-z0-9]`.
pub fn strength(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.iter().filter(|&&ok| ok).count() as u8 * 25
}

pub fn band(strength: u8) -> StrengthBand {
    match strength {
        0..=25 => StrengthBand::Weak,
        26..=50 => StrengthBand::Fair,
        51..=75 => StrengthBand::Good,
        _ => StrengthBand::Strong,
    }
}

/// A reset goes through only with full strength and a matching confirmation.
pub fn can_submit_reset(password: &str, confirmation: &str) -> bool {
    !password.is_empty() && password == confirmation && strength(password) == 100
}
