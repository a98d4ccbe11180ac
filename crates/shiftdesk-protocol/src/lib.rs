//! Wire types shared between the ShiftDesk client and the shift-management REST API.
//!
//! Every struct here mirrors a JSON body exactly as the API sends or expects it.
//! Optional and list fields default when absent so that partial payloads still decode.

pub mod auth;
pub mod directory;
pub mod error;
pub mod recommend;
pub mod schedule;
pub mod shifts;
pub mod status;

pub type JobId = u64;
pub type StaffId = u64;
pub type HospitalId = u64;
pub type ApplicationId = u64;
/// Account ids are UUID strings, unrelated to the numeric staff and hospital ids.
pub type UserId = String;
