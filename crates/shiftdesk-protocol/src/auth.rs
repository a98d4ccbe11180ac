use crate::{HospitalId, StaffId};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StaffRegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub profession: String,
    /// Zero-based weekday indexes, Monday first.
    pub availability_days: Vec<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StaffRegisterResponse {
    pub staff_id: StaffId,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub availability_days: Vec<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StaffLoginResponse {
    pub staff_id: StaffId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HospitalRegisterRequest {
    pub hospital_name: String,
    pub registration_number: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HospitalRegisterResponse {
    pub hospital_id: HospitalId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub hospital_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HospitalLoginResponse {
    pub hospital_id: HospitalId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub hospital_name: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}
