use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DirectoryDepartment {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub hospital_id: Option<u64>,
    #[serde(default, rename = "hospital__name")]
    pub hospital_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DirectoryStaff {
    pub id: u64,
    pub full_name: String,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub rating_avg: Option<f64>,
    #[serde(default)]
    pub total_completed_shifts: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DirectoryHospital {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub open_shift_count: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HospitalDirectoryCounts {
    #[serde(default)]
    pub departments: u32,
    #[serde(default)]
    pub staff_profiles: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StaffDirectoryCounts {
    #[serde(default)]
    pub departments: u32,
    #[serde(default)]
    pub hospitals: u32,
}

/// Hospital-side search across its own departments and the staff pool.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct HospitalDirectoryResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub counts: HospitalDirectoryCounts,
    #[serde(default)]
    pub departments: Vec<DirectoryDepartment>,
    #[serde(default)]
    pub staff_profiles: Vec<DirectoryStaff>,
}

/// Staff-side search across departments and hospitals.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StaffDirectoryResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub counts: StaffDirectoryCounts,
    #[serde(default)]
    pub departments: Vec<DirectoryDepartment>,
    #[serde(default)]
    pub hospitals: Vec<DirectoryHospital>,
}
