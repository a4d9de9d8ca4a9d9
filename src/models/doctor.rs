use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::user::{deserialize_phone, Role};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Cancelled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Qualification {
    pub starting_date: Option<String>,
    pub ending_date: Option<String>,
    pub degree: Option<String>,
    pub university: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub starting_date: Option<String>,
    pub ending_date: Option<String>,
    pub position: Option<String>,
    pub hospital: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeSlot {
    pub day: Option<String>,
    pub starting_time: Option<String>,
    pub ending_time: Option<String>,
}

fn default_doctor_role() -> Role {
    Role::Doctor
}

/// Documento da collection "doctors" (read-only neste serviço)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "deserialize_phone"
    )]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ticket_price: Option<f64>,
    #[serde(default = "default_doctor_role")]
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub qualifications: Vec<Qualification>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub about: Option<String>,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub reviews: Vec<ObjectId>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub total_rating: f64,
    #[serde(default)]
    pub is_approved: ApprovalStatus,
    #[serde(default)]
    pub appointments: Vec<ObjectId>,
}

/// Doctor as returned to clients (never carries the password)
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub ticket_price: Option<f64>,
    pub role: Role,
    pub specialization: Option<String>,
    pub qualifications: Vec<Qualification>,
    pub experiences: Vec<Experience>,
    pub bio: Option<String>,
    pub about: Option<String>,
    pub time_slots: Vec<TimeSlot>,
    pub reviews: Vec<String>,
    pub average_rating: f64,
    pub total_rating: f64,
    pub is_approved: ApprovalStatus,
    pub appointments: Vec<String>,
}

impl From<Doctor> for DoctorProfile {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id.to_hex(),
            email: doctor.email,
            name: doctor.name,
            phone: doctor.phone,
            photo: doctor.photo,
            ticket_price: doctor.ticket_price,
            role: doctor.role,
            specialization: doctor.specialization,
            qualifications: doctor.qualifications,
            experiences: doctor.experiences,
            bio: doctor.bio,
            about: doctor.about,
            time_slots: doctor.time_slots,
            reviews: doctor.reviews.iter().map(|id| id.to_hex()).collect(),
            average_rating: doctor.average_rating,
            total_rating: doctor.total_rating,
            is_approved: doctor.is_approved,
            appointments: doctor.appointments.iter().map(|id| id.to_hex()).collect(),
        }
    }
}
