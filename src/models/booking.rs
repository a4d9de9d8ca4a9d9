use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Approved,
    Cancelled,
}

fn default_true() -> bool {
    true
}

/// Documento da collection "bookings"
///
/// Created by the checkout workflow; this service only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub doctor: ObjectId,
    pub user: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ticket_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub appointment_date: Option<DateTime>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default = "default_true")]
    pub is_paid: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime>,
}

#[cfg(test)]
impl Booking {
    pub fn new(user: ObjectId, doctor: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            doctor,
            user,
            ticket_price: None,
            appointment_date: None,
            status: BookingStatus::Pending,
            is_paid: true,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}
