use mongodb::bson::oid::ObjectId;
use std::collections::HashSet;

use crate::{database::Store, models::DoctorProfile, utils::AppError};

/// Doctors the caller has booked with.
///
/// bookings(user) -> doctor ids (deduplicated, first seen first) -> doctors.
/// The result follows the store's order for the doctor lookup.
pub async fn get_my_appointments(
    store: &dyn Store,
    user_id: &str,
) -> Result<Vec<DoctorProfile>, AppError> {
    let bookings = store.find_bookings_by_user(user_id).await?;

    let mut seen = HashSet::new();
    let doctor_ids: Vec<ObjectId> = bookings
        .iter()
        .map(|booking| booking.doctor)
        .filter(|id| seen.insert(*id))
        .collect();

    log::debug!(
        "📅 {} booking(s), {} distinct doctor(s) for user {}",
        bookings.len(),
        doctor_ids.len(),
        user_id
    );

    let doctors = store.find_doctors_by_ids(&doctor_ids).await?;

    Ok(doctors.into_iter().map(DoctorProfile::from).collect())
}
