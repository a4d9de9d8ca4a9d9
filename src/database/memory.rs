use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

use super::Store;
use crate::models::{Booking, ContactMessage, Doctor, Role, UpdateUserRequest, User};
use crate::utils::AppError;

/// Store kept in process memory, used by the service and route tests.
///
/// Records are returned exactly as stored (password included) so the
/// tests exercise the response types rather than the read projection.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<User>>,
    bookings: Mutex<Vec<Booking>>,
    doctors: Mutex<Vec<Doctor>>,
    contacts: Mutex<Vec<ContactMessage>>,
    failing_photo_write: Mutex<Option<ObjectId>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn add_doctor(&self, doctor: Doctor) {
        self.doctors.lock().unwrap().push(doctor);
    }

    pub fn add_booking(&self, booking: Booking) {
        self.bookings.lock().unwrap().push(booking);
    }

    /// Raw stored record, for assertions
    pub fn stored_user(&self, id: &ObjectId) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == *id).cloned()
    }

    pub fn contacts(&self) -> Vec<ContactMessage> {
        self.contacts.lock().unwrap().clone()
    }

    /// Makes the next photo write for this user fail with a storage error
    pub fn fail_photo_write_for(&self, id: ObjectId) {
        *self.failing_photo_write.lock().unwrap() = Some(id);
    }
}

pub fn sample_user(email: &str, photo: Option<&str>) -> User {
    User {
        id: ObjectId::new(),
        email: email.to_string(),
        password: Some("$2b$12$storedhashstoredhashstoredhash".to_string()),
        name: Some(email.split('@').next().unwrap_or_default().to_string()),
        phone: Some("5551234".to_string()),
        photo: photo.map(str::to_string),
        role: Role::Patient,
        gender: None,
        blood_type: Some("O+".to_string()),
        appointments: vec![],
    }
}

pub fn sample_doctor(name: &str) -> Doctor {
    Doctor {
        id: ObjectId::new(),
        email: format!("{}@clinic.test", name.to_lowercase()),
        password: Some("$2b$12$doctorhashdoctorhashdoctorhash".to_string()),
        name: Some(name.to_string()),
        phone: None,
        photo: None,
        ticket_price: Some(100.0),
        role: Role::Doctor,
        specialization: Some("Cardiology".to_string()),
        qualifications: vec![],
        experiences: vec![],
        bio: None,
        about: None,
        time_slots: vec![],
        reviews: vec![],
        average_rating: 0.0,
        total_rating: 0.0,
        is_approved: Default::default(),
        appointments: vec![],
    }
}

fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

#[async_trait]
impl Store for InMemoryStore {
    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.stored_user(&oid))
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn update_user(
        &self,
        id: &str,
        changes: &UpdateUserRequest,
    ) -> Result<Option<User>, AppError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == oid).map(|user| {
            changes.apply_to(user);
            user.clone()
        }))
    }

    async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        if let Some(oid) = parse_id(id) {
            self.users.lock().unwrap().retain(|u| u.id != oid);
        }
        Ok(())
    }

    async fn set_user_photo(&self, id: &ObjectId, photo: &str) -> Result<(), AppError> {
        if *self.failing_photo_write.lock().unwrap() == Some(*id) {
            return Err(AppError::StorageError(format!("write to {} refused", id)));
        }

        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == *id) {
            user.photo = Some(photo.to_string());
        }
        Ok(())
    }

    async fn find_bookings_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        let Some(oid) = parse_id(user_id) else {
            return Ok(vec![]);
        };

        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user == oid)
            .cloned()
            .collect())
    }

    async fn find_doctors_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Doctor>, AppError> {
        Ok(self
            .doctors
            .lock()
            .unwrap()
            .iter()
            .filter(|d| ids.contains(&d.id))
            .cloned()
            .collect())
    }

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<(), AppError> {
        let mut stored = message.clone();
        stored.id.get_or_insert_with(ObjectId::new);
        self.contacts.lock().unwrap().push(stored);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
