pub mod appointment_service;
pub mod contact_service;
pub mod upload_service;
pub mod user_service;
