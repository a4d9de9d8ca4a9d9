use mongodb::bson::DateTime;

use crate::{
    database::Store,
    models::{ContactMessage, ContactRequest},
    utils::AppError,
};

pub async fn submit_contact(store: &dyn Store, request: ContactRequest) -> Result<(), AppError> {
    let email = request.email.trim();
    let subject = request.subject.trim();
    let message = request.message.trim();

    if email.is_empty() || subject.is_empty() || message.is_empty() {
        return Err(AppError::InvalidRequest("Please fill in all fields!".to_string()));
    }

    if !email.contains('@') {
        return Err(AppError::InvalidRequest("Please provide a valid email address".to_string()));
    }

    let contact = ContactMessage {
        id: None,
        email: email.to_string(),
        subject: subject.to_string(),
        message: message.to_string(),
        created_at: DateTime::now(),
    };

    store.insert_contact_message(&contact).await
}
