use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    database::Store,
    models::{ContactRequest, MessageResponse},
    services::contact_service,
};

#[utoipa::path(
    post,
    path = "/api/v1/contact",
    tag = "Contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Form submitted successfully!"),
        (status = 400, description = "Missing field or invalid email")
    )
)]
pub async fn submit_contact(
    store: web::Data<dyn Store>,
    request: web::Json<ContactRequest>,
) -> HttpResponse {
    log::info!("✉️  POST /contact");

    match contact_service::submit_contact(store.get_ref(), request.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::message("Form submitted successfully!")),
        Err(e) => {
            log::warn!("⚠️ Contact form rejected: {}", e);
            e.error_response()
        }
    }
}
