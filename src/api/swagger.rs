use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Doctor Booking Service API",
        version = "1.0.0",
        description = "Backend for the doctor appointment booking app. \n\n**Authentication:** user endpoints require a JWT Bearer token issued by the auth service.\n\n**Features:**\n- User records (read, update, delete, profile)\n- Doctors the caller has booked with\n- Photo URL repair sweep (admin)\n- Image uploads to the media host\n- Contact form\n- Health monitoring",
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Users
        crate::api::users::get_single_user,
        crate::api::users::get_all_users,
        crate::api::users::update_user,
        crate::api::users::delete_user,
        crate::api::users::get_user_profile,
        crate::api::users::get_my_appointments,
        crate::api::users::fix_insecure_photo_urls,

        // Uploads
        crate::api::uploads::upload_image,

        // Contact
        crate::api::contact::submit_contact,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::users::PhotoRepairResult,
            crate::models::UserProfile,
            crate::models::UpdateUserRequest,
            crate::models::DoctorProfile,
            crate::models::ContactRequest,
            crate::services::upload_service::UploadedImage,
        )
    ),
    tags(
        (name = "Health", description = "Service and database status."),
        (name = "Users", description = "User records. Patients read and edit records, admins list users and run the photo URL sweep."),
        (name = "Uploads", description = "Image uploads forwarded to the media host. Any authenticated role."),
        (name = "Contact", description = "Public contact form."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token issued by the auth service"))
                        .build(),
                ),
            );
        }
    }
}
