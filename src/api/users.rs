use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    database::Store,
    middleware::auth::Claims,
    models::{ApiResponse, DoctorProfile, MessageResponse, UpdateUserRequest, UserProfile},
    services::{appointment_service, user_service},
    utils::AppError,
};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PhotoRepairResult {
    pub updated: u64,
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserProfile),
        (status = 401, description = "Missing token or not a patient"),
        (status = 404, description = "No user found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_single_user(store: web::Data<dyn Store>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("👤 GET /users/{}", id);

    match user_service::get_user(store.get_ref(), &id).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::ok("User found", user)),
        Err(AppError::NotFound(_)) => {
            log::warn!("⚠️ User {} not found", id);
            HttpResponse::NotFound().json(MessageResponse::failure("No user found"))
        }
        Err(e) => {
            log::error!("❌ Error fetching user {}: {}", id, e);
            HttpResponse::InternalServerError()
                .json(MessageResponse::failure("Something went wrong, cannot get user"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "Users found", body = [UserProfile]),
        (status = 401, description = "Missing token or not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_all_users(store: web::Data<dyn Store>) -> HttpResponse {
    log::info!("📋 GET /users");

    match user_service::get_all_users(store.get_ref()).await {
        Ok(users) => {
            log::info!("✅ Listed {} users", users.len());
            HttpResponse::Ok().json(ApiResponse::ok("Users found", users))
        }
        Err(e) => {
            log::error!("❌ Error listing users: {}", e);
            HttpResponse::InternalServerError().json(MessageResponse::failure("Not found"))
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Successfully updated", body = UserProfile),
        (status = 404, description = "User not found"),
        (status = 500, description = "Failed to update")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🔧 PUT /users/{}", id);

    match user_service::update_user(store.get_ref(), &id, request.into_inner()).await {
        Ok(user) => {
            log::info!("✅ User {} updated", id);
            HttpResponse::Ok().json(ApiResponse::ok("Successfully updated", user))
        }
        Err(AppError::NotFound(_)) => {
            log::warn!("⚠️ Update for missing user {}", id);
            HttpResponse::NotFound().json(MessageResponse::failure("User not found"))
        }
        Err(e) => {
            log::error!("❌ Error updating user {}: {}", id, e);
            HttpResponse::InternalServerError().json(MessageResponse::failure("Failed to update"))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Successfully deleted (also when the id did not exist)"),
        (status = 500, description = "Failed to delete")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(store: web::Data<dyn Store>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /users/{}", id);

    match user_service::delete_user(store.get_ref(), &id).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::message("Successfully deleted")),
        Err(e) => {
            log::error!("❌ Error deleting user {}: {}", id, e);
            HttpResponse::InternalServerError().json(MessageResponse::failure("Failed to delete"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/profile/me",
    tag = "Users",
    responses(
        (status = 200, description = "Profile info is retrieved", body = UserProfile),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user_profile(
    user: web::ReqData<Claims>,
    store: web::Data<dyn Store>,
) -> HttpResponse {
    let user_id = &user.id;
    log::info!("👤 GET /users/profile/me - user {}", user_id);

    match user_service::get_profile(store.get_ref(), user_id).await {
        Ok(profile) => {
            HttpResponse::Ok().json(ApiResponse::ok("Profile info is retrieved", profile))
        }
        Err(AppError::NotFound(_)) => {
            log::warn!("⚠️ Token for user {} no longer resolves", user_id);
            HttpResponse::NotFound().json(MessageResponse::failure("User not found"))
        }
        Err(e) => {
            log::error!("❌ Error fetching profile {}: {}", user_id, e);
            HttpResponse::InternalServerError()
                .json(MessageResponse::failure("Something went wrong, cannot get profile"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/appointments/my-appointments",
    tag = "Users",
    responses(
        (status = 200, description = "Doctors the caller has booked with", body = [DoctorProfile])
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_my_appointments(
    user: web::ReqData<Claims>,
    store: web::Data<dyn Store>,
) -> HttpResponse {
    let user_id = &user.id;
    log::info!("📅 GET /users/appointments/my-appointments - user {}", user_id);

    match appointment_service::get_my_appointments(store.get_ref(), user_id).await {
        Ok(doctors) => {
            log::info!("✅ {} doctor(s) for user {}", doctors.len(), user_id);
            HttpResponse::Ok().json(ApiResponse::ok("Appointments retrieved", doctors))
        }
        Err(e) => {
            log::error!("❌ Error fetching appointments for {}: {}", user_id, e);
            HttpResponse::InternalServerError()
                .json(MessageResponse::failure("Something went wrong, cannot get appointments"))
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/users/fix/photo-urls",
    tag = "Users",
    responses(
        (status = 200, description = "Number of photos rewritten to https", body = PhotoRepairResult),
        (status = 500, description = "Failed to fix photo URLs.")
    ),
    security(("bearer_auth" = []))
)]
pub async fn fix_insecure_photo_urls(
    user: web::ReqData<Claims>,
    store: web::Data<dyn Store>,
) -> HttpResponse {
    log::info!("🛠️  PUT /users/fix/photo-urls - requested by {}", user.id);

    match user_service::repair_insecure_photo_urls(store.get_ref()).await {
        Ok(updated) => {
            log::info!("✅ {} photo URL(s) secured", updated);
            HttpResponse::Ok().json(ApiResponse::ok(
                format!("{} users updated with secure photo URLs.", updated),
                PhotoRepairResult { updated },
            ))
        }
        Err(e) => {
            log::error!("❌ Photo URL sweep aborted: {}", e);
            HttpResponse::InternalServerError()
                .json(MessageResponse::failure("Failed to fix photo URLs."))
        }
    }
}
