pub mod contact;
pub mod health;
pub mod swagger;
pub mod uploads;
pub mod users;

use actix_web::web;

use crate::{
    middleware::{AuthMiddleware, RequireRole},
    utils::AppError,
};

/// Maior corpo aceito no upload de imagem
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Registra todas as rotas HTTP do serviço
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(format!("Invalid request body: {}", err)).into()
    }))
    .route("/health", web::get().to(health::health_check))
    .route("/api/v1/contact", web::post().to(contact::submit_contact))
    // Users: specific paths before /{id}
    .service(
        web::scope("/api/v1/users")
            .wrap(AuthMiddleware)
            .service(
                web::resource(["", "/"])
                    .wrap(RequireRole::admin())
                    .route(web::get().to(users::get_all_users)),
            )
            .service(
                web::resource("/profile/me")
                    .wrap(RequireRole::patient())
                    .route(web::get().to(users::get_user_profile)),
            )
            .service(
                web::resource("/appointments/my-appointments")
                    .wrap(RequireRole::patient())
                    .route(web::get().to(users::get_my_appointments)),
            )
            .service(
                web::resource("/fix/photo-urls")
                    .wrap(RequireRole::admin())
                    .route(web::put().to(users::fix_insecure_photo_urls)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequireRole::patient())
                    .route(web::get().to(users::get_single_user))
                    .route(web::put().to(users::update_user))
                    .route(web::delete().to(users::delete_user)),
            ),
    )
    // Uploads: any authenticated role
    .service(
        web::scope("/api/v1/uploads")
            .wrap(AuthMiddleware)
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
            .route("/image", web::post().to(uploads::upload_image)),
    );
}
