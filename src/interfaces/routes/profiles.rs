use actix_web::web;
use crate::handlers::profiles;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profiles")
            .service(
                web::resource("")
                    .route(web::get().to(profiles::list_profiles))
                    .route(web::post().to(profiles::create_profile))
            )
            // registered before /{id} so "search" is not read as an id
            .service(
                web::resource("/search/{term}")
                    .route(web::get().to(profiles::search_profiles))
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(profiles::get_profile))
                    .route(web::put().to(profiles::update_profile))
            )
    );
}
