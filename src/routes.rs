use crate::{
    api::{attendance, person},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-group limiter config
    fn build_limiter(requests_per_min: u32) -> GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap()
    }

    let directory_limiter = build_limiter(config.rate_directory_per_min);
    let attendance_limiter = build_limiter(config.rate_attendance_per_min);
    let history_limiter = build_limiter(config.rate_history_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/persons")
                    .wrap(Governor::new(&directory_limiter))
                    // /persons
                    .service(
                        web::resource("")
                            .route(web::post().to(person::create_person))
                            .route(web::get().to(person::list_persons)),
                    )
                    // /persons/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(person::get_person))
                            .route(web::put().to(person::update_person))
                            .route(web::delete().to(person::delete_person)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance/{cohort}/board
                    .service(
                        web::resource("/{cohort}/board")
                            .wrap(Governor::new(&attendance_limiter))
                            .route(web::get().to(attendance::board)),
                    )
                    // /attendance/{cohort}/toggle
                    .service(
                        web::resource("/{cohort}/toggle")
                            .wrap(Governor::new(&attendance_limiter))
                            .route(web::post().to(attendance::toggle)),
                    )
                    // /attendance/{cohort}/archive
                    .service(
                        web::resource("/{cohort}/archive")
                            .wrap(Governor::new(&attendance_limiter))
                            .route(web::post().to(attendance::archive_day)),
                    )
                    // /attendance/{cohort}/history
                    .service(
                        web::resource("/{cohort}/history")
                            .wrap(Governor::new(&history_limiter))
                            .route(web::get().to(attendance::history)),
                    ),
            ),
    );
}
