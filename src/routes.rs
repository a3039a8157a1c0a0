use crate::{
    api::{catalog, leave_request},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let submit_limiter = build_limiter(config.rate_submit_per_min);
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Everything is behind the identity provider's bearer tokens; there are
    // no credential endpoints in this service.
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::get().to(leave_request::leave_list))
                            .route(
                                web::post()
                                    .to(leave_request::submit_leave)
                                    .wrap(submit_limiter),
                            ),
                    )
                    // /leave/mine
                    .service(
                        web::resource("/mine").route(web::get().to(leave_request::my_leaves)),
                    )
                    // /leave/gatepass (latest granted for the session's student)
                    .service(
                        web::resource("/gatepass")
                            .route(web::get().to(leave_request::my_gate_pass)),
                    )
                    // /leave/{id}
                    .service(web::resource("/{id}").route(web::get().to(leave_request::get_leave)))
                    // /leave/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(leave_request::approve_leave)),
                    )
                    // /leave/{id}/reject
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(leave_request::reject_leave)),
                    )
                    // /leave/{id}/gatepass
                    .service(
                        web::resource("/{id}/gatepass")
                            .route(web::get().to(leave_request::download_gate_pass)),
                    ),
            )
            .service(
                web::scope("/catalog")
                    .service(web::resource("").route(web::get().to(catalog::get_catalog))),
            ),
    );
}
