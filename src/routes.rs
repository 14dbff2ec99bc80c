use crate::{
    api::{employee, health, time_log},
    config::Config,
    docs::ApiDoc,
    error::ApiError,
    state::AppState,
};
use actix_cors::Cors;
use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{Logger, NormalizePath},
    web,
};
use tracing::debug;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// express.json() default
const JSON_LIMIT: usize = 100 * 1024;

/// Full application: middleware, Swagger UI and the API routes. Shared by
/// `main` and the handler tests.
pub fn build_app(
    config: Config,
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Logger::default())
        .wrap(NormalizePath::trim())
        .wrap(Cors::permissive())
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
        )
        .configure(|cfg| configure(cfg, config, state))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config, state: web::Data<AppState>) {
    // Extractor failures become `{"error": ...}` 400s instead of actix's plain-text bodies
    let json_config = web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .content_type_required(false)
        .error_handler(|err, req| {
            debug!(error = %err, path = %req.path(), "Rejected request body");
            ApiError::invalid_input(format!("Invalid JSON body: {err}")).into()
        });

    let path_config = web::PathConfig::default().error_handler(|err, req| {
        debug!(error = %err, path = %req.path(), "Rejected path parameter");
        ApiError::invalid_input("Invalid employee id").into()
    });

    let query_config = web::QueryConfig::default().error_handler(|err, req| {
        debug!(error = %err, path = %req.path(), "Rejected query string");
        ApiError::invalid_input(format!("Invalid query string: {err}")).into()
    });

    // raw bodies (PUT/PATCH) share the JSON size limit
    let payload_config = web::PayloadConfig::new(JSON_LIMIT);

    cfg.app_data(state)
        .app_data(json_config)
        .app_data(payload_config)
        .app_data(path_config)
        .app_data(query_config);

    cfg.service(
        web::scope(&config.api_prefix)
            .service(web::resource("/health").route(web::get().to(health::health)))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::replace_employee))
                            .route(web::patch().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(web::resource("/clock-in").route(web::post().to(time_log::clock_in)))
            .service(web::resource("/clock-out").route(web::post().to(time_log::clock_out)))
            .service(web::resource("/logs").route(web::get().to(time_log::list_logs))),
    );
}
