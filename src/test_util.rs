/// Builds an actix test service from the full application over a fresh,
/// empty state.
macro_rules! test_app {
    () => {
        actix_web::test::init_service(crate::routes::build_app(
            crate::config::Config::default(),
            actix_web::web::Data::new(crate::state::AppState::new()),
        ))
        .await
    };
}
