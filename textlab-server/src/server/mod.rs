use {
    std::sync::Arc,
    tracing::info,
    config::Config,
    crate::{
        handlers::rest::rest_router,
        processing::TextProcessor,
    },
};

pub async fn run_server(config: &Config, processor: Arc<TextProcessor>) {
    let host = config.get_string("server.host").unwrap_or("0.0.0.0".to_owned());
    let port = config.get_int("server.port").unwrap_or(8081);
    let addr = format!("{}:{}", host, port).parse().unwrap();

    info!("starting axum server on {:?}", addr);

    axum::Server::bind(&addr)
        .serve(rest_router(processor).into_make_service())
        .await
        .unwrap();
}
