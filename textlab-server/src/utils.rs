use {
    tracing::Level,
    config::Config,
};

pub fn init_logging() {
    tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .init();
}

pub fn load_config() -> Config {
    Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("TEXTLAB").separator("__"))
        .build()
        .unwrap()
}
