use {
    std::sync::Arc,
    tracing::info,
    config::Config,
    crate::{
        models::{load_summarizer, load_topic_modeler, SummaryParams},
        processing::{ProcessorSettings, TextProcessor},
        server::run_server,
        utils::{init_logging, load_config},
    },
};

pub mod entities;
pub mod handlers;
pub mod models;
pub mod processing;
pub mod server;
pub mod utils;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = load_config();
    let processor = Arc::new(build_processor(&config));

    run_server(&config, processor).await;

    info!("done");
    Ok(())
}

fn build_processor(config: &Config) -> TextProcessor {
    let settings = ProcessorSettings::from_config(config);
    let params = SummaryParams {
        max_length: settings.summary_max_length,
        min_length: settings.summary_min_length,
    };

    TextProcessor::new(load_summarizer(params), load_topic_modeler(), settings)
}
