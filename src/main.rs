use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod routes;
mod server;

async fn run() {
    // initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_thread_ids(true).json().flatten_event(true))
        .init();

    // load env
    dotenv::dotenv().ok();

    // serve app
    server::serve().await;

    tracing::info!("Server has stopped.");
}

fn main() {
    tokio::runtime::Builder::new_multi_thread().enable_all().build().expect("Failed to build async rt").block_on(run())
}
