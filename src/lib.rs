pub mod client;
pub mod config;
pub mod constant;
pub mod error;
pub mod feed;
pub mod llm;
pub mod protocols;
pub mod routing;
pub mod server;
pub mod token;
pub mod vault;

pub use error::RouterError;

pub fn setup_env_and_tracing() {
    dotenv::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
