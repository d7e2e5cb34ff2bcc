mod config;
pub use config::{Config, ConfigError};

mod message;
pub use message::Message;

mod repaint;
pub use repaint::Repaint;

pub mod realtime;
pub mod state;
pub mod views;

mod app;
pub use app::App;

pub(crate) fn default_http_client() -> reqwest::Client {
    reqwest::ClientBuilder::new()
        .user_agent(App::USER_AGENT)
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "cannot configure the http client, using defaults");
            reqwest::Client::new()
        })
}
