use eframe::CreationContext;

use crate::{
    realtime::{Collection, Connection, Subscription},
    state::ChatState,
    views::ChatView,
    Config,
};

pub struct App {
    title: String,
    chat: ChatState<Collection>,
    subscription: Subscription,
}

impl App {
    pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

    /// Subscribes to the configured collection; the subscription lives as long as the app.
    pub fn create(cc: &CreationContext, config: Config) -> Box<dyn eframe::App> {
        let connection = Connection::create(config.connection());
        let collection = connection.collection(&*config.collection);

        tracing::info!(
            database = %config.database_url,
            collection = collection.path(),
            "subscribing"
        );
        let subscription = collection.subscribe(cc.egui_ctx.clone());

        Box::new(Self {
            title: config.title,
            chat: ChatState::new(collection),
            subscription,
        })
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Some(event) = self.subscription.poll() {
            self.chat.apply(event);
        }

        ChatView {
            title: &self.title,
            chat: &mut self.chat,
        }
        .display(ctx);
    }

    fn persist_egui_memory(&self) -> bool {
        false
    }
}
