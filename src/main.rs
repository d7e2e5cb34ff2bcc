use anyhow::Context as _;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    simple_env_load::load_env_from([".dev.env", ".secrets.env"]);
    let config = sohbet::Config::load("sohbet.toml").context("cannot load the configuration")?;

    eframe::run_native(
        &format!("sohbet - {title}", title = config.title),
        eframe::NativeOptions::default(),
        Box::new(|cc| sohbet::App::create(cc, config)),
    )
    .map_err(|err| anyhow::anyhow!("cannot run the chat window: {err:?}"))
}
