use anyhow::Context;
use parley::app::App;
use parley::{config, logging, ui};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    config::initialize_config().context("initialize configuration")?;
    let cfg = config::get_config();

    // The handle must outlive the UI; dropping it shuts the logger down.
    let _logger = logging::init_logging(&cfg.log_level).context("initialize logging")?;

    let app = App::new(&cfg).context("initialize chat client")?;

    if let Err(e) = ui::run_ui(app).await {
        anyhow::bail!("terminal UI error: {}", e);
    }
    Ok(())
}
