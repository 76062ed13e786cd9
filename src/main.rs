use anyhow::Result;
use clap::Parser;
use tracing::error;

use cert_trainer::app::App;
use cert_trainer::cli::Cli;
use cert_trainer::config::Config;
use cert_trainer::logger;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logger::init_with_verbosity(cli.verbose || config.verbose_logging);

    let app = App::new(config);
    if let Err(e) = app.run(cli.command, cli.debug).await {
        error!("❌ {:#}", e);
        return Err(e);
    }
    Ok(())
}
