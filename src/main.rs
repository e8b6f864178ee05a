use admission_progress::utils::logging;
use admission_progress::{App, Config};
use anyhow::{Context, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::resolve().context("无法加载配置")?;

    // 初始化日志
    let filter = if config.verbose_logging {
        "debug"
    } else {
        config.log_filter.as_str()
    };
    logging::init(filter);

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
