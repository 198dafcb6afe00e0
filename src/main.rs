use anyhow::Result;

use gsmm_batch::orchestrator::{App, Mode};
use gsmm_batch::{logger, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 运行模式：build（默认）或 tradeoff
    let arg = std::env::args().nth(1);
    let mode = Mode::from_arg(arg.as_deref())?;

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config)?.run(mode).await?;

    Ok(())
}
