//! # 智能手机示例应用
//!
//! 进程启动时构建唯一的应用容器，再把组装好的手机注入到主界面

mod main_screen;

use anyhow::Context;
use clap::Parser;
use infrastructure_composition::{ApplicationBuilder, LoggingConfig, SmartPhoneApplication};
use main_screen::MainScreen;
use std::path::PathBuf;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "smartphone-app")]
#[command(about = "智能手机依赖注入示例")]
struct Args {
    /// 参数文件路径（TOML 或 JSON）
    #[arg(short, long, default_value = "config/phone.toml")]
    config: PathBuf,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    /// 使用 JSON 格式输出日志
    #[arg(long)]
    json_logs: bool,

    /// 存储卡容量（MB），覆盖参数文件和环境变量
    #[arg(long)]
    memory_size: Option<u32>,

    /// 拨打电话次数
    #[arg(long, default_value_t = 1)]
    calls: u32,
}

impl Args {
    fn logging_config(&self) -> LoggingConfig {
        let preset = if self.json_logs {
            LoggingConfig::production()
        } else {
            LoggingConfig::default()
        };

        LoggingConfig {
            level: self.log_level,
            ..preset
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let application = build_application(&args)?;
    info!("启动智能手机示例应用: {}", application.id());

    let mut screen = MainScreen::default();
    application
        .inject(&mut screen)
        .context("主界面注入失败")?;

    for _ in 0..args.calls {
        screen.on_call_button()?;
    }

    let stats = application.stats();
    info!(
        "容器统计: {} 个组件, {} 个单例, {} 次解析, {} 次构建",
        stats.registered_components,
        stats.active_singletons,
        stats.resolutions,
        stats.constructions
    );

    application.shutdown().await?;
    info!("应用已关闭");
    Ok(())
}

/// 构建应用
fn build_application(args: &Args) -> anyhow::Result<SmartPhoneApplication> {
    let mut builder = ApplicationBuilder::new().with_logging(args.logging_config());

    // 添加参数文件（如果存在）
    if args.config.exists() {
        builder = match args.config.extension().and_then(|ext| ext.to_str()) {
            Some("json") => builder.add_config_json(&args.config)?,
            _ => builder.add_config_toml(&args.config)?,
        };
    } else {
        info!("参数文件不存在，将只使用环境变量: {}", args.config.display());
    }

    builder = builder.add_config_env_vars("PHONE");

    if let Some(memory_size) = args.memory_size {
        builder = builder.with_memory_size(memory_size)?;
    }

    builder.build().context("应用启动失败")
}
