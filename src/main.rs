use alist_sdk::{config::LogConfig, logging, AlistClient, AppConfig};
use anyhow::Context;
use tracing::{error, info};

/// 默认配置文件路径
const DEFAULT_CONFIG_PATH: &str = "config/app.toml";

/// 用法: alist-cli [配置文件] [远程目录]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let remote_path = args.next().unwrap_or_else(|| "/".to_string());

    // 日志配置依赖配置文件，先加载再初始化日志
    let loaded = AppConfig::load_from_file(&config_path).await;
    let log_config = match &loaded {
        Ok(config) => config.log.clone(),
        Err(_) => LogConfig::default(),
    };

    // 必须保持 _log_guard 存活
    let _log_guard = logging::init_logging(&log_config);

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("加载配置失败: {:#}", e);
            // 首次运行时写出模板，方便填写
            AppConfig::load_or_default(&config_path).await;
            anyhow::bail!("请先在 {} 中填写 [client] 配置", config_path);
        }
    };

    info!("Alist SDK v{} 启动", env!("CARGO_PKG_VERSION"));

    let client = AlistClient::new(&config.client).context("创建客户端失败")?;

    let user = if client.is_authenticated() {
        client.me().await.context("获取用户信息失败")?
    } else {
        client.login().await.context("登录失败")?
    };
    println!("当前用户: {} (id={}, base_path={})", user.username, user.id, user.base_path);

    let listing = client
        .list(&remote_path, "", 1, 0, false)
        .await
        .with_context(|| format!("列出目录失败: {}", remote_path))?;

    println!("{} 共 {} 项 (provider={})", remote_path, listing.total, listing.provider);
    for file in &listing.content {
        let modified = file
            .modified_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| file.modified.clone());
        println!(
            "{} {:>12} {} {}",
            if file.is_directory() { "d" } else { "-" },
            file.size,
            modified,
            file.name
        );
    }

    Ok(())
}
