//! 日志初始化
//!
//! 使用 `RUST_LOG` 控制级别，默认 `info`

use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅者，重复调用不会报错
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}
