//! 日志初始化

use tracing_subscriber::EnvFilter;

/// 初始化全局日志（默认 info 级别，可通过 RUST_LOG 覆盖）
pub fn init() {
    init_with_verbosity(false);
}

/// 初始化全局日志，`verbose` 为 true 时默认 debug 级别
pub fn init_with_verbosity(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cert_trainer={},warn", default_level)));

    // 重复初始化时忽略错误（测试中会多次调用）
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
