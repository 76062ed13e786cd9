/// 日志工具模块
///
/// 提供阶段横幅、token 统计等日志输出的辅助函数
use tracing::info;

/// 记录阶段开始
///
/// # 参数
/// - `stage`: 阶段名称
/// - `code`: 认证代码
pub fn log_stage_start(stage: &str, code: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 {} - 认证: {}", stage, code);
    info!(
        "开始时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

/// 记录阶段完成
///
/// # 参数
/// - `stage`: 阶段名称
/// - `output`: 产物路径
pub fn log_stage_complete(stage: &str, output: &str) {
    info!("\n{}", "─".repeat(60));
    info!("✅ {} 完成", stage);
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📄 产物: {}", output);
    info!("{}", "─".repeat(60));
}

/// 记录 token 用量
pub fn log_token_usage(stage: &str, input_tokens: u64, output_tokens: u64) {
    info!(
        "📊 {} 消耗输入 token {} 个，输出 token {} 个",
        stage, input_tokens, output_tokens
    );
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
