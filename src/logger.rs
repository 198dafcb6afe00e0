//! 日志初始化
//!
//! 基于 tracing-subscriber，默认 info 级别，可通过 RUST_LOG 覆盖。

use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器
///
/// 测试中可能被多次调用，使用 try_init 忽略重复初始化。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 截断长文本用于日志显示（错误链摘录等）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("0123456789ab", 10), "0123456789...");
    }
}
