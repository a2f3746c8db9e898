use std::io;
use tracing::Level;

/// ログの出力形式。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum LogFormat {
    /// 1行1イベントの JSON。
    #[default]
    Json,
    /// 人が読むための簡潔なテキスト。
    Text,
}

/// ログ初期化に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum LoggingError {
    /// すでにグローバルな subscriber が設定されている。
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// 標準エラー出力へ書き出すグローバルな subscriber を設定する。
///
/// # Errors
///
/// すでに subscriber が設定されている場合、`LoggingError::AlreadyInitialized` を返す。
///
pub fn init(format: LogFormat, level: Level) -> Result<(), LoggingError> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr);

    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.compact().try_init(),
    };

    result.map_err(|_err| LoggingError::AlreadyInitialized)
}
