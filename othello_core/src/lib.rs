//! Othello (Reversi) rules engine.
//!
//! このクレートは盤面とルールを扱う `engine` と、描画・入力側の協調者へ
//! 更新を通知する `session` を提供します。

#![forbid(unsafe_code)]

/// ゲームルール・盤面・進行を提供するモジュール。
pub mod engine;

/// ログ出力（`tracing-subscriber`）の初期化。
pub mod logging;

/// ゲームセッションと表示側への通知。
pub mod session;
