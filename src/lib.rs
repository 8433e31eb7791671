/*
 * Responsibility
 * - crate の module 宣言
 * - main.rs / token-gen / tests から使う公開インターフェース
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod guards;
pub mod middleware;
pub mod services;
pub mod state;
