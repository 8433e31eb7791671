/*
 * Responsibility
 * - API の version / 領域ごとの入り口
 * - /api/v1: 一般 API, /api/admin: 管理画面向け API
 */
pub mod admin;
pub mod v1;
