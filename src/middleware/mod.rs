/*
 * Responsibility
 * - Router 全体に掛ける middleware の公開インターフェース
 * - 認証は middleware では行わない (bearer token は handler → BoardService で解決)
 */
pub mod cors;
pub mod http;
pub mod security_headers;
