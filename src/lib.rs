/*
 * Responsibility
 * - モジュール構成の公開 (main.rs と tests/ から参照される)
 */
pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
