pub mod auth;
pub mod board_service;
pub mod id_codec;
