pub mod boards;
pub mod health;
