pub mod health;
pub mod repositories;
pub mod tokens;
