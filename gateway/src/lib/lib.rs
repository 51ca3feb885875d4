pub mod config;
pub mod domain;
pub mod downstream;
pub mod inbound;
pub mod outbound;

pub use domain::authentication;
pub use domain::user;
pub use outbound::repositories;
