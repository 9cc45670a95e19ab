pub mod auth;
pub mod comments;
pub mod posts;
pub mod tickets;
pub mod trains;
pub mod trainstations;
pub mod users;
