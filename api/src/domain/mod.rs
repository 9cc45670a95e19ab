pub mod comments;
pub mod lifecycle;
pub mod listing;
pub mod posts;
pub mod tickets;
pub mod trains;
pub mod trainstations;
pub mod users;
