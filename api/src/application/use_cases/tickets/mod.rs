pub mod book_ticket;
pub mod get_ticket;
pub mod list_tickets;
pub mod validate_ticket;
