pub mod delete_user;
pub mod get_user;
pub mod list_users;
pub mod set_role;
pub mod update_user;
