pub mod admin_dashboard;
pub mod login;
pub mod lot_spots;
pub mod not_found;
pub mod register;
pub mod user_dashboard;
