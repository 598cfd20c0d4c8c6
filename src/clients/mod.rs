pub mod gcal_client;
pub mod gmail_client;
