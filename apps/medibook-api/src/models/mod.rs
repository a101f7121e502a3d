pub mod appointment;
pub mod chat_message;
pub mod doctor;
pub mod patient;
