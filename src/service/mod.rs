pub mod chat_service;
pub mod quiz_service;
