pub mod api;
pub mod commands;
pub mod http;
pub mod quiz;
pub mod retry;
