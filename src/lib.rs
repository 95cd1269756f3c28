pub mod gemini;
pub mod http_client;
pub mod parse;
pub mod predict;
pub mod provider;
pub mod state;
pub mod teams;
