pub mod config;
pub mod dictionary;
pub mod review;
pub mod server;
pub mod texts;
pub mod vocab;
