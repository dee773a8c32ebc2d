pub mod code_window;
mod error;
pub mod neural_network;
mod schedule;
