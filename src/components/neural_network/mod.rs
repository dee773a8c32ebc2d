mod component;
mod emitter;
mod layout;
mod render;
mod shield;
mod state;
mod types;

pub use component::NeuralNetwork;
