pub mod action;
pub mod error;
mod lifecycle;
mod moves;
mod resolve;
mod scoring;
pub mod serialization;
pub mod state;
pub mod view;
