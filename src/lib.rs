pub mod config;
pub mod engine;
pub mod error;
pub mod figure;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod renderer;
pub mod scheduler;
pub mod terminal_runtime;
pub mod ui;
