pub mod app;
mod board;
mod debug_tools;
mod dialogs;
mod hud;
mod intro;
mod records;
mod scene;
mod state;
