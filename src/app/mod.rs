// src/app/mod.rs
//! ブラウザ側のつなぎ込み。DOM・音・タイマーを MatchEngine につなぐよ！

pub mod browser_event_manager;
pub mod console_logger;
pub mod dom_view;
pub mod game_app;
pub mod init_handler;
pub mod session;
pub mod state_getter;
pub mod timer;

pub use game_app::MemoryGameApp;
