// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// ゲームの中身 (ブラウザに依存しない部分)
pub mod components;
pub mod config;
pub mod ecs;
pub mod logic;
pub mod systems;
pub mod view;

// ブラウザとのつなぎ込み
pub mod app;

pub use app::MemoryGameApp;
pub use components::{Card, CardFace, CardState, RoundPhase, RoundState};
pub use config::GameConfig;
pub use ecs::Entity;
pub use systems::{BoardSnapshot, MatchEngine, ResolutionTicket, TicketKind};
pub use view::{BackgroundAudio, DealtCard, GameView, Sound};

// Wasm がロードされた時に最初に実行される関数だよ。
// パニックをコンソールに出すフックと、log クレートの出力先を設定する。
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    app::console_logger::init(level);
    log::info!("memory_match_wasm loaded");
}
