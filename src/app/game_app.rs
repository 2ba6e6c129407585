// src/app/game_app.rs

use std::sync::{Arc, Mutex};

use log::info;
use wasm_bindgen::prelude::*;

use crate::app::browser_event_manager::{self, EventClosure};
use crate::app::init_handler;
use crate::app::session::{lock_session, GameSession, SharedSession};
use crate::app::state_getter;
use crate::app::timer;
use crate::config::game_config::GameConfig;
use crate::ecs::entity::Entity;
use crate::systems::match_system::MatchEngine;

/// JS から `new MemoryGameApp()` で作る、ゲーム全体のアプリケーション。
///
/// 作った瞬間に DOM を探して、リスナーを付けて、最初の20枚を配るよ！
/// JS 側でこのオブジェクトを捨てるとリスナーも外れる (closure が drop される) ので、
/// ページが生きてる間は持っておいてね。
#[wasm_bindgen]
pub struct MemoryGameApp {
    session: SharedSession,
    // リスナーのクロージャ。drop されると JS から呼べなくなるので持っておく
    event_closures: Vec<EventClosure>,
}

#[wasm_bindgen]
impl MemoryGameApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<MemoryGameApp, JsValue> {
        info!("MemoryGameApp: initializing...");
        let elements = init_handler::collect_elements()?;
        let view = init_handler::build_view(&elements);
        let engine = MatchEngine::new(GameConfig::default());
        let session: SharedSession = Arc::new(Mutex::new(GameSession::new(engine, view)));

        let event_closures = vec![
            browser_event_manager::attach_board_listener(&elements.board, &session)?,
            browser_event_manager::attach_reset_listener(&elements.reset_button, &session)?,
        ];

        lock_session(&session).start();
        info!("MemoryGameApp: ready");
        Ok(MemoryGameApp {
            session,
            event_closures,
        })
    }

    /// カードを選ぶ (ふつうは盤面のクリックから自動で呼ばれる)。
    #[wasm_bindgen]
    pub fn select_card(&self, entity_id: usize) {
        let ticket = lock_session(&self.session).select_card(Entity(entity_id));
        timer::schedule_or_log(&self.session, ticket);
    }

    /// 最初からやり直す。
    #[wasm_bindgen]
    pub fn reset(&self) {
        lock_session(&self.session).reset();
    }

    /// 今の盤面を JSON で。デバッグ用。
    #[wasm_bindgen]
    pub fn get_state_json(&self) -> Result<JsValue, JsValue> {
        state_getter::get_state_json(&self.session)
    }

    /// 付けてるリスナーの数 (デバッグ用)
    #[wasm_bindgen]
    pub fn listener_count(&self) -> usize {
        self.event_closures.len()
    }
}
