// src/view.rs
//! ゲームロジックから外の世界 (描画・音) への窓口だよ！
//!
//! `MatchEngine` はこのトレイト越しに「カードを描いて」「音を鳴らして」と
//! お願いするだけで、結果は見ない (一方通行)。ブラウザ版の実装は
//! `app::dom_view::DomView`、テストでは記録するだけの偽物を使うよ。

use serde::{Deserialize, Serialize};

use crate::components::card::{CardFace, CardState};
use crate::ecs::entity::Entity;

/// 効果音の種類。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sound {
    Flip,
    Match,
    Fail,
    Win,
}

impl Sound {
    pub fn name(self) -> &'static str {
        match self {
            Sound::Flip => "flip",
            Sound::Match => "match",
            Sound::Fail => "fail",
            Sound::Win => "win",
        }
    }
}

/// BGM への指示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundAudio {
    Start,
    Pause,
    /// 頭出し (currentTime = 0)
    Rewind,
}

/// 盤面を描くときに渡す、配られたカード1枚分の情報。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealtCard {
    pub entity: Entity,
    pub position: usize,
    pub face: CardFace,
}

/// ゲームロジック → ホスト への通知。
pub trait GameView {
    /// 盤面を作り直す。`cards` は配られた順。
    fn render_board(&mut self, cards: &[DealtCard]);
    fn set_card_visual_state(&mut self, entity: Entity, state: CardState);
    fn play_sound(&mut self, sound: Sound);
    fn set_background_audio(&mut self, action: BackgroundAudio);
    /// 進捗 (0.0〜1.0)
    fn set_progress_display(&mut self, fraction: f64);
    fn notify_win(&mut self);
}
