// src/systems/snapshot.rs
//! 今のラウンドの様子を JSON にできる形で切り出すよ！デバッグ表示用。

use serde::{Deserialize, Serialize};

use crate::components::card::{CardFace, CardState};
use crate::components::round_state::RoundPhase;
use crate::ecs::entity::Entity;
use crate::systems::match_system::MatchEngine;

/// カード1枚分。裏向きのカードは絵柄を見せない (`face: None`)。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub entity: Entity,
    pub position: usize,
    pub state: CardState,
    pub face: Option<CardFace>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub generation: u64,
    pub phase: RoundPhase,
    pub score: usize,
    pub total_pairs: usize,
    pub progress: f64,
    pub can_flip: bool,
    pub game_started: bool,
    pub cards: Vec<CardSnapshot>,
}

impl BoardSnapshot {
    pub fn capture(engine: &MatchEngine) -> Self {
        let cards = engine
            .dealt_entities()
            .iter()
            .filter_map(|&entity| {
                engine.card(entity).map(|card| CardSnapshot {
                    entity,
                    position: card.position,
                    state: card.state,
                    face: card.is_revealed().then(|| card.face.clone()),
                })
            })
            .collect();

        BoardSnapshot {
            generation: engine.generation(),
            phase: engine.phase(),
            score: engine.score(),
            total_pairs: engine.total_pairs(),
            progress: engine.progress_fraction(),
            can_flip: engine.can_flip(),
            game_started: engine.game_started(),
            cards,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
