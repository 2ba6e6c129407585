// src/components/card.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;

/// カードの絵柄 (CardIdentity)。1ラウンドの中でちょうど2枚が同じ絵柄を持つよ！🖼️
///
/// 中身はただのキー (ブラウザ版だと画像のパス)。ゲームロジックは
/// 「同じかどうか」しか見ないから、比較できれば何でもOK。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardFace(pub String);

impl CardFace {
    pub fn new(key: impl Into<String>) -> Self {
        CardFace(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardFace {
    fn from(key: &str) -> Self {
        CardFace::new(key)
    }
}

impl std::fmt::Display for CardFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 配られたカード1枚の見た目の状態。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    /// 裏向き (数字だけ見えてる)
    FaceDown,
    /// めくられてて、まだペアの判定待ち
    FaceUp,
    /// ペア成立！もう裏返らない
    Matched,
}

/// 場に配られたカード1枚を表すコンポーネント (CardInstance) だよ！🃏
///
/// - `face`: 絵柄
/// - `position`: 配られた位置 (0始まり)。ブラウザでは `position + 1` を表に書くよ
/// - `state`: 今の状態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub face: CardFace,
    pub position: usize,
    pub state: CardState,
}

impl Card {
    /// 配りたての裏向きカード。
    pub fn face_down(face: CardFace, position: usize) -> Self {
        Card {
            face,
            position,
            state: CardState::FaceDown,
        }
    }

    /// もう選べないカード (表向き or ペア成立済み) かどうか。
    pub fn is_revealed(&self) -> bool {
        matches!(self.state, CardState::FaceUp | CardState::Matched)
    }

    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }
}

impl Component for Card {}
