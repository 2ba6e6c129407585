// src/components/mod.rs

// カード1枚分のデータと、ラウンド全体の状態はここ！
pub mod card;
pub mod round_state;

pub use card::{Card, CardFace, CardState};
pub use round_state::{RoundPhase, RoundState};
