// src/logic/deck.rs

use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};

use crate::components::card::CardFace;

/// 絵柄のプールから、このラウンドで配るデッキを作る関数だよ！🃏
///
/// 各絵柄をちょうど2枚ずつ入れて、順番をシャッフルして返す。
/// 長さは `2 × identities.len()`。プールと乱数源だけで決まる純粋な関数！
pub fn build_deck<R: Rng + ?Sized>(identities: &[CardFace], rng: &mut R) -> Vec<CardFace> {
    let mut deck = identities
        .iter()
        .flat_map(|face| [face.clone(), face.clone()])
        .collect_vec();
    shuffle_deck(&mut deck, rng);
    deck
}

/// デッキをその場でシャッフルする。
///
/// 中身は Fisher-Yates (`SliceRandom::shuffle`)。後ろの添字 i から順に、
/// `[0, i]` から一様に選んだ位置と入れ替えていくので、どの並びも同じ確率で出るよ。
pub fn shuffle_deck<R: Rng + ?Sized>(deck: &mut [CardFace], rng: &mut R) {
    deck.shuffle(rng);
}

/// デッキがプールに対して正しい形か (全絵柄がちょうど2枚、余計なものなし)。
pub fn deck_is_well_formed(deck: &[CardFace], identities: &[CardFace]) -> bool {
    if deck.len() != identities.len() * 2 {
        return false;
    }
    let counts = deck.iter().counts();
    identities
        .iter()
        .all(|face| counts.get(face).copied() == Some(2))
}
