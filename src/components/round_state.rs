// src/components/round_state.rs

use serde::{Deserialize, Serialize};

use crate::ecs::entity::Entity;

/// ラウンドが今どの段階にいるか。`RoundState` から毎回計算するよ！
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// 表向きのカードなし
    Idle,
    /// 1枚だけめくれてる。まだ選べる
    OneUp,
    /// 2枚めくれて判定待ち。入力はロック中🔒
    Resolving,
    /// 全ペア成立！リセットされるまで何も受け付けない🏆
    Won,
}

/// 1ラウンド分の状態 (RoundState)。
///
/// 持ち主は `MatchEngine` だけで、書き換えも `MatchEngine` の遷移関数だけ。
/// グローバル変数にはしないよ！
///
/// 守ること:
/// - `face_up.len() <= 2`
/// - `can_flip == false` なのは2枚が判定待ちの間だけ
/// - `score <= total_pairs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    /// めくれてて、まだペアになってないカード (0〜2枚)
    pub(crate) face_up: Vec<Entity>,
    /// 成立したペアの数
    pub(crate) score: usize,
    /// 入力を受け付けるかどうか
    pub(crate) can_flip: bool,
    /// このラウンドで最初の1枚がめくられたか (BGM 開始の一回きりフラグ)
    pub(crate) game_started: bool,
    /// 勝利通知をもう出したか
    pub(crate) win_notified: bool,
    /// ラウンドの世代番号。リセットのたびに増える
    pub(crate) generation: u64,
}

impl RoundState {
    /// 世代 `generation` の、まっさらなラウンド。
    pub fn fresh(generation: u64) -> Self {
        RoundState {
            face_up: Vec::with_capacity(2),
            score: 0,
            can_flip: true,
            game_started: false,
            win_notified: false,
            generation,
        }
    }

    pub fn phase(&self, total_pairs: usize) -> RoundPhase {
        if total_pairs > 0 && self.score >= total_pairs {
            return RoundPhase::Won;
        }
        match self.face_up.len() {
            0 => RoundPhase::Idle,
            1 => RoundPhase::OneUp,
            _ => RoundPhase::Resolving,
        }
    }

    pub fn face_up(&self) -> &[Entity] {
        &self.face_up
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn can_flip(&self) -> bool {
        self.can_flip
    }

    pub fn game_started(&self) -> bool {
        self.game_started
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
