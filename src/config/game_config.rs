// src/config/game_config.rs
//! ゲームの設定値だよ！絵柄のリスト、判定までの待ち時間、DOM の要素 ID など。
//! 全部コンパイル時の定数で、実行中に変える手段はないよ。

use serde::{Deserialize, Serialize};

use crate::components::card::CardFace;

/// 絵柄の画像 (10種類 = 10ペア = 20枚)
pub const CARD_IMAGE_SOURCES: [&str; 10] = [
    "assets/images/1.jpg",
    "assets/images/2.jpg",
    "assets/images/3.jpg",
    "assets/images/4.jpg",
    "assets/images/5.jpg",
    "assets/images/6.jpg",
    "assets/images/7.jpg",
    "assets/images/8.jpg",
    "assets/images/9.jpg",
    "assets/images/10.jpg",
];

/// ペア成立のときは短めに待ってすぐ確定
pub const MATCH_DELAY_MS: u32 = 500;
/// 外れたときは、2枚をちゃんと見られるように長めに待つ
pub const MISMATCH_DELAY_MS: u32 = 1200;
/// 最後のペア成立から、さらにこれだけ待って勝利メッセージ
pub const WIN_NOTICE_DELAY_MS: u32 = 500;

// --- DOM の要素 ID ---
pub const GAME_BOARD_ID: &str = "game-board";
pub const PROGRESS_BAR_ID: &str = "progress-bar";
pub const RESET_BUTTON_ID: &str = "reset-button";
pub const BG_MUSIC_ID: &str = "bg-music";
pub const FLIP_SOUND_ID: &str = "flip-sound";
pub const MATCH_SOUND_ID: &str = "match-sound";
pub const FAIL_SOUND_ID: &str = "fail-sound";
pub const WIN_SOUND_ID: &str = "win-sound";

pub const WIN_MESSAGE: &str = "You won!";

/// `MatchEngine` に渡す設定。
///
/// ブラウザ版は常に `GameConfig::default()` を使う。テストでは絵柄を減らしたり
/// して小さい盤面で回せるようにしてるよ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// 絵柄のプール (この数がそのままペア数になる)
    pub identities: Vec<CardFace>,
    pub match_delay_ms: u32,
    pub mismatch_delay_ms: u32,
    pub win_notice_delay_ms: u32,
}

impl GameConfig {
    /// 待ち時間はデフォルトのまま、絵柄だけ差し替えた設定。
    pub fn with_identities<I, S>(identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GameConfig {
            identities: identities.into_iter().map(|s| CardFace::new(s)).collect(),
            ..GameConfig::default()
        }
    }

    pub fn total_pairs(&self) -> usize {
        self.identities.len()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            identities: CARD_IMAGE_SOURCES.iter().map(|&src| CardFace::new(src)).collect(),
            match_delay_ms: MATCH_DELAY_MS,
            mismatch_delay_ms: MISMATCH_DELAY_MS,
            win_notice_delay_ms: WIN_NOTICE_DELAY_MS,
        }
    }
}
