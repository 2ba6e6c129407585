// src/systems/mod.rs
//! ゲームの進行ロジック (Match Engine) と、その状態のスナップショット。

pub mod match_system;
pub mod snapshot;

pub use match_system::{MatchEngine, ResolutionTicket, TicketKind};
pub use snapshot::{BoardSnapshot, CardSnapshot};
