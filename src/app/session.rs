// src/app/session.rs
//! MatchEngine と DomView をひとまとめにして、クリックやタイマーから共有する箱。

use std::sync::{Arc, Mutex, MutexGuard};

use log::warn;

use crate::app::dom_view::DomView;
use crate::ecs::entity::Entity;
use crate::systems::match_system::{MatchEngine, ResolutionTicket};
use crate::systems::snapshot::BoardSnapshot;

pub(crate) struct GameSession {
    engine: MatchEngine,
    view: DomView,
}

pub(crate) type SharedSession = Arc<Mutex<GameSession>>;

impl GameSession {
    pub(crate) fn new(engine: MatchEngine, view: DomView) -> Self {
        GameSession { engine, view }
    }

    pub(crate) fn start(&mut self) {
        self.engine.start(&mut self.view);
    }

    pub(crate) fn reset(&mut self) {
        self.engine.reset(&mut self.view);
    }

    pub(crate) fn select_card(&mut self, entity: Entity) -> Option<ResolutionTicket> {
        self.engine.select_card(entity, &mut self.view)
    }

    pub(crate) fn resolve(&mut self, ticket: ResolutionTicket) -> Option<ResolutionTicket> {
        self.engine.resolve(ticket, &mut self.view)
    }

    pub(crate) fn snapshot(&self) -> BoardSnapshot {
        self.engine.snapshot()
    }
}

/// セッションをロックする。Mutex が poison されてても中身を取り出して続行するよ
/// (Wasm はシングルスレッドなので、壊れた途中状態が他スレッドから見えることはない)。
pub(crate) fn lock_session(session: &SharedSession) -> MutexGuard<'_, GameSession> {
    match session.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("App::Session: session mutex was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}
