// src/systems/match_system.rs
//! 神経衰弱の心臓部、Match Engine だよ！🧠
//!
//! カードをめくる → 2枚そろったら入力ロック → 少し待ってから判定 → 勝利チェック、
//! という流れを全部ここで管理する。
//!
//! 「少し待つ」部分はエンジン自身はタイマーを持たず、`ResolutionTicket` を返すだけ。
//! ホスト (ブラウザなら `setTimeout`) が `delay_ms` 後にそのチケットを
//! `resolve` に戻してくれる約束になってるよ。チケットにはラウンドの世代番号が
//! 入ってるから、リセット後に古いタイマーが鳴っても新しいラウンドは壊れない！

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::components::card::{Card, CardFace, CardState};
use crate::components::round_state::{RoundPhase, RoundState};
use crate::config::game_config::GameConfig;
use crate::ecs::entity::Entity;
use crate::ecs::world::World;
use crate::logic::deck::{build_deck, deck_is_well_formed};
use crate::systems::snapshot::BoardSnapshot;
use crate::view::{BackgroundAudio, DealtCard, GameView, Sound};

/// 遅れて処理する判定の種類。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketKind {
    /// 同じ絵柄のペア → 成立させる
    Match { pair: [Entity; 2] },
    /// 違う絵柄 → 裏返す
    Mismatch { pair: [Entity; 2] },
    /// 最後のペアの後の勝利メッセージ
    WinNotice,
}

/// `delay_ms` 後に `MatchEngine::resolve` に返してね、というお願い。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTicket {
    pub generation: u64,
    pub kind: TicketKind,
    pub delay_ms: u32,
}

/// Match Engine 本体。
///
/// カードの実体は `World` に、ラウンドの状態は `RoundState` に持ってて、
/// どっちも書き換えるのはこの構造体のメソッドだけ！
pub struct MatchEngine {
    config: GameConfig,
    world: World,
    /// 配った順のエンティティ
    dealt: Vec<Entity>,
    round: RoundState,
    rng: StdRng,
}

impl MatchEngine {
    /// OS (ブラウザなら crypto.getRandomValues) の乱数でシャッフルするエンジン。
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// シード固定のエンジン。テストやリプレイ用。
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let mut world = World::new();
        world.register_component::<Card>();
        MatchEngine {
            config,
            world,
            dealt: Vec::new(),
            round: RoundState::fresh(0),
            rng,
        }
    }

    // --- 遷移 ---

    /// 最初の配り。BGM には触らない。
    pub fn start(&mut self, view: &mut dyn GameView) {
        let deck = build_deck(&self.config.identities, &mut self.rng);
        self.deal_deck(deck, view);
    }

    /// いつでも呼べるリセット。BGM を止めて頭出ししてから、新しくシャッフルして配り直す。
    ///
    /// 世代番号が進むので、まだ飛んでるチケットは全部無効になるよ。
    pub fn reset(&mut self, view: &mut dyn GameView) {
        info!("MatchEngine: reset requested (generation {})", self.round.generation);
        view.set_background_audio(BackgroundAudio::Pause);
        view.set_background_audio(BackgroundAudio::Rewind);
        let deck = build_deck(&self.config.identities, &mut self.rng);
        self.deal_deck(deck, view);
    }

    /// 決まった並びのデッキで新しいラウンドを始める。
    pub(crate) fn deal_deck(&mut self, deck: Vec<CardFace>, view: &mut dyn GameView) {
        debug_assert!(deck_is_well_formed(&deck, &self.config.identities));

        for entity in self.dealt.drain(..) {
            self.world.destroy_entity(entity);
        }

        let world = &mut self.world;
        let dealt: Vec<Entity> = deck
            .into_iter()
            .enumerate()
            .map(|(position, face)| {
                let entity = world.create_entity();
                world.add_component(entity, Card::face_down(face, position));
                entity
            })
            .collect();
        self.dealt = dealt;
        self.round = RoundState::fresh(self.round.generation + 1);

        info!(
            "MatchEngine: dealt {} cards ({} pairs), generation {}",
            self.dealt.len(),
            self.total_pairs(),
            self.round.generation
        );
        view.render_board(&self.dealt_cards());
        self.push_progress(view);
    }

    /// プレイヤーがカードを選んだ。
    ///
    /// ロック中・勝利後・もうめくれてる/成立済みのカード・知らないカードは全部無視
    /// (音も鳴らない)。2枚目がめくれたらロックして、判定チケットを返すよ。
    pub fn select_card(
        &mut self,
        entity: Entity,
        view: &mut dyn GameView,
    ) -> Option<ResolutionTicket> {
        match self.phase() {
            RoundPhase::Won | RoundPhase::Resolving => {
                debug!("MatchEngine: select {:?} ignored in phase {:?}", entity, self.phase());
                return None;
            }
            RoundPhase::Idle | RoundPhase::OneUp => {}
        }
        if !self.round.can_flip {
            debug!("MatchEngine: select {:?} ignored, input locked", entity);
            return None;
        }

        let card = match self.world.get_component_mut::<Card>(entity) {
            Some(card) => card,
            None => {
                debug!("MatchEngine: select {:?} ignored, not dealt this round", entity);
                return None;
            }
        };
        if card.is_revealed() {
            debug!("MatchEngine: select {:?} ignored, already {:?}", entity, card.state);
            return None;
        }
        card.state = CardState::FaceUp;

        view.play_sound(Sound::Flip);
        view.set_card_visual_state(entity, CardState::FaceUp);
        self.round.face_up.push(entity);
        debug!("MatchEngine: flipped {:?} ({} face-up)", entity, self.round.face_up.len());

        if !self.round.game_started {
            self.round.game_started = true;
            view.set_background_audio(BackgroundAudio::Start);
        }

        if self.round.face_up.len() == 2 {
            self.round.can_flip = false;
            return self.evaluate_pair();
        }
        None
    }

    /// 2枚の絵柄を比べて、成立/不成立のチケットを切る。
    fn evaluate_pair(&self) -> Option<ResolutionTicket> {
        let pair = [self.round.face_up[0], self.round.face_up[1]];
        let first = self.world.get_component::<Card>(pair[0])?;
        let second = self.world.get_component::<Card>(pair[1])?;

        let (kind, delay_ms) = if first.face == second.face {
            (TicketKind::Match { pair }, self.config.match_delay_ms)
        } else {
            (TicketKind::Mismatch { pair }, self.config.mismatch_delay_ms)
        };
        debug!("MatchEngine: resolving {:?} in {}ms", kind, delay_ms);
        Some(ResolutionTicket {
            generation: self.round.generation,
            kind,
            delay_ms,
        })
    }

    /// 待ち時間が終わったチケットを処理する。続きのチケット (勝利通知) があれば返す。
    pub fn resolve(
        &mut self,
        ticket: ResolutionTicket,
        view: &mut dyn GameView,
    ) -> Option<ResolutionTicket> {
        if ticket.generation != self.round.generation {
            debug!(
                "MatchEngine: discarded stale ticket from generation {} (current {})",
                ticket.generation, self.round.generation
            );
            return None;
        }

        match ticket.kind {
            TicketKind::Match { pair } if self.is_pending(pair) => self.apply_match(pair, view),
            TicketKind::Mismatch { pair } if self.is_pending(pair) => {
                self.apply_mismatch(pair, view);
                None
            }
            TicketKind::WinNotice if self.phase() == RoundPhase::Won && !self.round.win_notified => {
                self.round.win_notified = true;
                info!("MatchEngine: notifying win");
                view.notify_win();
                None
            }
            kind => {
                debug!("MatchEngine: ticket {:?} does not fit phase {:?}, ignored", kind, self.phase());
                None
            }
        }
    }

    fn is_pending(&self, pair: [Entity; 2]) -> bool {
        self.phase() == RoundPhase::Resolving && self.round.face_up == pair
    }

    fn apply_match(&mut self, pair: [Entity; 2], view: &mut dyn GameView) -> Option<ResolutionTicket> {
        view.play_sound(Sound::Match);
        self.set_pair_state(pair, CardState::Matched, view);
        self.round.face_up.clear();
        self.round.score += 1;
        self.round.can_flip = true;
        self.push_progress(view);
        debug!("MatchEngine: pair matched, score {}/{}", self.round.score, self.total_pairs());

        if self.round.score == self.total_pairs() {
            info!("MatchEngine: all {} pairs found!", self.total_pairs());
            view.play_sound(Sound::Win);
            view.set_background_audio(BackgroundAudio::Pause);
            return Some(ResolutionTicket {
                generation: self.round.generation,
                kind: TicketKind::WinNotice,
                delay_ms: self.config.win_notice_delay_ms,
            });
        }
        None
    }

    fn apply_mismatch(&mut self, pair: [Entity; 2], view: &mut dyn GameView) {
        view.play_sound(Sound::Fail);
        self.set_pair_state(pair, CardState::FaceDown, view);
        self.round.face_up.clear();
        self.round.can_flip = true;
        debug!("MatchEngine: pair missed, flipped back");
    }

    fn set_pair_state(&mut self, pair: [Entity; 2], state: CardState, view: &mut dyn GameView) {
        for entity in pair {
            if let Some(card) = self.world.get_component_mut::<Card>(entity) {
                card.state = state;
                view.set_card_visual_state(entity, state);
            }
        }
    }

    fn push_progress(&self, view: &mut dyn GameView) {
        view.set_progress_display(self.progress_fraction());
    }

    // --- 参照系 ---

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn total_pairs(&self) -> usize {
        self.config.total_pairs()
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase(self.total_pairs())
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn score(&self) -> usize {
        self.round.score
    }

    pub fn can_flip(&self) -> bool {
        self.round.can_flip
    }

    pub fn game_started(&self) -> bool {
        self.round.game_started
    }

    pub fn generation(&self) -> u64 {
        self.round.generation
    }

    pub fn face_up(&self) -> &[Entity] {
        &self.round.face_up
    }

    /// 進捗 = score / total_pairs。ペアが0個なら 0。
    pub fn progress_fraction(&self) -> f64 {
        let total = self.total_pairs();
        if total == 0 {
            0.0
        } else {
            self.round.score as f64 / total as f64
        }
    }

    pub fn card(&self, entity: Entity) -> Option<&Card> {
        self.world.get_component::<Card>(entity)
    }

    /// 配った順のエンティティ。
    pub fn dealt_entities(&self) -> &[Entity] {
        &self.dealt
    }

    /// 配った順のカード情報。
    pub fn dealt_cards(&self) -> Vec<DealtCard> {
        self.dealt
            .iter()
            .filter_map(|&entity| {
                self.card(entity).map(|card| DealtCard {
                    entity,
                    position: card.position,
                    face: card.face.clone(),
                })
            })
            .collect()
    }

    /// 全カードが成立済みか。
    pub fn all_matched(&self) -> bool {
        !self.dealt.is_empty()
            && self
                .dealt
                .iter()
                .all(|&e| self.card(e).map_or(false, Card::is_matched))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::recording::{RecordingView, ViewCall};

    fn small_config(n: usize) -> GameConfig {
        GameConfig::with_identities((0..n).map(|i| format!("face-{}", i)))
    }

    fn started(n: usize, seed: u64) -> (MatchEngine, RecordingView) {
        let mut engine = MatchEngine::with_seed(small_config(n), seed);
        let mut view = RecordingView::new();
        engine.start(&mut view);
        (engine, view)
    }

    /// 同じ絵柄の2枚を探す
    fn find_pair(engine: &MatchEngine) -> (Entity, Entity) {
        let cards = engine.dealt_cards();
        for (i, a) in cards.iter().enumerate() {
            if engine.card(a.entity).unwrap().is_revealed() {
                continue;
            }
            for b in &cards[i + 1..] {
                if a.face == b.face {
                    return (a.entity, b.entity);
                }
            }
        }
        panic!("ペアが見つからない");
    }

    /// 違う絵柄の2枚を探す
    fn find_mismatch(engine: &MatchEngine) -> (Entity, Entity) {
        let cards = engine.dealt_cards();
        let a = &cards[0];
        let b = cards.iter().find(|c| c.face != a.face).unwrap();
        (a.entity, b.entity)
    }

    fn play_pair(engine: &mut MatchEngine, view: &mut RecordingView) -> Option<ResolutionTicket> {
        let (a, b) = find_pair(engine);
        assert!(engine.select_card(a, view).is_none());
        let ticket = engine.select_card(b, view).expect("2枚目でチケットが出るはず");
        engine.resolve(ticket, view)
    }

    #[test]
    fn start_deals_face_down_board() {
        let (engine, view) = started(4, 1);
        assert_eq!(engine.dealt_entities().len(), 8);
        assert_eq!(engine.phase(), RoundPhase::Idle);
        assert_eq!(engine.generation(), 1);
        assert!(engine
            .dealt_entities()
            .iter()
            .all(|&e| engine.card(e).unwrap().state == CardState::FaceDown));

        let board = view.last_board().unwrap();
        assert_eq!(board.len(), 8);
        assert!(board.iter().enumerate().all(|(i, c)| c.position == i));
        assert_eq!(view.last_progress(), Some(0.0));
        // 最初の配りでは BGM に触らない
        assert!(view.background().is_empty());
    }

    #[test]
    fn first_selection_flips_and_starts_music_once() {
        let (mut engine, mut view) = started(4, 2);
        view.clear();
        let cards = engine.dealt_entities().to_vec();

        assert!(engine.select_card(cards[0], &mut view).is_none());
        assert_eq!(engine.phase(), RoundPhase::OneUp);
        assert_eq!(engine.card(cards[0]).unwrap().state, CardState::FaceUp);
        assert!(engine.game_started());
        assert_eq!(view.sounds(), vec![Sound::Flip]);
        assert_eq!(view.background(), vec![BackgroundAudio::Start]);
        assert!(view.calls.contains(&ViewCall::CardState(cards[0], CardState::FaceUp)));

        // 次のペア判定まで回しても BGM 開始は一回きり
        let ticket = engine.select_card(cards[1], &mut view).unwrap();
        engine.resolve(ticket, &mut view);
        engine.select_card(cards[2], &mut view);
        assert_eq!(view.background(), vec![BackgroundAudio::Start]);
    }

    #[test]
    fn second_selection_locks_input() {
        let (mut engine, mut view) = started(4, 3);
        let (a, b) = find_mismatch(&engine);
        engine.select_card(a, &mut view);
        let ticket = engine.select_card(b, &mut view).unwrap();

        assert_eq!(engine.phase(), RoundPhase::Resolving);
        assert!(!engine.can_flip());
        assert_eq!(ticket.generation, engine.generation());
        assert_eq!(ticket.kind, TicketKind::Mismatch { pair: [a, b] });
        assert_eq!(ticket.delay_ms, 1200);
    }

    #[test]
    fn selections_while_resolving_are_ignored() {
        let (mut engine, mut view) = started(4, 4);
        let (a, b) = find_mismatch(&engine);
        engine.select_card(a, &mut view);
        engine.select_card(b, &mut view).unwrap();

        let third = *engine
            .dealt_entities()
            .iter()
            .find(|&&e| e != a && e != b)
            .unwrap();
        view.clear();
        assert!(engine.select_card(third, &mut view).is_none());
        assert!(view.calls.is_empty());
        assert_eq!(engine.face_up().len(), 2);
        assert_eq!(engine.card(third).unwrap().state, CardState::FaceDown);
    }

    #[test]
    fn reselecting_face_up_card_is_a_no_op() {
        let (mut engine, mut view) = started(4, 5);
        let first = engine.dealt_entities()[0];
        engine.select_card(first, &mut view);
        view.clear();

        assert!(engine.select_card(first, &mut view).is_none());
        assert!(view.calls.is_empty());
        assert_eq!(engine.face_up(), &[first]);
        assert_eq!(engine.phase(), RoundPhase::OneUp);
    }

    #[test]
    fn reselecting_matched_card_is_a_no_op() {
        let (mut engine, mut view) = started(4, 6);
        let (a, b) = find_pair(&engine);
        engine.select_card(a, &mut view);
        let ticket = engine.select_card(b, &mut view).unwrap();
        engine.resolve(ticket, &mut view);
        view.clear();

        assert!(engine.select_card(a, &mut view).is_none());
        assert!(engine.select_card(b, &mut view).is_none());
        assert!(view.calls.is_empty());
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.phase(), RoundPhase::Idle);
    }

    #[test]
    fn unknown_entity_is_ignored() {
        let (mut engine, mut view) = started(2, 7);
        view.clear();
        assert!(engine.select_card(Entity(9_999), &mut view).is_none());
        assert!(view.calls.is_empty());
        assert!(!engine.game_started());
    }

    #[test]
    fn match_resolution_marks_pair_and_scores() {
        let (mut engine, mut view) = started(4, 8);
        let (a, b) = find_pair(&engine);
        engine.select_card(a, &mut view);
        let ticket = engine.select_card(b, &mut view).unwrap();
        assert_eq!(ticket.kind, TicketKind::Match { pair: [a, b] });
        assert_eq!(ticket.delay_ms, 500);
        view.clear();

        assert!(engine.resolve(ticket, &mut view).is_none());
        assert_eq!(engine.card(a).unwrap().state, CardState::Matched);
        assert_eq!(engine.card(b).unwrap().state, CardState::Matched);
        assert_eq!(engine.score(), 1);
        assert!(engine.face_up().is_empty());
        assert!(engine.can_flip());
        assert_eq!(view.sounds(), vec![Sound::Match]);
        assert_eq!(view.last_progress(), Some(0.25));
    }

    #[test]
    fn mismatch_resolution_flips_back_without_scoring() {
        let (mut engine, mut view) = started(4, 9);
        let (a, b) = find_mismatch(&engine);
        engine.select_card(a, &mut view);
        let ticket = engine.select_card(b, &mut view).unwrap();
        view.clear();

        assert!(engine.resolve(ticket, &mut view).is_none());
        assert_eq!(engine.card(a).unwrap().state, CardState::FaceDown);
        assert_eq!(engine.card(b).unwrap().state, CardState::FaceDown);
        assert_eq!(engine.score(), 0);
        assert!(engine.face_up().is_empty());
        assert!(engine.can_flip());
        assert_eq!(view.sounds(), vec![Sound::Fail]);
        // 点数が変わらないので進捗も送らない
        assert_eq!(view.last_progress(), None);
        assert!(view.calls.contains(&ViewCall::CardState(a, CardState::FaceDown)));
        assert!(view.calls.contains(&ViewCall::CardState(b, CardState::FaceDown)));
    }

    #[test]
    fn cat_pair_at_positions_three_and_seven() {
        let identities = [
            "cat", "dog", "owl", "fox", "bee", "ant", "cow", "pig", "hen", "elk",
        ];
        let mut engine = MatchEngine::with_seed(GameConfig::with_identities(identities), 0);
        let mut view = RecordingView::new();

        // 位置3と7に "cat"、残りは他の絵柄を2枚ずつ
        let mut deck: Vec<CardFace> = Vec::new();
        for face in identities.iter().skip(1) {
            deck.push(CardFace::new(*face));
            deck.push(CardFace::new(*face));
        }
        deck.insert(3, CardFace::new("cat"));
        deck.insert(7, CardFace::new("cat"));
        engine.deal_deck(deck, &mut view);

        let third = engine.dealt_entities()[3];
        let seventh = engine.dealt_entities()[7];
        engine.select_card(third, &mut view);
        let ticket = engine.select_card(seventh, &mut view).unwrap();
        engine.resolve(ticket, &mut view);

        assert_eq!(engine.card(third).unwrap().state, CardState::Matched);
        assert_eq!(engine.card(seventh).unwrap().state, CardState::Matched);
        assert_eq!(engine.score(), 1);
        let progress = view.last_progress().unwrap();
        assert!((progress - 0.10).abs() < 1e-9);
    }

    #[test]
    fn finishing_every_pair_wins_once() {
        let (mut engine, mut view) = started(3, 10);

        assert!(play_pair(&mut engine, &mut view).is_none());
        assert!(play_pair(&mut engine, &mut view).is_none());
        assert!(!engine.all_matched());
        view.clear();

        let notice = play_pair(&mut engine, &mut view).expect("最後のペアで勝利通知チケット");
        assert_eq!(notice.kind, TicketKind::WinNotice);
        assert_eq!(notice.delay_ms, 500);
        assert_eq!(engine.phase(), RoundPhase::Won);
        assert!(engine.all_matched());
        assert_eq!(engine.score(), engine.total_pairs());
        assert_eq!(view.sounds(), vec![Sound::Flip, Sound::Flip, Sound::Match, Sound::Win]);
        assert_eq!(view.background(), vec![BackgroundAudio::Pause]);
        assert_eq!(view.last_progress(), Some(1.0));
        assert_eq!(view.win_count(), 0);

        assert!(engine.resolve(notice, &mut view).is_none());
        assert_eq!(view.win_count(), 1);

        // 同じチケットがもう一度来ても通知は一回だけ
        engine.resolve(notice, &mut view);
        assert_eq!(view.win_count(), 1);
    }

    #[test]
    fn no_input_after_win() {
        let (mut engine, mut view) = started(1, 11);
        let notice = play_pair(&mut engine, &mut view).unwrap();
        engine.resolve(notice, &mut view);
        view.clear();

        for entity in engine.dealt_entities().to_vec() {
            assert!(engine.select_card(entity, &mut view).is_none());
        }
        assert!(view.calls.is_empty());
        assert_eq!(engine.phase(), RoundPhase::Won);
    }

    #[test]
    fn win_notice_before_win_is_ignored() {
        let (mut engine, mut view) = started(2, 12);
        let fake = ResolutionTicket {
            generation: engine.generation(),
            kind: TicketKind::WinNotice,
            delay_ms: 0,
        };
        view.clear();
        assert!(engine.resolve(fake, &mut view).is_none());
        assert_eq!(view.win_count(), 0);
    }

    #[test]
    fn reset_restores_a_fresh_round() {
        let (mut engine, mut view) = started(4, 13);
        let before: Vec<CardFace> = engine.dealt_cards().into_iter().map(|c| c.face).collect();
        let old_entities = engine.dealt_entities().to_vec();
        play_pair(&mut engine, &mut view);
        let (a, _) = find_mismatch(&engine);
        engine.select_card(a, &mut view);
        view.clear();

        engine.reset(&mut view);

        assert_eq!(engine.score(), 0);
        assert!(engine.face_up().is_empty());
        assert!(engine.can_flip());
        assert!(!engine.game_started());
        assert_eq!(engine.phase(), RoundPhase::Idle);
        assert_eq!(engine.generation(), 2);
        assert!(engine
            .dealt_entities()
            .iter()
            .all(|&e| engine.card(e).unwrap().state == CardState::FaceDown));
        // カードは作り直されて、古い ID はもう居ない
        assert!(old_entities.iter().all(|&e| engine.card(e).is_none()));

        assert_eq!(
            view.background(),
            vec![BackgroundAudio::Pause, BackgroundAudio::Rewind]
        );
        assert_eq!(view.last_board().unwrap().len(), 8);
        assert_eq!(view.last_progress(), Some(0.0));

        let after: Vec<CardFace> = engine.dealt_cards().into_iter().map(|c| c.face).collect();
        assert!(deck_is_well_formed(&after, &engine.config().identities));
        assert_ne!(before, after, "シャッフルし直されてるはず");
    }

    #[test]
    fn reset_re_arms_background_music() {
        let (mut engine, mut view) = started(2, 14);
        let first = engine.dealt_entities()[0];
        engine.select_card(first, &mut view);
        engine.reset(&mut view);
        view.clear();

        let first = engine.dealt_entities()[0];
        engine.select_card(first, &mut view);
        assert_eq!(view.background(), vec![BackgroundAudio::Start]);
    }

    #[test]
    fn reset_is_available_after_win() {
        let (mut engine, mut view) = started(1, 15);
        let notice = play_pair(&mut engine, &mut view).unwrap();
        engine.resolve(notice, &mut view);
        assert_eq!(engine.phase(), RoundPhase::Won);

        engine.reset(&mut view);
        assert_eq!(engine.phase(), RoundPhase::Idle);
        let first = engine.dealt_entities()[0];
        assert!(engine.select_card(first, &mut view).is_none());
        assert_eq!(engine.phase(), RoundPhase::OneUp);
    }

    #[test]
    fn stale_ticket_after_reset_changes_nothing() {
        let (mut engine, mut view) = started(4, 16);
        let (a, b) = find_pair(&engine);
        engine.select_card(a, &mut view);
        let stale = engine.select_card(b, &mut view).unwrap();

        engine.reset(&mut view);
        let snapshot_before = engine.snapshot();
        view.clear();

        assert!(engine.resolve(stale, &mut view).is_none());
        assert!(view.calls.is_empty());
        assert_eq!(engine.snapshot(), snapshot_before);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn stale_win_notice_after_reset_is_dropped() {
        let (mut engine, mut view) = started(1, 17);
        let notice = play_pair(&mut engine, &mut view).unwrap();
        engine.reset(&mut view);
        view.clear();
        assert!(engine.resolve(notice, &mut view).is_none());
        assert_eq!(view.win_count(), 0);
    }

    #[test]
    fn duplicated_ticket_cannot_resolve_a_later_pair() {
        let (mut engine, mut view) = started(4, 18);
        let (a, b) = find_mismatch(&engine);
        engine.select_card(a, &mut view);
        let ticket = engine.select_card(b, &mut view).unwrap();
        engine.resolve(ticket, &mut view);

        // 次の2枚をめくる
        let (c, d) = find_pair(&engine);
        engine.select_card(c, &mut view);
        engine.select_card(d, &mut view).unwrap();

        // 前のチケットがもう一回届いても、今のペアには効かない
        assert!(engine.resolve(ticket, &mut view).is_none());
        assert_eq!(engine.phase(), RoundPhase::Resolving);
        assert_eq!(engine.face_up(), &[c, d]);
    }

    #[test]
    fn progress_is_zero_for_empty_pool() {
        let (engine, view) = started(0, 19);
        assert_eq!(engine.progress_fraction(), 0.0);
        assert_eq!(view.last_progress(), Some(0.0));
        assert!(engine.dealt_entities().is_empty());
        assert!(!engine.all_matched());
    }

    #[test]
    fn face_up_never_exceeds_two() {
        let (mut engine, mut view) = started(5, 20);
        for entity in engine.dealt_entities().to_vec() {
            engine.select_card(entity, &mut view);
            assert!(engine.face_up().len() <= 2);
            assert_eq!(engine.can_flip(), engine.face_up().len() < 2);
        }
    }
}
