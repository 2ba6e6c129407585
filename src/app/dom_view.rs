// src/app/dom_view.rs
//! GameView のブラウザ実装だよ！カードの DOM を作ったり、クラスを付け替えたり、音を鳴らしたり。

use std::collections::HashMap;

use log::{debug, error, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlAudioElement, HtmlElement, HtmlImageElement, Window};

use crate::components::card::CardState;
use crate::config::game_config::WIN_MESSAGE;
use crate::ecs::entity::Entity;
use crate::view::{BackgroundAudio, DealtCard, GameView, Sound};

/// カードの DOM に付ける属性。クリックされたときにここから Entity を読み戻すよ。
pub(crate) const ENTITY_ATTRIBUTE: &str = "data-entity";
pub(crate) const CARD_FLIPPER_SELECTOR: &str = ".card-flipper";

const FLIPPED_CLASS: &str = "flipped";
const MATCHED_CLASS: &str = "matched";

/// 効果音の audio 要素。
#[derive(Clone)]
pub(crate) struct SoundBank {
    pub flip: HtmlAudioElement,
    pub matched: HtmlAudioElement,
    pub fail: HtmlAudioElement,
    pub win: HtmlAudioElement,
}

impl SoundBank {
    fn get(&self, sound: Sound) -> &HtmlAudioElement {
        match sound {
            Sound::Flip => &self.flip,
            Sound::Match => &self.matched,
            Sound::Fail => &self.fail,
            Sound::Win => &self.win,
        }
    }
}

pub(crate) struct DomView {
    window: Window,
    document: Document,
    board: Element,
    progress_bar: HtmlElement,
    bg_music: HtmlAudioElement,
    sounds: SoundBank,
    /// Entity → `.card-flipper` 要素
    cards: HashMap<Entity, Element>,
}

impl DomView {
    pub(crate) fn new(
        window: Window,
        document: Document,
        board: Element,
        progress_bar: HtmlElement,
        bg_music: HtmlAudioElement,
        sounds: SoundBank,
    ) -> Self {
        DomView {
            window,
            document,
            board,
            progress_bar,
            bg_music,
            sounds,
            cards: HashMap::new(),
        }
    }

    fn create_div(&self, class_name: &str) -> Result<Element, JsValue> {
        let div = self.document.create_element("div")?;
        div.set_class_name(class_name);
        Ok(div)
    }

    /// `.card-container > .card-flipper > (.card-front, .card-back > img)` を作って盤面に足す。
    /// 表側 (数字) は配られた位置 + 1、裏側は絵柄の画像。
    fn create_card(&self, card: &DealtCard) -> Result<Element, JsValue> {
        let container = self.create_div("card-container")?;
        let flipper = self.create_div("card-flipper")?;
        flipper.set_attribute(ENTITY_ATTRIBUTE, &card.entity.id().to_string())?;

        let front = self.create_div("card-face card-front")?;
        front.set_text_content(Some(&(card.position + 1).to_string()));

        let back = self.create_div("card-face card-back")?;
        let img = self
            .document
            .create_element("img")?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| JsValue::from_str("Failed to create img element"))?;
        img.set_src(card.face.as_str());
        back.append_child(&img)?;

        flipper.append_child(&front)?;
        flipper.append_child(&back)?;
        container.append_child(&flipper)?;
        self.board.append_child(&container)?;
        Ok(flipper)
    }

    fn try_render_board(&mut self, cards: &[DealtCard]) -> Result<(), JsValue> {
        self.board.set_inner_html("");
        self.cards.clear();
        for card in cards {
            let flipper = self.create_card(card)?;
            self.cards.insert(card.entity, flipper);
        }
        debug!("App::DomView: rendered {} cards", cards.len());
        Ok(())
    }

    fn try_set_card_state(&self, entity: Entity, state: CardState) -> Result<(), JsValue> {
        let element = self
            .cards
            .get(&entity)
            .ok_or_else(|| JsValue::from_str(&format!("No DOM element for {:?}", entity)))?;
        let class_list = element.class_list();
        match state {
            CardState::FaceDown => class_list.remove_2(FLIPPED_CLASS, MATCHED_CLASS),
            CardState::FaceUp => class_list.add_1(FLIPPED_CLASS),
            CardState::Matched => class_list.add_2(FLIPPED_CLASS, MATCHED_CLASS),
        }
    }

    fn try_set_progress(&self, fraction: f64) -> Result<(), JsValue> {
        let percentage = fraction.clamp(0.0, 1.0) * 100.0;
        self.progress_bar
            .style()
            .set_property("width", &format!("{}%", percentage))?;
        self.progress_bar
            .set_text_content(Some(&format!("{}%", percentage.round())));
        self.progress_bar
            .set_attribute("aria-valuenow", &percentage.to_string())?;
        Ok(())
    }
}

/// audio を鳴らす。play() の Promise が reject されたら (自動再生ブロックとか) warn に出すだけ。
fn play_audio(audio: &HtmlAudioElement, label: &'static str) {
    match audio.play() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                warn!("App::DomView: {} playback was prevented: {:?}", label, e);
            }
        }),
        Err(e) => warn!("App::DomView: failed to start {} playback: {:?}", label, e),
    }
}

impl GameView for DomView {
    fn render_board(&mut self, cards: &[DealtCard]) {
        if let Err(e) = self.try_render_board(cards) {
            error!("App::DomView: failed to render board: {:?}", e);
        }
    }

    fn set_card_visual_state(&mut self, entity: Entity, state: CardState) {
        if let Err(e) = self.try_set_card_state(entity, state) {
            error!("App::DomView: failed to update {:?} to {:?}: {:?}", entity, state, e);
        }
    }

    fn play_sound(&mut self, sound: Sound) {
        let audio = self.sounds.get(sound);
        // 連打しても毎回頭から鳴るように
        audio.set_current_time(0.0);
        play_audio(audio, sound.name());
    }

    fn set_background_audio(&mut self, action: BackgroundAudio) {
        match action {
            BackgroundAudio::Start => play_audio(&self.bg_music, "background music (autoplay)"),
            BackgroundAudio::Pause => {
                if let Err(e) = self.bg_music.pause() {
                    warn!("App::DomView: failed to pause background music: {:?}", e);
                }
            }
            BackgroundAudio::Rewind => self.bg_music.set_current_time(0.0),
        }
    }

    fn set_progress_display(&mut self, fraction: f64) {
        if let Err(e) = self.try_set_progress(fraction) {
            error!("App::DomView: failed to update progress bar: {:?}", e);
        }
    }

    fn notify_win(&mut self) {
        if let Err(e) = self.window.alert_with_message(WIN_MESSAGE) {
            error!("App::DomView: failed to show win message: {:?}", e);
        }
    }
}
