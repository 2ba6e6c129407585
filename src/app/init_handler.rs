// src/app/init_handler.rs
//! 起動時に DOM から要素を拾ってきて、ゲームの部品を組み立てるロジック。

use log::info;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Document, Element, HtmlAudioElement, HtmlElement, Window};

use crate::app::dom_view::{DomView, SoundBank};
use crate::config::game_config::{
    BG_MUSIC_ID, FAIL_SOUND_ID, FLIP_SOUND_ID, GAME_BOARD_ID, MATCH_SOUND_ID, PROGRESS_BAR_ID,
    RESET_BUTTON_ID, WIN_SOUND_ID,
};

/// HTML 側に用意しておいてもらう要素たち。
pub(crate) struct DomElements {
    pub window: Window,
    pub document: Document,
    pub board: Element,
    pub progress_bar: HtmlElement,
    pub reset_button: Element,
    pub bg_music: HtmlAudioElement,
    pub sounds: SoundBank,
}

/// id で要素を探して、欲しい型にキャストする。見つからなければエラー。
fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Element #{} not found", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{} has an unexpected type", id)))
}

/// ページから必要な要素を全部集める。
pub(crate) fn collect_elements() -> Result<DomElements, JsValue> {
    let window = window().ok_or("Failed to get window")?;
    let document = window.document().ok_or("Failed to get document")?;

    let elements = DomElements {
        board: element_by_id(&document, GAME_BOARD_ID)?,
        progress_bar: element_by_id(&document, PROGRESS_BAR_ID)?,
        reset_button: element_by_id(&document, RESET_BUTTON_ID)?,
        bg_music: element_by_id(&document, BG_MUSIC_ID)?,
        sounds: SoundBank {
            flip: element_by_id(&document, FLIP_SOUND_ID)?,
            matched: element_by_id(&document, MATCH_SOUND_ID)?,
            fail: element_by_id(&document, FAIL_SOUND_ID)?,
            win: element_by_id(&document, WIN_SOUND_ID)?,
        },
        window,
        document,
    };
    info!("App::Init: all DOM elements found");
    Ok(elements)
}

/// 集めた要素から DomView を作る。
pub(crate) fn build_view(elements: &DomElements) -> DomView {
    DomView::new(
        elements.window.clone(),
        elements.document.clone(),
        elements.board.clone(),
        elements.progress_bar.clone(),
        elements.bg_music.clone(),
        elements.sounds.clone(),
    )
}
