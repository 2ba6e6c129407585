// src/app/browser_event_manager.rs
//! Attaches the click listeners (card board, reset button) that drive the game.

use std::sync::Arc;

use log::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

use crate::app::dom_view::{CARD_FLIPPER_SELECTOR, ENTITY_ATTRIBUTE};
use crate::app::session::{lock_session, SharedSession};
use crate::app::timer;
use crate::ecs::entity::Entity;

pub(crate) type EventClosure = Closure<dyn FnMut(Event)>;

/// クリックされた要素から、どのカードかを読み取る。
/// カードの中の img や数字をクリックしても、親の `.card-flipper` まで遡るよ。
fn entity_from_event(event: &Event) -> Option<Entity> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let flipper = target.closest(CARD_FLIPPER_SELECTOR).ok()??;
    let raw = flipper.get_attribute(ENTITY_ATTRIBUTE)?;
    raw.parse::<usize>().ok().map(Entity)
}

/// 盤面に click リスナーを1つだけ付ける (イベント委譲)。
/// カードを作り直しても付け直さなくていい！
pub(crate) fn attach_board_listener(
    board: &Element,
    session: &SharedSession,
) -> Result<EventClosure, JsValue> {
    let session_clone = Arc::clone(session);
    let closure = Closure::wrap(Box::new(move |event: Event| {
        let Some(entity) = entity_from_event(&event) else {
            debug!("App::Events: click outside of any card");
            return;
        };
        let ticket = lock_session(&session_clone).select_card(entity);
        timer::schedule_or_log(&session_clone, ticket);
    }) as Box<dyn FnMut(Event)>);

    board.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    info!("App::Events: attached board click listener");
    Ok(closure)
}

/// リセットボタン。
pub(crate) fn attach_reset_listener(
    button: &Element,
    session: &SharedSession,
) -> Result<EventClosure, JsValue> {
    let session_clone = Arc::clone(session);
    let closure = Closure::wrap(Box::new(move |_event: Event| {
        lock_session(&session_clone).reset();
    }) as Box<dyn FnMut(Event)>);

    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    info!("App::Events: attached reset listener");
    Ok(closure)
}
