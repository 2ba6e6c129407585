// src/app/timer.rs
//! MatchEngine が返した判定チケットを `setTimeout` で後から戻してあげる係。

use std::sync::Arc;

use log::{debug, error};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::window;

use crate::app::session::{lock_session, SharedSession};
use crate::systems::match_system::ResolutionTicket;

/// `ticket.delay_ms` 後に `resolve` を呼ぶ。続きのチケットが出たらそれも予約する。
///
/// タイマーは取り消さない。リセット後に鳴った古いチケットはエンジン側が世代番号で捨てる。
pub(crate) fn schedule_ticket(session: &SharedSession, ticket: ResolutionTicket) -> Result<(), JsValue> {
    let window = window().ok_or("Failed to get window")?;
    let session_clone = Arc::clone(session);

    let callback = Closure::once_into_js(move || {
        // ロックは resolve の間だけ
        let follow_up = lock_session(&session_clone).resolve(ticket);
        if let Some(next) = follow_up {
            if let Err(e) = schedule_ticket(&session_clone, next) {
                error!("App::Timer: failed to schedule follow-up ticket: {:?}", e);
            }
        }
    });

    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref::<js_sys::Function>(),
        ticket.delay_ms as i32,
    )?;
    debug!("App::Timer: scheduled {:?} in {}ms", ticket.kind, ticket.delay_ms);
    Ok(())
}

/// 予約に失敗したらログに出すだけ (イベントハンドラの中から呼ぶ用)。
pub(crate) fn schedule_or_log(session: &SharedSession, ticket: Option<ResolutionTicket>) {
    if let Some(ticket) = ticket {
        if let Err(e) = schedule_ticket(session, ticket) {
            error!("App::Timer: failed to schedule ticket {:?}: {:?}", ticket, e);
        }
    }
}

