// src/app/state_getter.rs
//! Gets the current round from the session and converts it to JSON.

use log::{debug, error};
use wasm_bindgen::JsValue;

use crate::app::session::{lock_session, SharedSession};

/// 盤面のスナップショットを JSON 文字列にして返すよ。裏向きの絵柄は入らない。
pub(crate) fn get_state_json(session: &SharedSession) -> Result<JsValue, JsValue> {
    let snapshot = lock_session(session).snapshot();
    match snapshot.to_json() {
        Ok(json) => {
            debug!("App::State: serialized {} cards", snapshot.cards.len());
            Ok(JsValue::from_str(&json))
        }
        Err(e) => {
            let error_msg = format!("Failed to serialize board snapshot: {}", e);
            error!("{}", error_msg);
            Err(JsValue::from_str(&error_msg))
        }
    }
}
