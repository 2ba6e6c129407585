// src/ecs/component.rs

/// Component（コンポーネント）トレイトだよ！
///
/// `World` に入れられるデータであることを示すマーカー。
/// `Debug` はログに出すため、`Send + Sync + 'static` は `Arc<Mutex<_>>` 越しに
/// 持ち回しても困らないようにするためのおまじない！
pub trait Component: std::fmt::Debug + Send + Sync + 'static {}
