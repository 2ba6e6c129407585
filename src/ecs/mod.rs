// src/ecs/mod.rs
//! ECS (Entity-Component-System) core implementation.
//! カードの実体 (CardInstance) はここの `World` に Entity + Component として置かれるよ。

pub mod component;
pub mod entity;
pub mod world;

// Re-export key types for easier use via `crate::ecs::X`
pub use component::Component;
pub use entity::Entity;
pub use world::World;
