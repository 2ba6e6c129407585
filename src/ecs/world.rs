// src/ecs/world.rs

// TypeId をキーにして、型ごとのコンポーネント倉庫を Box<dyn Any> で持つよ。
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use log::trace;

use crate::ecs::component::Component;
use crate::ecs::entity::Entity;

/// コンポーネント倉庫と、その型専用のお掃除関数をまとめたもの。
/// `destroy_entity` は倉庫の中身の型を知らなくても `remover` を呼ぶだけで片付けられる！🧹
struct ComponentStoreEntry {
    /// 実体は `HashMap<Entity, T>`。型消去して持つ。
    storage: Box<dyn Any>,
    remover: fn(&mut Box<dyn Any>, Entity),
}

impl ComponentStoreEntry {
    fn new<T: Component>() -> Self {
        let remover: fn(&mut Box<dyn Any>, Entity) = |storage_any, entity| {
            if let Some(storage) = storage_any.downcast_mut::<HashMap<Entity, T>>() {
                storage.remove(&entity);
            }
        };
        Self {
            storage: Box::new(HashMap::<Entity, T>::new()),
            remover,
        }
    }
}

/// 場に出ている全エンティティとコンポーネントを管理する World (自作ECSのコア！)。
///
/// このゲームではカード1枚 = エンティティ1つ。リセットのたびに
/// 古いカードは `destroy_entity` で全部消して、新しい ID で作り直すよ。
/// ID は使い回さないから、前のラウンドの Entity が新しいカードを指しちゃうことはない！
pub struct World {
    entities: HashSet<Entity>,
    next_entity_id: usize,
    component_stores: HashMap<TypeId, ComponentStoreEntry>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        World {
            entities: HashSet::new(),
            next_entity_id: 0,
            component_stores: HashMap::new(),
        }
    }

    /// 新しいエンティティを発行して生存リストに入れる。
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.insert(entity);
        trace!("World: Created entity with ID {}", entity.0);
        entity
    }

    pub fn is_entity_alive(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// エンティティを削除する。くっついてたコンポーネントも全種類まとめて消えるよ！
    ///
    /// 存在しないエンティティなら `false`。
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.remove(&entity) {
            trace!("World: Attempted to destroy non-existent entity with ID {}", entity.0);
            return false;
        }
        for entry in self.component_stores.values_mut() {
            (entry.remover)(&mut entry.storage, entity);
        }
        trace!("World: Destroyed entity with ID {}", entity.0);
        true
    }

    /// コンポーネント型 T の倉庫を用意する。二回呼んでも中身は消さない。
    pub fn register_component<T: Component>(&mut self) {
        self.component_stores
            .entry(TypeId::of::<T>())
            .or_insert_with(ComponentStoreEntry::new::<T>);
        trace!("World: Registered component type {}", std::any::type_name::<T>());
    }

    /// エンティティにコンポーネントを付ける (上書き)。
    /// 生きてないエンティティには何もしない。倉庫がまだ無ければその場で作る。
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        if !self.is_entity_alive(entity) {
            trace!("World: add_component ignored for dead entity {}", entity.0);
            return;
        }
        let entry = self
            .component_stores
            .entry(TypeId::of::<T>())
            .or_insert_with(ComponentStoreEntry::new::<T>);
        if let Some(storage) = entry.storage.downcast_mut::<HashMap<Entity, T>>() {
            storage.insert(entity, component);
        }
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.is_entity_alive(entity) {
            return None;
        }
        self.component_stores
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.storage.downcast_ref::<HashMap<Entity, T>>())
            .and_then(|storage| storage.get(&entity))
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.is_entity_alive(entity) {
            return None;
        }
        self.component_stores
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.storage.downcast_mut::<HashMap<Entity, T>>())
            .and_then(|storage| storage.get_mut(&entity))
    }

    /// T を持っている生きたエンティティを全部返す。順番は保証しないので、
    /// 並び順が要るときは呼び出し側でソートしてね。
    pub fn get_all_entities_with_component<T: Component>(&self) -> Vec<Entity> {
        self.component_stores
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.storage.downcast_ref::<HashMap<Entity, T>>())
            .map(|storage| {
                storage
                    .keys()
                    .copied()
                    .filter(|e| self.is_entity_alive(*e))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 生存中のエンティティ数。
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}
