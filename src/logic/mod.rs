// src/logic/mod.rs
//! デッキづくりなど、状態を持たない純粋なロジック。

pub mod deck;
