// src/ecs/entity.rs

use serde::{Deserialize, Serialize};

/// Entity（エンティティ）は、場に配られたカード1枚を指すただの ID だよ！
///
/// DOM の要素そのものをハンドルにするんじゃなくて、この番号で
/// `World` の中の `Card` コンポーネントを引くようにしてるんだ。
/// JS 側には `entity.0` (usize) で渡して、クリックされたら同じ番号で返してもらう感じ！
#[derive(
    PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize,
)]
pub struct Entity(pub usize);

impl Entity {
    /// JS とやり取りするときの生の番号。
    pub fn id(self) -> usize {
        self.0
    }
}
