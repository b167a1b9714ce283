use serde::Serialize;

use super::win::{find_sets_pair, has_extra_copy};
use crate::model::*;

// Tileは順子の場合は先頭の牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Meld {
    Triplet(Tile), // 刻子
    Run(Tile),     // 順子
}

impl Meld {
    pub fn tiles(&self) -> [Tile; 3] {
        match *self {
            Meld::Triplet(t) => [t; 3],
            Meld::Run(Tile(ti, ni)) => [Tile(ti, ni), Tile(ti, ni + 1), Tile(ti, ni + 2)],
        }
    }
}

impl std::fmt::Display for Meld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", tiles_to_string(&self.tiles()))
    }
}

// 和了形の分解 (雀頭1つ + 面子)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decomposition {
    pub pair: Tile,
    pub melds: Vec<Meld>,
}

impl Decomposition {
    // 分解に使用したすべての牌
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles = vec![self.pair, self.pair];
        for m in &self.melds {
            tiles.extend(m.tiles());
        }
        tiles.sort();
        tiles
    }
}

impl std::fmt::Display for Decomposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", tiles_to_string(&[self.pair, self.pair]))?;
        for m in &self.melds {
            write!(f, " {}", m)?;
        }
        Ok(())
    }
}

// 和了形である場合,最初に見つかった分解を返却
// is_winning_handと同じ探索順なので, is_winning_hand(hand) == decompose(hand).is_some()
pub fn decompose(hand: &TileTable) -> Option<Decomposition> {
    if count_tiles(hand) % 3 != 2 || has_extra_copy(hand) {
        return None;
    }

    let mut melds = vec![];
    let pair = find_sets_pair(hand, &mut melds)?;
    Some(Decomposition { pair, melds })
}

#[test]
fn test_decompose() {
    let hand = tiles_from_string("m123p456s789z11122").unwrap();
    let d = decompose(&tiles_to_tile_table(&hand)).unwrap();
    assert_eq!(d.pair, Tile(TZ, 2));
    assert_eq!(
        d.melds,
        vec![
            Meld::Run(Tile(TM, 1)),
            Meld::Run(Tile(TP, 4)),
            Meld::Run(Tile(TS, 7)),
            Meld::Triplet(Tile(TZ, 1)),
        ]
    );
    let mut sorted = hand.clone();
    sorted.sort();
    assert_eq!(d.tiles(), sorted);
    assert_eq!(d.to_string(), "z22 m123 p456 s789 z111");
}

#[test]
fn test_decompose_prefers_triplet() {
    // 三連刻は刻子3つとして分解される
    let hand = tiles_from_string("m11122233355").unwrap();
    let d = decompose(&tiles_to_tile_table(&hand)).unwrap();
    assert_eq!(d.pair, Tile(TM, 5));
    assert_eq!(
        d.melds,
        vec![
            Meld::Triplet(Tile(TM, 1)),
            Meld::Triplet(Tile(TM, 2)),
            Meld::Triplet(Tile(TM, 3)),
        ]
    );
}

#[test]
fn test_decompose_not_win() {
    assert_eq!(decompose(&tiles_to_tile_table(&tiles_from_string("m1245").unwrap())), None);
    assert_eq!(decompose(&TileTable::default()), None);
}
