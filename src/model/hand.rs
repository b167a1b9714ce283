use std::str::FromStr;

use super::*;

// 入力チェック済みの手牌
// 枚数はMAX_HAND以下, 同種の牌はTILE枚以下であることを保証する
#[derive(Clone, PartialEq, Eq)]
pub struct Hand {
    table: TileTable,
    len: usize,
}

impl Hand {
    pub fn new(tiles: &[Tile]) -> Result<Self, HandError> {
        if let Some(&t) = tiles.iter().find(|t| !t.is_valid()) {
            return Err(HandError::InvalidTile(t));
        }
        Self::from_table(tiles_to_tile_table(tiles))
    }

    pub fn from_table(table: TileTable) -> Result<Self, HandError> {
        for ti in 0..TYPE {
            for ni in 0..TNUM {
                let n = table[ti][ni];
                if n == 0 {
                    continue;
                }
                let t = Tile(ti, ni);
                if !t.is_valid() {
                    return Err(HandError::InvalidTile(t));
                }
                if n > TILE {
                    return Err(HandError::TooManyCopies(t, n));
                }
            }
        }

        let len = count_tiles(&table);
        if len > MAX_HAND {
            return Err(HandError::TooManyTiles(len));
        }

        Ok(Self { table, len })
    }

    #[inline]
    pub fn table(&self) -> &TileTable {
        &self.table
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn count(&self, t: Tile) -> usize {
        self.table[t.0][t.1]
    }

    pub fn tiles(&self) -> Vec<Tile> {
        tiles_from_tile_table(&self.table)
    }
}

impl FromStr for Hand {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(&tiles_from_string(s)?)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", tiles_to_string(&self.tiles()))
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hand({}, len={})", self, self.len)
    }
}

#[test]
fn test_hand_validation() {
    let hand: Hand = "m1112345678999".parse().unwrap();
    assert_eq!(hand.len(), 13);
    assert_eq!(hand.count(Tile(TM, 1)), 3);
    assert_eq!(hand.to_string(), "m1112345678999");

    assert_eq!(
        "z11111".parse::<Hand>(),
        Err(HandError::TooManyCopies(Tile(TZ, WE), 5))
    );
    assert_eq!(
        "m111222333444555666".parse::<Hand>(),
        Err(HandError::TooManyTiles(18))
    );
    assert_eq!(Hand::new(&[Tile(TZ, 8)]), Err(HandError::InvalidTile(Tile(TZ, 8))));
    assert!(matches!("m1q".parse::<Hand>(), Err(HandError::Parse(_))));
    assert!(Hand::new(&[]).unwrap().is_empty());
}
