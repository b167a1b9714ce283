use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::parse::{Decomposition, decompose};
use super::win::{calc_discards_to_tenpai, calc_tiles_to_win};
use crate::model::*;

// 手牌の判定結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Advice {
    Empty,
    WrongSize(usize), // 3nの枚数 (相公)
    Win(Decomposition),
    Discard(BTreeMap<Tile, Vec<Tile>>), // 打牌 -> 待ち
    Waiting(Vec<Tile>),
    NotWaiting,
}

// 和了 > 打聴 (打牌で聴牌) > 聴牌 > 未聴牌 の順に判定
pub fn advise(hand: &Hand) -> Advice {
    let n = hand.len();
    if n == 0 {
        return Advice::Empty;
    }

    let tt = hand.table();
    match n % 3 {
        0 => Advice::WrongSize(n),
        2 => {
            if let Some(d) = decompose(tt) {
                return Advice::Win(d);
            }
            let discards = calc_discards_to_tenpai(tt);
            if discards.is_empty() {
                Advice::NotWaiting
            } else {
                Advice::Discard(discards)
            }
        }
        _ => {
            let wins = calc_tiles_to_win(tt);
            if wins.is_empty() {
                Advice::NotWaiting
            } else {
                Advice::Waiting(wins)
            }
        }
    }
}

fn tile_list(tiles: &[Tile]) -> String {
    let vs: Vec<String> = tiles.iter().map(|t| t.to_string()).collect();
    format!("[{}]", vs.join(", "))
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advice::Empty => write!(f, "empty hand"),
            Advice::WrongSize(n) => write!(f, "wrong tile count: {}", n),
            Advice::Win(d) => write!(f, "win: {}", d),
            Advice::Discard(m) => {
                let mut first = true;
                for (t, wins) in m {
                    if !first {
                        writeln!(f)?;
                    }
                    first = false;
                    write!(f, "discard {} -> wait {}", t, tile_list(wins))?;
                }
                Ok(())
            }
            Advice::Waiting(wins) => write!(f, "wait {}", tile_list(wins)),
            Advice::NotWaiting => write!(f, "not waiting"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advise_str(exp: &str) -> Advice {
        advise(&exp.parse().unwrap())
    }

    #[test]
    fn test_advise() {
        assert_eq!(advise(&Hand::new(&[]).unwrap()), Advice::Empty);
        assert_eq!(advise_str("m123"), Advice::WrongSize(3));
        assert!(matches!(advise_str("m123z11"), Advice::Win(_)));
        assert_eq!(
            advise_str("m1112345678999"),
            Advice::Waiting(tiles_from_string("m123456789").unwrap())
        );
        assert_eq!(advise_str("m1p5s9z1"), Advice::NotWaiting);
        assert_eq!(advise_str("m1p5s9z17"), Advice::NotWaiting);
    }

    #[test]
    fn test_advise_discard() {
        let Advice::Discard(m) = advise_str("m1235699z1") else {
            panic!("discard advice expected");
        };
        // 打z1 -> m47待ち
        assert_eq!(m[&Tile(TZ, WE)], tiles_from_string("m47").unwrap());
        assert!(m.keys().all(|t| t.0 == TM || *t == Tile(TZ, WE)));
    }

    #[test]
    fn test_advice_display() {
        assert_eq!(
            advise_str("m1112345678999").to_string(),
            "wait [m1, m2, m3, m4, m5, m6, m7, m8, m9]"
        );
        assert_eq!(advise_str("z11144").to_string(), "win: z44 z111");
        assert_eq!(
            advise_str("z11145").to_string(),
            "discard z4 -> wait [z5]\ndiscard z5 -> wait [z4]"
        );
    }

    #[test]
    fn test_advice_json() {
        let json = serde_json::to_string(&advise_str("m1p5s9z17")).unwrap();
        assert_eq!(json, r#"{"type":"not_waiting"}"#);
        let json = serde_json::to_string(&advise_str("m14")).unwrap();
        assert_eq!(json, r#"{"type":"discard","value":{"m1":["m4"],"m4":["m1"]}}"#);
        let json = serde_json::to_string(&advise_str("z1")).unwrap();
        assert_eq!(json, r#"{"type":"waiting","value":["z1"]}"#);
    }
}
