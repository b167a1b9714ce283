use std::str::FromStr;

use serde::{de, ser};

use super::*;

const TYPE_CHARS: [char; TYPE] = ['m', 'p', 's', 'z'];
const SUIT_NAMES: [char; 3] = ['萬', '筒', '條'];
const HONOR_NAMES: [char; ZNUM] = ['東', '南', '西', '北', '白', '發', '中'];

// (種別, 数字) の順に比較すると 萬子 < 筒子 < 索子 < 字牌, 1 < ... < 9 になる
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)

impl Tile {
    // 34種すべての牌を順番に返却
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..TYPE).flat_map(|ti| (1..=max_tnum(ti)).map(move |ni| Tile(ti, ni)))
    }

    pub fn from_symbol(s: &str) -> Result<Self, ParseError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(ParseError::InvalidTile(s.to_string()));
        }
        let ti = tile_type_from_char(chars[0]).ok_or(ParseError::InvalidChar(chars[0]))?;
        let ni = chars[1].to_digit(10).ok_or(ParseError::InvalidChar(chars[1]))? as Tnum;
        Self::checked(ti, ni).ok_or_else(|| ParseError::InvalidTile(s.to_string()))
    }

    // "1萬", "9條", "東", "中" 形式
    pub fn from_name(s: &str) -> Result<Self, ParseError> {
        let chars: Vec<char> = s.chars().collect();
        match chars.as_slice() {
            [c] => HONOR_NAMES
                .iter()
                .position(|h| h == c)
                .map(|i| Tile(TZ, i + 1))
                .ok_or(ParseError::InvalidChar(*c)),
            [n, c] => {
                let ti = SUIT_NAMES
                    .iter()
                    .position(|x| x == c)
                    .ok_or(ParseError::InvalidChar(*c))?;
                let ni = n.to_digit(10).ok_or(ParseError::InvalidChar(*n))? as Tnum;
                Self::checked(ti, ni).ok_or_else(|| ParseError::InvalidTile(s.to_string()))
            }
            _ => Err(ParseError::InvalidTile(s.to_string())),
        }
    }

    #[inline]
    pub fn checked(ti: Type, ni: Tnum) -> Option<Self> {
        if ti < TYPE && 1 <= ni && ni <= max_tnum(ti) {
            Some(Self(ti, ni))
        } else {
            None
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        Self::checked(self.0, self.1).is_some()
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // 字牌
    #[inline]
    pub fn is_honor(&self) -> bool {
        self.0 == TZ
    }

    // 順子の先頭になれる牌 (数牌の1~7)
    #[inline]
    pub fn can_start_run(&self) -> bool {
        self.is_suit() && self.1 <= 7
    }

    // 存在しない牌は"?"
    pub fn name(&self) -> String {
        if !self.is_valid() {
            "?".to_string()
        } else if self.is_honor() {
            HONOR_NAMES[self.1 - 1].to_string()
        } else {
            format!("{}{}", self.1, SUIT_NAMES[self.0])
        }
    }
}

#[inline]
fn max_tnum(ti: Type) -> Tnum {
    if ti == TZ { ZNUM } else { 9 }
}

fn tile_type_from_char(c: char) -> Option<Type> {
    TYPE_CHARS.iter().position(|&x| x == c)
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = TYPE_CHARS.get(self.0).copied().unwrap_or('?');
        write!(f, "{}{}", c, self.1)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Tile {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_ascii() {
            Self::from_symbol(s)
        } else {
            Self::from_name(s)
        }
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// [TileTable]
// 牌の種類ごとの枚数. 数字部分のindex 0は使用しない
pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

// 存在しない牌は無視する (検証はHand::newで行う)
pub fn tiles_to_tile_table(tiles: &[Tile]) -> TileTable {
    let mut tt = TileTable::default();
    for &t in tiles.iter().filter(|t| t.is_valid()) {
        tt[t.0][t.1] += 1;
    }
    tt
}

// 牌の順番に並べたリストを返却
pub fn tiles_from_tile_table(tt: &TileTable) -> Vec<Tile> {
    let mut tiles = vec![];
    for t in Tile::all() {
        for _ in 0..tt[t.0][t.1] {
            tiles.push(t);
        }
    }
    tiles
}

pub fn count_tiles(tt: &TileTable) -> usize {
    tt.iter().map(|tr| tr.iter().sum::<usize>()).sum()
}

// "m123p456z77" 形式 または "1萬 2萬 東" 形式の牌のリストをパース
pub fn tiles_from_string(exp: &str) -> Result<Vec<Tile>, ParseError> {
    if exp.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    if !exp.is_ascii() {
        return tiles_from_names(exp);
    }

    let mut tiles = vec![];
    let mut ti = None;
    for c in exp.chars() {
        match c {
            'm' | 'p' | 's' | 'z' => ti = tile_type_from_char(c),
            '0'..='9' => {
                let t = ti.ok_or(ParseError::MissingType(c))?;
                let ni = c as usize - '0' as usize;
                let tile = Tile::checked(t, ni)
                    .ok_or_else(|| ParseError::InvalidTile(format!("{}{}", TYPE_CHARS[t], c)))?;
                tiles.push(tile);
            }
            ' ' | ',' => {}
            _ => return Err(ParseError::InvalidChar(c)),
        }
    }
    Ok(tiles)
}

fn tiles_from_names(exp: &str) -> Result<Vec<Tile>, ParseError> {
    let mut tiles = vec![];
    let mut buf = String::new();
    for c in exp.chars() {
        match c {
            ' ' | ',' | '、' => continue,
            '0'..='9' => buf.push(c),
            _ => {
                buf.push(c);
                tiles.push(Tile::from_name(&buf)?);
                buf.clear();
            }
        }
    }
    if let Some(c) = buf.chars().next() {
        return Err(ParseError::MissingType(c));
    }
    Ok(tiles)
}

// 牌種ごとにまとめた "m123p456z77" 形式の文字列を返却
pub fn tiles_to_string(tiles: &[Tile]) -> String {
    let mut tiles = tiles.to_vec();
    tiles.sort();
    let mut s = String::new();
    let mut last = None;
    for t in tiles {
        if last != Some(t.0) {
            s.push(TYPE_CHARS.get(t.0).copied().unwrap_or('?'));
            last = Some(t.0);
        }
        s.push_str(&t.1.to_string());
    }
    s
}

#[test]
fn test_tile_order() {
    let tiles: Vec<Tile> = Tile::all().collect();
    assert_eq!(tiles.len(), KIND);
    assert_eq!(tiles[0], Tile(TM, 1));
    assert_eq!(tiles[KIND - 1], Tile(TZ, DR));
    assert!(tiles.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_tile_names() {
    assert_eq!("1萬".parse::<Tile>(), Ok(Tile(TM, 1)));
    assert_eq!("9條".parse::<Tile>(), Ok(Tile(TS, 9)));
    assert_eq!("東".parse::<Tile>(), Ok(Tile(TZ, WE)));
    assert_eq!("中".parse::<Tile>(), Ok(Tile(TZ, DR)));
    assert_eq!(Tile(TP, 5).name(), "5筒");
    assert_eq!(Tile(TZ, DG).name(), "發");
    assert_eq!(Tile(5, 0).name(), "?");
    assert!("z8".parse::<Tile>().is_err());
    assert!("m0".parse::<Tile>().is_err());
}

#[test]
fn test_tiles_from_string() {
    let tiles = tiles_from_string("m123z11").unwrap();
    assert_eq!(
        tiles,
        vec![Tile(TM, 1), Tile(TM, 2), Tile(TM, 3), Tile(TZ, 1), Tile(TZ, 1)]
    );
    assert_eq!(tiles_from_string("1萬 2萬 3萬 東 東").unwrap(), tiles);
    assert_eq!(tiles_from_string("123"), Err(ParseError::MissingType('1')));
    assert_eq!(tiles_from_string("m1x"), Err(ParseError::InvalidChar('x')));
    assert_eq!(tiles_from_string(""), Err(ParseError::Empty));
}

#[test]
fn test_tiletable() {
    let hand = tiles_from_string("m111p23z7s789").unwrap();
    let tt = tiles_to_tile_table(&hand);
    assert_eq!(count_tiles(&tt), 9);
    let mut sorted = hand.clone();
    sorted.sort();
    assert_eq!(tiles_from_tile_table(&tt), sorted);
    assert_eq!(tiles_to_string(&hand), "m111p23s789z7");
    let tt = tiles_to_tile_table(&[Tile(5, 0), Tile(TZ, 8), Tile(TM, 1)]);
    assert_eq!(tiles_from_tile_table(&tt), vec![Tile(TM, 1)]);
}

#[test]
fn test_tile_serde() {
    let json = serde_json::to_string(&vec![Tile(TM, 1), Tile(TZ, WN)]).unwrap();
    assert_eq!(json, r#"["m1","z4"]"#);
    let tiles: Vec<Tile> = serde_json::from_str(r#"["p9","白"]"#).unwrap();
    assert_eq!(tiles, vec![Tile(TP, 9), Tile(TZ, DW)]);
}
