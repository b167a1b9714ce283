use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::hand::{calc_discards_to_tenpai, calc_tiles_to_win, is_winning_hand};
use crate::model::*;

// 聴牌していない手牌を引き直す上限
pub const MAX_ATTEMPTS: usize = 1000;

// 清一色の練習問題
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeMode {
    Ting,    // 聴牌: 何待ちか
    Discard, // 打聴: 何を切って何待ちか
}

impl ChallengeMode {
    #[inline]
    pub fn hand_size(self) -> usize {
        match self {
            ChallengeMode::Ting => 13,
            ChallengeMode::Discard => 14,
        }
    }
}

impl FromStr for ChallengeMode {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ting" | "t" => Ok(ChallengeMode::Ting),
            "discard" | "d" => Ok(ChallengeMode::Discard),
            _ => Err(TrainerError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for ChallengeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeMode::Ting => write!(f, "ting"),
            ChallengeMode::Discard => write!(f, "discard"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Ting(Vec<Tile>),
    Discard(BTreeMap<Tile, Vec<Tile>>),
}

impl Answer {
    fn is_empty(&self) -> bool {
        match self {
            Answer::Ting(v) => v.is_empty(),
            Answer::Discard(m) => m.is_empty(),
        }
    }
}

#[derive(Debug)]
pub enum TrainerError {
    InvalidMode(String),
    NoChallenge(ChallengeMode, usize),
    Hand(HandError),
}

impl fmt::Display for TrainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainerError::InvalidMode(s) => write!(f, "invalid challenge mode: {}", s),
            TrainerError::NoChallenge(m, n) => {
                write!(f, "no {} challenge found in {} attempts", m, n)
            }
            TrainerError::Hand(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TrainerError {}

impl From<HandError> for TrainerError {
    fn from(e: HandError) -> Self {
        TrainerError::Hand(e)
    }
}

#[derive(Debug, Clone)]
pub struct Challenge {
    pub mode: ChallengeMode,
    pub suit: Type,
    pub hand: Hand,
    pub answer: Answer,
}

impl Challenge {
    // 数牌から1種類を選び,その36枚から手牌を配る
    // 答えがない手牌 (打聴の場合は和了形も) は引き直す
    pub fn generate<R: Rng>(mode: ChallengeMode, rng: &mut R) -> Result<Self, TrainerError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let suit = rng.gen_range(TM..TZ);
            let mut deck = vec![];
            for ni in 1..=9 {
                for _ in 0..TILE {
                    deck.push(Tile(suit, ni));
                }
            }
            deck.shuffle(rng);
            deck.truncate(mode.hand_size());

            let hand = Hand::new(&deck)?;
            if let Some(c) = Self::from_hand(mode, hand) {
                debug!("{} challenge generated after {} attempts", mode, attempt);
                return Ok(c);
            }
        }
        Err(TrainerError::NoChallenge(mode, MAX_ATTEMPTS))
    }

    // 問題として成立しない手牌 (清一色でない, 答えがない, 和了形) の場合はNone
    pub fn from_hand(mode: ChallengeMode, hand: Hand) -> Option<Self> {
        let tiles = hand.tiles();
        let suit = tiles.first()?.0;
        if suit == TZ || tiles.iter().any(|t| t.0 != suit) || hand.len() != mode.hand_size() {
            return None;
        }

        let tt = hand.table();
        let answer = match mode {
            ChallengeMode::Ting => Answer::Ting(calc_tiles_to_win(tt)),
            ChallengeMode::Discard => {
                if is_winning_hand(tt) {
                    return None;
                }
                Answer::Discard(calc_discards_to_tenpai(tt))
            }
        };
        if answer.is_empty() {
            return None;
        }

        Some(Self {
            mode,
            suit,
            hand,
            answer,
        })
    }

    // 回答の選択肢 (問題の牌種の1~9)
    pub fn options(&self) -> Vec<Tile> {
        (1..=9).map(|ni| Tile(self.suit, ni)).collect()
    }

    // 聴牌: 待ちの牌をすべて過不足なく選択していれば正解
    // 打聴: 聴牌になる打牌を1つだけ選択していれば正解
    pub fn check(&self, selected: &[Tile]) -> bool {
        match &self.answer {
            Answer::Ting(wins) => {
                let selected: BTreeSet<Tile> = selected.iter().copied().collect();
                let wins: BTreeSet<Tile> = wins.iter().copied().collect();
                selected == wins
            }
            Answer::Discard(discards) => {
                selected.len() == 1 && discards.contains_key(&selected[0])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn tiles(exp: &str) -> Vec<Tile> {
        tiles_from_string(exp).unwrap()
    }

    #[test]
    fn test_generate() {
        let mut rng = StdRng::seed_from_u64(7);
        for mode in [ChallengeMode::Ting, ChallengeMode::Discard] {
            for _ in 0..20 {
                let c = Challenge::generate(mode, &mut rng).unwrap();
                assert_eq!(c.hand.len(), mode.hand_size());
                assert!(c.hand.tiles().iter().all(|t| t.0 == c.suit));
                assert!(c.suit != TZ);
                match &c.answer {
                    Answer::Ting(wins) => {
                        assert_eq!(mode, ChallengeMode::Ting);
                        assert_eq!(wins, &calc_tiles_to_win(c.hand.table()));
                        assert!(c.check(wins));
                    }
                    Answer::Discard(m) => {
                        assert_eq!(mode, ChallengeMode::Discard);
                        assert!(!is_winning_hand(c.hand.table()));
                        let (&d, _) = m.iter().next().unwrap();
                        assert!(c.check(&[d]));
                    }
                }
            }
        }
    }

    #[test]
    fn test_check_ting() {
        let hand = "m1112345678999".parse().unwrap();
        let c = Challenge::from_hand(ChallengeMode::Ting, hand).unwrap();
        assert_eq!(c.options(), tiles("m123456789"));
        assert!(c.check(&tiles("m123456789")));
        assert!(c.check(&tiles("m987654321")));
        assert!(!c.check(&tiles("m12345678")));
        assert!(!c.check(&[]));
    }

    #[test]
    fn test_check_discard() {
        // 和了形は打聴の問題にならない
        let hand = "p11123455678999".parse().unwrap();
        assert!(Challenge::from_hand(ChallengeMode::Discard, hand).is_none());
        // 清一色でない
        let hand = "s112345678999z11".parse().unwrap();
        assert!(Challenge::from_hand(ChallengeMode::Discard, hand).is_none());

        let hand = "s11112345567899".parse().unwrap();
        let c = Challenge::from_hand(ChallengeMode::Discard, hand).unwrap();
        let Answer::Discard(m) = &c.answer else {
            panic!("discard answer expected");
        };
        assert_eq!(m.keys().copied().collect::<Vec<_>>(), tiles("s14589"));
        assert_eq!(m[&Tile(TS, 5)], tiles("s369"));
        assert!(c.check(&tiles("s8")));
        assert!(!c.check(&tiles("s2")));
        assert!(!c.check(&tiles("s1s9")));
        assert!(!c.check(&[]));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("ting".parse::<ChallengeMode>().unwrap(), ChallengeMode::Ting);
        assert_eq!("d".parse::<ChallengeMode>().unwrap(), ChallengeMode::Discard);
        assert!("x".parse::<ChallengeMode>().is_err());
    }
}
