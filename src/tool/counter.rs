use std::fmt;
use std::str::FromStr;

use log::debug;
use crate::model::*;

pub const DEFAULT_NAMES: [&str; SEAT] = ["東家", "南家", "西家", "北方玩家"];

// 底 / 台
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stake {
    pub base: Point,
    pub tai: Point,
}

impl Default for Stake {
    fn default() -> Self {
        Self { base: 100, tai: 20 }
    }
}

impl FromStr for Stake {
    type Err = CounterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CounterError::InvalidStake(s.to_string());
        let (base, tai) = s.split_once('/').ok_or_else(invalid)?;
        let base: Point = base.trim().parse().map_err(|_| invalid())?;
        let tai: Point = tai.trim().parse().map_err(|_| invalid())?;
        if base < 0 || tai < 0 {
            return Err(invalid());
        }
        Ok(Self { base, tai })
    }
}

impl fmt::Display for Stake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.tai)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub score: Point,
}

// 精算時の支払い (from -> to)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub from: Seat,
    pub to: Seat,
    pub amount: Point,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterError {
    InvalidSeat(Seat),
    SameSeat(Seat),
    InvalidStake(String),
    Overflow(usize), // 点数が表現できない台数
}

impl fmt::Display for CounterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterError::InvalidSeat(s) => write!(f, "invalid seat: {}", s),
            CounterError::SameSeat(s) => write!(f, "winner and loser are the same seat: {}", s),
            CounterError::InvalidStake(s) => write!(f, "invalid stake (base/tai): '{}'", s),
            CounterError::Overflow(tai) => write!(f, "too many tai: {}", tai),
        }
    }
}

impl std::error::Error for CounterError {}

// 台湾麻雀の点数計算 (4人)
#[derive(Debug, Clone)]
pub struct Counter {
    stake: Stake,
    players: [Player; SEAT],
}

impl Counter {
    pub fn new(stake: Stake) -> Self {
        Self::with_names(stake, &[])
    }

    // 名前が指定されていない座席はデフォルトの名前を使用
    pub fn with_names(stake: Stake, names: &[&str]) -> Self {
        let players = std::array::from_fn(|s| {
            let name = match names.get(s) {
                Some(n) if !n.is_empty() => n.to_string(),
                _ => DEFAULT_NAMES[s].to_string(),
            };
            Player { name, score: 0 }
        });
        Self { stake, players }
    }

    #[inline]
    pub fn stake(&self) -> Stake {
        self.stake
    }

    #[inline]
    pub fn players(&self) -> &[Player; SEAT] {
        &self.players
    }

    pub fn scores(&self) -> [Point; SEAT] {
        std::array::from_fn(|s| self.players[s].score)
    }

    // 底 + 台数 * 台 (オーバーフローする場合はエラー)
    fn payment(&self, tai: usize, extra: Point) -> Result<Point, CounterError> {
        Point::try_from(tai)
            .ok()
            .and_then(|t| t.checked_add(extra))
            .and_then(|t| t.checked_mul(self.stake.tai))
            .and_then(|p| p.checked_add(self.stake.base))
            .ok_or(CounterError::Overflow(tai))
    }

    // すべての点数が計算できてから更新する
    fn apply(&mut self, deltas: [Point; SEAT], tai: usize) -> Result<(), CounterError> {
        let mut scores = self.scores();
        for s in 0..SEAT {
            scores[s] = scores[s]
                .checked_add(deltas[s])
                .ok_or(CounterError::Overflow(tai))?;
        }
        for s in 0..SEAT {
            self.players[s].score = scores[s];
        }
        Ok(())
    }

    fn check_seat(seat: Seat) -> Result<(), CounterError> {
        if seat < SEAT {
            Ok(())
        } else {
            Err(CounterError::InvalidSeat(seat))
        }
    }

    // 自摸: 和了者以外の全員が 底 + 台数 * 台 を支払う
    // 莊家は支払いに1台を加算, 莊家の自摸は台数に1台を加算
    // 和了者の獲得点数を返却
    pub fn self_drawn(
        &mut self,
        winner: Seat,
        dealer: Seat,
        tai: usize,
    ) -> Result<Point, CounterError> {
        Self::check_seat(winner)?;
        Self::check_seat(dealer)?;

        let bonus = if winner == dealer { 1 } else { 0 };
        let mut payments = [0; SEAT];
        for s in 0..SEAT {
            if s == winner {
                continue;
            }
            let extra = if s == dealer { bonus + 1 } else { bonus };
            payments[s] = self.payment(tai, extra)?;
        }
        let win = payments
            .iter()
            .try_fold(0 as Point, |acc, &p| acc.checked_add(p))
            .ok_or(CounterError::Overflow(tai))?;

        let mut deltas = payments.map(|p| -p);
        deltas[winner] = win;
        self.apply(deltas, tai)?;

        debug!("self drawn: seat={} dealer={} tai={} win={}", winner, dealer, tai, win);
        Ok(win)
    }

    // 胡 (放槍): 放槍者のみが 底 + 台数 * 台 を支払う
    pub fn discard_win(
        &mut self,
        winner: Seat,
        loser: Seat,
        tai: usize,
    ) -> Result<Point, CounterError> {
        Self::check_seat(winner)?;
        Self::check_seat(loser)?;
        if winner == loser {
            return Err(CounterError::SameSeat(winner));
        }

        let payment = self.payment(tai, 0)?;
        let mut deltas = [0; SEAT];
        deltas[loser] = -payment;
        deltas[winner] = payment;
        self.apply(deltas, tai)?;

        debug!("discard win: seat={} loser={} tai={} payment={}", winner, loser, tai, payment);
        Ok(payment)
    }

    // 点数の高い順の座席 (同点の場合は座席順)
    pub fn ranking(&self) -> Vec<Seat> {
        let mut seats: Vec<Seat> = (0..SEAT).collect();
        seats.sort_by(|&a, &b| self.players[b].score.cmp(&self.players[a].score));
        seats
    }

    // 精算: 負けの大きい順に勝ちの大きい順へ支払う
    pub fn settle(&self) -> Vec<Transfer> {
        let mut winners: Vec<(Seat, Point)> = self
            .ranking()
            .into_iter()
            .map(|s| (s, self.players[s].score))
            .filter(|&(_, p)| p > 0)
            .collect();
        let mut losers: Vec<(Seat, Point)> = (0..SEAT)
            .map(|s| (s, -self.players[s].score))
            .filter(|&(_, p)| p > 0)
            .collect();
        losers.sort_by(|a, b| b.1.cmp(&a.1));

        let mut res = vec![];
        let (mut i, mut j) = (0, 0);
        while i < losers.len() && j < winners.len() {
            let amount = losers[i].1.min(winners[j].1);
            if amount > 0 {
                res.push(Transfer {
                    from: losers[i].0,
                    to: winners[j].0,
                    amount,
                });
                losers[i].1 -= amount;
                winners[j].1 -= amount;
            }
            if losers[i].1 == 0 {
                i += 1;
            }
            if winners[j].1 == 0 {
                j += 1;
            }
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stake_from_str() {
        assert_eq!("100/20".parse(), Ok(Stake { base: 100, tai: 20 }));
        assert_eq!(" 50 / 10 ".parse(), Ok(Stake { base: 50, tai: 10 }));
        assert!("100".parse::<Stake>().is_err());
        assert!("a/20".parse::<Stake>().is_err());
        assert!("-1/20".parse::<Stake>().is_err());
    }

    #[test]
    fn test_default_names() {
        let c = Counter::with_names(Stake::default(), &["A", ""]);
        let names: Vec<&str> = c.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "南家", "西家", "北方玩家"]);
    }

    #[test]
    fn test_self_drawn_by_dealer() {
        let mut c = Counter::new(Stake { base: 100, tai: 20 });
        // 莊家の自摸: 2台 + 1台
        assert_eq!(c.self_drawn(0, 0, 2), Ok(480));
        assert_eq!(c.scores(), [480, -160, -160, -160]);
    }

    #[test]
    fn test_self_drawn_by_non_dealer() {
        let mut c = Counter::new(Stake { base: 100, tai: 20 });
        // 莊家は1台多く支払う
        assert_eq!(c.self_drawn(1, 0, 2), Ok(440));
        assert_eq!(c.scores(), [-160, 440, -140, -140]);
    }

    #[test]
    fn test_discard_win() {
        let mut c = Counter::new(Stake { base: 100, tai: 20 });
        assert_eq!(c.discard_win(2, 3, 5), Ok(200));
        assert_eq!(c.scores(), [0, 0, 200, -200]);
        assert_eq!(c.discard_win(2, 2, 1), Err(CounterError::SameSeat(2)));
        assert_eq!(c.discard_win(4, 2, 1), Err(CounterError::InvalidSeat(4)));
        assert_eq!(c.self_drawn(0, 9, 1), Err(CounterError::InvalidSeat(9)));
        assert_eq!(c.scores(), [0, 0, 200, -200]);
    }

    #[test]
    fn test_too_many_tai() {
        let mut c = Counter::new(Stake { base: 100, tai: 20 });
        assert_eq!(c.discard_win(0, 1, usize::MAX), Err(CounterError::Overflow(usize::MAX)));
        assert_eq!(c.self_drawn(0, 1, 1 << 61), Err(CounterError::Overflow(1 << 61)));
        // 各支払いは表現できるが合計がオーバーフローする
        let tai = (Point::MAX / 20 / 2) as usize;
        assert_eq!(c.self_drawn(0, 1, tai), Err(CounterError::Overflow(tai)));
        assert_eq!(c.scores(), [0; SEAT]);

        c.discard_win(0, 1, 1000).unwrap();
        assert_eq!(c.scores(), [20100, -20100, 0, 0]);

        // 累積した点数のオーバーフロー
        let tai = (Point::MAX / 20 - 100) as usize;
        assert!(c.discard_win(0, 1, tai).is_err());
        assert_eq!(c.scores(), [20100, -20100, 0, 0]);
    }

    #[test]
    fn test_settle() {
        let mut c = Counter::new(Stake { base: 100, tai: 20 });
        assert!(c.settle().is_empty());

        c.self_drawn(1, 0, 2).unwrap();
        assert_eq!(
            c.settle(),
            vec![
                Transfer { from: 0, to: 1, amount: 160 },
                Transfer { from: 2, to: 1, amount: 140 },
                Transfer { from: 3, to: 1, amount: 140 },
            ]
        );

        // [-160, 440, -140, -140] + 放槍 1 -> 3 (300)
        c.discard_win(3, 1, 10).unwrap();
        assert_eq!(c.scores(), [-160, 140, -140, 160]);
        assert_eq!(c.ranking(), vec![3, 1, 2, 0]);
        assert_eq!(
            c.settle(),
            vec![
                Transfer { from: 0, to: 3, amount: 160 },
                Transfer { from: 2, to: 1, amount: 140 },
            ]
        );
    }

    #[test]
    fn test_settle_is_complete() {
        let mut c = Counter::new(Stake { base: 30, tai: 10 });
        c.self_drawn(2, 1, 3).unwrap();
        c.discard_win(0, 2, 7).unwrap();
        c.self_drawn(3, 3, 0).unwrap();
        c.discard_win(1, 0, 1).unwrap();

        let mut scores = c.scores();
        assert_eq!(scores.iter().sum::<Point>(), 0);
        for t in c.settle() {
            assert!(t.amount > 0);
            scores[t.from] += t.amount;
            scores[t.to] -= t.amount;
        }
        assert_eq!(scores, [0; SEAT]);
    }
}
