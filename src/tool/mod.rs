// 手牌判定を利用する練習問題と点数計算のモジュール
pub mod challenge;
pub mod counter;

pub use challenge::{Answer, Challenge, ChallengeMode, TrainerError};
pub use counter::{Counter, CounterError, Player, Stake, Transfer};
