#![warn(rust_2018_idioms)]
// 構造的な意味合いや一貫性を保つために以下の警告は無効化
#![allow(clippy::needless_range_loop)]
#![allow(clippy::manual_range_contains)]

// 台湾麻雀の手牌判定 (和了, 聴牌, 打聴) と練習問題, 点数計算
pub mod hand;
pub mod model;
pub mod tool;
pub mod util;
