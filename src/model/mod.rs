// 麻雀のデータモデル
mod define;
mod error;
mod hand;
mod tile;

use std::fmt;

pub use define::*;
pub use error::*;
pub use hand::*;
pub use tile::*;
