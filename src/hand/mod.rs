// 手牌の和了判定, 待ち計算, 打牌候補の計算を行うモジュール
mod advice;
mod parse;
mod win;

pub use self::{
    advice::{Advice, advise},
    parse::{Decomposition, Meld, decompose},
    win::{calc_discards_to_tenpai, calc_mods_cnts, calc_tiles_to_win, is_winning_hand},
};
