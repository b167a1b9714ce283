use std::collections::BTreeMap;

use log::{debug, trace};

use super::parse::Meld;
use crate::model::*;

// [完成形判定 (面子, 雀頭)]

// それぞれの牌種について"枚数を3で割った余り"と"余り数の集計"を返却
pub fn calc_mods_cnts(hand: &TileTable) -> ([usize; TYPE], [usize; 3]) {
    let mut mods = [0; TYPE];
    for ti in 0..TYPE {
        mods[ti] = hand[ti][1..TNUM].iter().sum();
        mods[ti] %= 3;
    }

    let mut cnts = [0; 3];
    for ti in 0..TYPE {
        cnts[mods[ti]] += 1;
    }

    (mods, cnts)
}

// 面子は牌種をまたがないので, 和了形なら雀頭を含む牌種だけが余り2で他は余り0
fn is_possible_mods(cnts: &[usize; 3]) -> bool {
    cnts[1] == 0 && cnts[2] == 1
}

// 残っている牌のうち最も小さい牌
fn first_tile(tt: &TileTable) -> Option<Tile> {
    Tile::all().find(|t| tt[t.0][t.1] > 0)
}

// 面子のみで構成されているかの判定
// 最も小さい牌はこの時点で刻子か順子の先頭として使い切る必要がある
// 成功した場合, meldsに使用した面子を追加した状態で返る
pub(super) fn is_sets(tt: TileTable, melds: &mut Vec<Meld>) -> bool {
    let Some(t) = first_tile(&tt) else {
        return true;
    };
    let Tile(ti, ni) = t;

    // 刻子
    if tt[ti][ni] >= 3 {
        let mut tt2 = tt;
        tt2[ti][ni] -= 3;
        melds.push(Meld::Triplet(t));
        if is_sets(tt2, melds) {
            return true;
        }
        melds.pop();
    }

    // 順子 (字牌と8,9は先頭になれない)
    if t.can_start_run() && tt[ti][ni + 1] > 0 && tt[ti][ni + 2] > 0 {
        let mut tt2 = tt;
        tt2[ti][ni] -= 1;
        tt2[ti][ni + 1] -= 1;
        tt2[ti][ni + 2] -= 1;
        melds.push(Meld::Run(t));
        if is_sets(tt2, melds) {
            return true;
        }
        melds.pop();
    }

    false
}

// 雀頭を1つ外して残りが面子のみになる場合,その雀頭を返却
// 雀頭候補は牌の順番に試すので,複数の分解がある場合は最も小さい雀頭が選ばれる
pub(super) fn find_sets_pair(tt: &TileTable, melds: &mut Vec<Meld>) -> Option<Tile> {
    let (mods, cnts) = calc_mods_cnts(tt);
    if !is_possible_mods(&cnts) {
        return None;
    }

    for t in Tile::all() {
        if mods[t.0] != 2 || tt[t.0][t.1] < 2 {
            continue;
        }
        let mut tt2 = *tt;
        tt2[t.0][t.1] -= 2;
        if is_sets(tt2, melds) {
            return Some(t);
        }
        melds.clear();
    }

    None
}

// [和了形判定]

// 同種の牌がTILE枚を超えている場合true
pub(super) fn has_extra_copy(hand: &TileTable) -> bool {
    hand.iter().any(|tr| tr.iter().any(|&n| n > TILE))
}

// 雀頭1つ + 面子(刻子,順子)で構成されているか
// 枚数が3n+2でない場合は探索せずにfalse (空の手牌も含む)
// 5枚目の牌を使う和了形は存在しないので,そのような手牌もfalse
pub fn is_winning_hand(hand: &TileTable) -> bool {
    if count_tiles(hand) % 3 != 2 || has_extra_copy(hand) {
        return false;
    }
    find_sets_pair(hand, &mut vec![]).is_some()
}

// [和了牌判定]
// 和了牌のリストを牌の順番で返却
// 聴牌していない場合は空のリストを返却

// 牌tが手牌のどの牌とも面子・雀頭を作れない場合true
// 和了牌は必ず同じ牌か同じ牌種の前後2つ以内の牌を手牌に持っている
fn is_isolated(hand: &TileTable, t: Tile) -> bool {
    let Tile(ti, ni) = t;
    if hand[ti][ni] > 0 {
        return false;
    }
    if t.is_honor() {
        return true;
    }
    let lo = ni.saturating_sub(2).max(1);
    let hi = (ni + 2).min(9);
    (lo..=hi).all(|n| hand[ti][n] == 0)
}

pub fn calc_tiles_to_win(hand: &TileTable) -> Vec<Tile> {
    let mut res = vec![];
    if count_tiles(hand) % 3 != 1 {
        return res;
    }

    let mut tt = *hand;
    for t in Tile::all() {
        // 5枚目の牌はツモれない
        if tt[t.0][t.1] >= TILE || is_isolated(hand, t) {
            continue;
        }
        tt[t.0][t.1] += 1;
        if is_winning_hand(&tt) {
            res.push(t);
        }
        tt[t.0][t.1] -= 1;
    }

    trace!("tiles to win: {} -> {:?}", tiles_to_string(&tiles_from_tile_table(hand)), res);
    res
}

// [聴牌捨て牌判定]
// 聴牌となる打牌と待ちの組み合わせを打牌の順番で返却
// 既に和了形の手牌も打牌の候補を計算する (和了判定は呼び出し側で先に行うこと)
pub fn calc_discards_to_tenpai(hand: &TileTable) -> BTreeMap<Tile, Vec<Tile>> {
    let mut res = BTreeMap::new();
    if count_tiles(hand) % 3 != 2 {
        return res;
    }

    let mut tt = *hand;
    for t in Tile::all() {
        if tt[t.0][t.1] == 0 {
            continue;
        }
        tt[t.0][t.1] -= 1;
        let v = calc_tiles_to_win(&tt);
        if !v.is_empty() {
            res.insert(t, v);
        }
        tt[t.0][t.1] += 1;
    }

    debug!("discards to tenpai: {} candidates", res.len());
    res
}
