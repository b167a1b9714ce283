use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use taimahjong::hand::{calc_discards_to_tenpai, calc_tiles_to_win, decompose, is_winning_hand};
use taimahjong::model::*;

fn tt(exp: &str) -> TileTable {
    tiles_to_tile_table(&tiles_from_string(exp).unwrap())
}

fn bench_is_winning_hand(c: &mut Criterion) {
    let win = tt("m11122233344455");
    let not_win = tt("m1112345678999p5");
    c.bench_function("is_winning_hand", |b| {
        b.iter(|| black_box(is_winning_hand(black_box(&win))));
    });
    c.bench_function("is_winning_hand_not_win", |b| {
        b.iter(|| black_box(is_winning_hand(black_box(&not_win))));
    });
    c.bench_function("decompose", |b| {
        b.iter(|| black_box(decompose(black_box(&win))));
    });
}

fn bench_calc_tiles_to_win(c: &mut Criterion) {
    // 九蓮宝燈
    let hand = tt("m1112345678999");
    c.bench_function("calc_tiles_to_win_nine_gates", |b| {
        b.iter(|| black_box(calc_tiles_to_win(black_box(&hand))));
    });
    let hand = tt("m123p456s789z1234");
    c.bench_function("calc_tiles_to_win_mixed", |b| {
        b.iter(|| black_box(calc_tiles_to_win(black_box(&hand))));
    });
}

fn bench_calc_discards_to_tenpai(c: &mut Criterion) {
    let hand = tt("s11112345567899");
    c.bench_function("calc_discards_to_tenpai_single_suit", |b| {
        b.iter(|| black_box(calc_discards_to_tenpai(black_box(&hand))));
    });
    let hand = tt("m123p456s789z12344");
    c.bench_function("calc_discards_to_tenpai_mixed", |b| {
        b.iter(|| black_box(calc_discards_to_tenpai(black_box(&hand))));
    });
}

criterion_group!(
    benches,
    bench_is_winning_hand,
    bench_calc_tiles_to_win,
    bench_calc_discards_to_tenpai
);
criterion_main!(benches);
