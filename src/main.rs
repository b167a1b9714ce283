#![warn(rust_2018_idioms)]
// 構造的な意味合いや一貫性を保つために以下の警告は無効化
#![allow(clippy::needless_range_loop)]

mod app;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;

use taimahjong::tool::challenge::ChallengeMode;
use taimahjong::util::log::{init, level_from_verbosity};
use taimahjong::util::misc::Res;

#[derive(Debug, Parser)]
#[command(version, about = "台湾麻雀の和了判定・聴牌計算ツール")]
struct Cli {
    /// ログを詳細に出力 (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// エラー以外のログを出力しない
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Calculator (和了判定, 待ち, 打牌候補の計算モード)
    #[command(alias = "C")]
    Calc {
        /// 手牌 (例: m1112345678999, 1萬2萬3萬東東)
        expression: Option<String>,

        /// 1行に1つの手牌を記述したファイル
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 結果をJSONで出力
        #[arg(short, long)]
        json: bool,

        /// パース結果を出力
        #[arg(short, long)]
        detail: bool,
    },
    /// Trainer (清一色の聴牌・打聴練習モード)
    #[command(alias = "T")]
    Train {
        #[arg(short, long, default_value = "ting")]
        mode: ChallengeMode,

        /// 乱数のシード (指定しない場合は毎回異なる問題)
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Counter (点数計算モード)
    #[command(alias = "S")]
    Count {
        /// コマンドを記述したファイル (指定しない場合は標準入力)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn run(mode: Mode) -> Res {
    match mode {
        Mode::Calc {
            expression,
            file,
            json,
            detail,
        } => app::CalculatorApp::new(expression, file, json, detail).run(),
        Mode::Train { mode, seed } => app::TrainerApp::new(mode, seed).run(),
        Mode::Count { file } => app::CounterApp::new(file).run(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init(level_from_verbosity(cli.verbose, cli.quiet));

    match run(cli.mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
