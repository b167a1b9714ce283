use std::fs::File;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use log::error;

use taimahjong::hand::{Advice, advise};
use taimahjong::model::*;
use taimahjong::util::misc::*;

#[derive(Debug)]
pub struct CalculatorApp {
    expression: Option<String>,
    file_path: Option<PathBuf>,
    json: bool,
    detail: bool,
}

impl CalculatorApp {
    pub fn new(
        expression: Option<String>,
        file_path: Option<PathBuf>,
        json: bool,
        detail: bool,
    ) -> Self {
        Self {
            expression,
            file_path,
            json,
            detail,
        }
    }

    pub fn run(&self) -> Res {
        match (&self.expression, &self.file_path) {
            (Some(exp), None) => self.process_expression(exp),
            (None, Some(path)) => self.run_from_file(path),
            _ => bail!("specify either an expression or a file (-f)"),
        }
    }

    fn run_from_file(&self, file_path: &Path) -> Res {
        let file = File::open(file_path)
            .with_context(|| format!("failed to open {}", file_path.display()))?;
        let lines = io::BufReader::new(file).lines();
        for exp in lines {
            let exp = exp?;
            if is_comment_line(&exp) {
                // 空行とコメント行はスキップ
                println!("> {}", exp);
            } else if let Err(e) = self.process_expression(&exp) {
                error!("{:#}", e);
            }
            println!();
        }
        Ok(())
    }

    fn process_expression(&self, exp: &str) -> Res {
        let mut calculator = Calculator::new(self.detail, self.json);
        calculator.parse(exp)?;
        calculator.run()?;
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
enum Verify {
    Ok,
    Error,
    Skip,
}

// [式] 手牌 / 期待する判定結果 # コメント
// 期待する判定結果: win, wait TILES, discard TILES (聴牌になる打牌), not_waiting, wrong_size
#[derive(Debug, PartialEq)]
enum Expect {
    Win,
    Wait(Vec<Tile>),
    Discard(Vec<Tile>),
    NotWaiting,
    WrongSize,
}

#[derive(Debug)]
struct Calculator {
    detail: bool,
    json: bool,
    hand: Option<Hand>,
    expect: Option<Expect>,
}

impl Calculator {
    fn new(detail: bool, json: bool) -> Self {
        Self {
            detail,
            json,
            hand: None,
            expect: None,
        }
    }

    fn parse(&mut self, input: &str) -> Res {
        println!("> {}", input);

        let input = input.split('#').next().unwrap_or_default(); // コメント削除
        let exps: Vec<&str> = input.split('/').collect();
        if exps.len() > 2 {
            bail!("too many '/' in expression: {}", input);
        }

        let hand: Hand = exps[0]
            .parse()
            .with_context(|| format!("invalid hand: '{}'", exps[0].trim()))?;
        self.hand = Some(hand);
        if let Some(exp) = exps.get(1) {
            self.expect = Some(parse_expect(exp)?);
        }

        if self.detail {
            println!("{:?}", self);
        }

        Ok(())
    }

    fn run(&self) -> Res<Verify> {
        let Some(hand) = &self.hand else {
            bail!("hand is not parsed");
        };

        let advice = advise(hand);
        if self.json {
            println!("{}", serde_json::to_string(&advice)?);
        } else {
            println!("{}", advice);
        }

        let verify = match &self.expect {
            Some(e) => {
                if matches_expect(&advice, e) {
                    Verify::Ok
                } else {
                    Verify::Error
                }
            }
            None => Verify::Skip,
        };
        if verify != Verify::Skip {
            println!("verify: {:?}", verify);
        }
        Ok(verify)
    }
}

fn parse_expect(input: &str) -> Res<Expect> {
    let input = input.trim();
    let (kind, tiles) = input.split_once(' ').unwrap_or((input, ""));
    Ok(match kind {
        "win" => Expect::Win,
        "wait" => Expect::Wait(tiles_from_string(tiles)?),
        "discard" => Expect::Discard(tiles_from_string(tiles)?),
        "not_waiting" => Expect::NotWaiting,
        "wrong_size" => Expect::WrongSize,
        _ => bail!("invalid expect: '{}'", input),
    })
}

fn matches_expect(advice: &Advice, expect: &Expect) -> bool {
    match (advice, expect) {
        (Advice::Win(_), Expect::Win) => true,
        (Advice::Waiting(wins), Expect::Wait(tiles)) => wins == tiles,
        (Advice::Discard(m), Expect::Discard(tiles)) => m.keys().eq(tiles.iter()),
        (Advice::NotWaiting, Expect::NotWaiting) => true,
        (Advice::WrongSize(_), Expect::WrongSize) => true,
        _ => false,
    }
}

#[test]
fn test_calculator() {
    let file = File::open("tests/hands.txt").unwrap();
    let lines = io::BufReader::new(file).lines();
    for exp in lines.map_while(Result::ok) {
        if is_comment_line(&exp) {
            // 空行とコメント行はスキップ
            println!("> {}", exp);
        } else {
            let mut calculator = Calculator::new(false, false);
            calculator.parse(&exp).unwrap();
            assert_eq!(Verify::Ok, calculator.run().unwrap(), "{}", exp);
        }
    }
}

#[test]
fn test_parse_error() {
    assert!(Calculator::new(false, false).run().is_err());

    let mut calculator = Calculator::new(false, false);
    assert!(calculator.parse("m123x").is_err());
    assert!(calculator.parse("z11111").is_err());
    assert!(calculator.parse("m11 / winner").is_err());
    assert!(calculator.parse("m11 / win / win").is_err());
}
