use anyhow::bail;
use rand::SeedableRng;
use rand::rngs::StdRng;

use taimahjong::model::*;
use taimahjong::tool::challenge::{Answer, Challenge, ChallengeMode};
use taimahjong::util::misc::*;

#[derive(Debug)]
pub struct TrainerApp {
    mode: ChallengeMode,
    seed: Option<u64>,
}

impl TrainerApp {
    pub fn new(mode: ChallengeMode, seed: Option<u64>) -> Self {
        Self { mode, seed }
    }

    pub fn run(&self) -> Res {
        let mut rng = match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let challenge = Challenge::generate(self.mode, &mut rng)?;

        print_question(&challenge);
        let line = prompt()?;
        let selected = parse_answer(&challenge, &line)?;

        if challenge.check(&selected) {
            println!("correct!");
        } else {
            println!("wrong: {}", vec_to_string(&selected));
        }
        print_solution(&challenge.answer);
        Ok(())
    }
}

fn print_question(c: &Challenge) {
    let tiles = c.hand.tiles();
    let names: Vec<String> = tiles.iter().map(|t| t.name()).collect();
    println!("hand: {} ({})", tiles_to_string(&tiles), names.join(" "));
    match c.mode {
        ChallengeMode::Ting => println!("select all tiles to win"),
        ChallengeMode::Discard => println!("select one tile to discard for tenpai"),
    }
    println!("options: {}", vec_to_string(&c.options()));
}

fn print_solution(answer: &Answer) {
    match answer {
        Answer::Ting(wins) => println!("answer: wait {}", vec_to_string(wins)),
        Answer::Discard(m) => {
            for (d, wins) in m {
                println!("answer: discard {} -> wait {}", d, vec_to_string(wins));
            }
        }
    }
}

// 数字のみの入力 ("147") は問題の牌種として解釈
fn parse_answer(c: &Challenge, line: &str) -> Res<Vec<Tile>> {
    let line = line.trim();
    if line.is_empty() {
        bail!("no answer");
    }
    if line.chars().all(|ch| ch.is_ascii_digit() || ch == ' ' || ch == ',') {
        let mut tiles = vec![];
        for ch in line.chars().filter(|ch| ch.is_ascii_digit()) {
            let ni = ch as usize - '0' as usize;
            let Some(t) = Tile::checked(c.suit, ni) else {
                bail!("invalid rank: {}", ch);
            };
            tiles.push(t);
        }
        return Ok(tiles);
    }
    Ok(tiles_from_string(line)?)
}
