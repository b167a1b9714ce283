use std::fs::File;
use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, bail};
use log::{error, info};

use taimahjong::model::*;
use taimahjong::tool::counter::{Counter, Stake};
use taimahjong::util::misc::*;

// [スクリプト] 1行に1コマンド, 座席は1始まり
// start [底/台] [名前...]
// zimo 和了者 莊家 台数
// hu 和了者 放槍者 台数
// settle
#[derive(Debug)]
pub struct CounterApp {
    file_path: Option<PathBuf>,
}

impl CounterApp {
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self { file_path }
    }

    pub fn run(&self) -> Res {
        let mut counter = Counter::new(Stake::default());
        match &self.file_path {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                run_script(&mut counter, io::BufReader::new(file))?;
            }
            None => run_script(&mut counter, io::stdin().lock())?,
        }
        Ok(())
    }
}

fn run_script<R: BufRead>(counter: &mut Counter, reader: R) -> Res {
    for line in reader.lines() {
        let line = line?;
        if is_comment_line(&line) {
            continue;
        }
        println!("> {}", line);
        if let Err(e) = process_command(counter, &line) {
            error!("{:#}", e);
        }
    }
    Ok(())
}

fn process_command(counter: &mut Counter, line: &str) -> Res {
    let args: Vec<&str> = line.split_whitespace().collect();
    let Some((&cmd, args)) = args.split_first() else {
        return Ok(());
    };

    match cmd {
        "start" => {
            let (stake, names) = match args.first() {
                Some(s) if s.contains('/') => (s.parse::<Stake>()?, &args[1..]),
                _ => (Stake::default(), args),
            };
            *counter = Counter::with_names(stake, names);
            info!("new game: stake={}", stake);
            print_scores(counter);
        }
        "zimo" => {
            let [w, d, t] = parse_numbers(cmd, args)?;
            let win = counter.self_drawn(parse_seat(w)?, parse_seat(d)?, t)?;
            println!("{} +{}", counter.players()[w - 1].name, win);
            print_scores(counter);
        }
        "hu" => {
            let [w, l, t] = parse_numbers(cmd, args)?;
            let payment = counter.discard_win(parse_seat(w)?, parse_seat(l)?, t)?;
            println!(
                "{} -> {} {}",
                counter.players()[l - 1].name,
                counter.players()[w - 1].name,
                payment
            );
            print_scores(counter);
        }
        "settle" => {
            for l in settle_lines(counter) {
                println!("{}", l);
            }
        }
        _ => bail!("unknown command: {}", cmd),
    }
    Ok(())
}

fn parse_numbers(cmd: &str, args: &[&str]) -> Res<[usize; 3]> {
    let [a, b, c] = args else {
        bail!("'{}' takes 3 arguments: {}", cmd, args.join(" "));
    };
    let parse = |s: &str| -> Res<usize> {
        s.parse().with_context(|| format!("invalid number: '{}'", s))
    };
    Ok([parse(*a)?, parse(*b)?, parse(*c)?])
}

// 1始まりの座席番号を0始まりに変換
fn parse_seat(n: usize) -> Res<Seat> {
    if n == 0 || n > SEAT {
        bail!("seat must be 1-{}: {}", SEAT, n);
    }
    Ok(n - 1)
}

// 結算: 順位と点数, 続けて支払い
fn settle_lines(counter: &Counter) -> Vec<String> {
    let players = counter.players();
    let mut lines = vec![];
    for (rank, s) in counter.ranking().into_iter().enumerate() {
        lines.push(format!("{}. {}: {}", rank + 1, players[s].name, players[s].score));
    }
    let transfers = counter.settle();
    if transfers.is_empty() {
        lines.push("天下太平，無須找錢！".to_string());
    }
    for t in transfers {
        lines.push(format!("{} -> {} {}", players[t.from].name, players[t.to].name, t.amount));
    }
    lines
}

fn print_scores(counter: &Counter) {
    for p in counter.players() {
        println!("{}: {}", p.name, p.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_script() {
        let script = "\
# 2局
start 100/20 A B C D
zimo 2 1 2
hu 4 2 10
hu 5 1 1
zimo 1 1
settle
";
        let mut counter = Counter::new(Stake::default());
        run_script(&mut counter, script.as_bytes()).unwrap();
        assert_eq!(counter.stake(), Stake { base: 100, tai: 20 });
        assert_eq!(counter.players()[3].name, "D");
        // 不正な行はスキップされる
        assert_eq!(counter.scores(), [-160, 140, -140, 160]);
    }

    #[test]
    fn test_settle_lines() {
        let mut counter = Counter::with_names(Stake::default(), &["A", "B", "C", "D"]);
        assert_eq!(
            settle_lines(&counter),
            vec!["1. A: 0", "2. B: 0", "3. C: 0", "4. D: 0", "天下太平，無須找錢！"]
        );

        process_command(&mut counter, "zimo 2 1 2").unwrap();
        process_command(&mut counter, "hu 4 2 10").unwrap();
        assert_eq!(
            settle_lines(&counter),
            vec![
                "1. D: 160",
                "2. B: 140",
                "3. C: -140",
                "4. A: -160",
                "A -> D 160",
                "C -> B 140",
            ]
        );
    }

    #[test]
    fn test_process_command() {
        let mut counter = Counter::new(Stake::default());
        process_command(&mut counter, "start 東 南").unwrap();
        assert_eq!(counter.players()[0].name, "東");
        assert_eq!(counter.players()[2].name, "西家");
        assert_eq!(counter.stake(), Stake::default());

        assert!(process_command(&mut counter, "start 1/x").is_err());
        assert!(process_command(&mut counter, "hu 1 1 3").is_err());
        assert!(process_command(&mut counter, "hu 0 1 3").is_err());
        assert!(process_command(&mut counter, "zimo a 1 3").is_err());
        assert!(process_command(&mut counter, "draw").is_err());
        assert_eq!(counter.scores(), [0; SEAT]);
    }
}
