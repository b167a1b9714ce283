use std::fmt;
use std::io::{self, BufRead, Write};

pub type Res<T = ()> = anyhow::Result<T>;

pub fn prompt() -> io::Result<String> {
    print!("> ");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf)
}

pub fn vec_to_string<T: fmt::Display>(v: &[T]) -> String {
    let vs: Vec<String> = v.iter().map(|x| format!("{}", x)).collect();
    "[".to_string() + &vs.join(", ") + "]"
}

// 空行と#から始まるコメント行
pub fn is_comment_line(line: &str) -> bool {
    let l = line.trim();
    l.is_empty() || l.starts_with('#')
}

#[test]
fn test_vec_to_string() {
    assert_eq!(vec_to_string(&[1, 2, 3]), "[1, 2, 3]");
    assert_eq!(vec_to_string::<usize>(&[]), "[]");
}

#[test]
fn test_is_comment_line() {
    assert!(is_comment_line(""));
    assert!(is_comment_line("   "));
    assert!(is_comment_line(" # nine gates"));
    assert!(!is_comment_line("m123 # comment"));
}
