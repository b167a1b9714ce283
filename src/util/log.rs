use log::{LevelFilter, Log, Metadata, Record};

// ログレベルを上書きする環境変数 (error, warn, info, debug, trace, off)
pub const LOG_ENV: &str = "TAIMAHJONG_LOG";

// "[LEVEL](file:line) message" 形式で標準エラー出力に書き出す
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!(
            "[{}]({}:{}) {}",
            record.level(),
            record.file().unwrap_or("?"),
            record.line().unwrap_or(0),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

// 環境変数が設定されている場合はそちらを優先
// 2回目以降の呼び出しはロガーを変更しない
pub fn init(level: LevelFilter) {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(level);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

// -v の数と -q からログレベルを決定 (デフォルトはwarn)
pub fn level_from_verbosity(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[test]
fn test_level_from_verbosity() {
    assert_eq!(level_from_verbosity(0, false), LevelFilter::Warn);
    assert_eq!(level_from_verbosity(2, false), LevelFilter::Debug);
    assert_eq!(level_from_verbosity(9, false), LevelFilter::Trace);
    assert_eq!(level_from_verbosity(3, true), LevelFilter::Error);
}
