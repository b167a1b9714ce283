use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// 牌種の文字より先に数字が現れた
    MissingType(char),
    /// 解釈できない文字
    InvalidChar(char),
    /// 存在しない牌 (m0, z8など)
    InvalidTile(String),
    /// 空の入力
    Empty,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingType(c) => write!(f, "tile number before tile type: '{}'", c),
            ParseError::InvalidChar(c) => write!(f, "invalid char: '{}'", c),
            ParseError::InvalidTile(s) => write!(f, "invalid tile: '{}'", s),
            ParseError::Empty => write!(f, "empty tile expression"),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    Parse(ParseError),
    /// 手牌の枚数がMAX_HANDを超えている
    TooManyTiles(usize),
    /// 同種の牌がTILE枚を超えている
    TooManyCopies(Tile, usize),
    /// TileTableに存在しない牌の枚数が入っている
    InvalidTile(Tile),
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::Parse(e) => write!(f, "{}", e),
            HandError::TooManyTiles(n) => {
                write!(f, "too many tiles: {} (max {})", n, MAX_HAND)
            }
            HandError::TooManyCopies(t, n) => {
                write!(f, "too many copies of {}: {} (max {})", t, n, TILE)
            }
            HandError::InvalidTile(t) => write!(f, "invalid tile index: ({}, {})", t.0, t.1),
        }
    }
}

impl std::error::Error for HandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HandError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for HandError {
    fn from(e: ParseError) -> Self {
        HandError::Parse(e)
    }
}
