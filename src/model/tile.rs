use serde::{de, ser};

use super::*;

// Round winds / seat winds, in rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Wind {
    East,
    South,
    West,
    North,
}

impl Wind {
    // Cyclic successor (East -> South -> West -> North -> East)
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Wind::East => Wind::South,
            Wind::South => Wind::West,
            Wind::West => Wind::North,
            Wind::North => Wind::East,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Wind::East => 'E',
            Wind::South => 'S',
            Wind::West => 'W',
            Wind::North => 'N',
        }
    }
}

impl fmt::Display for Wind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Characters,
    Bamboo,
    Circles,
}

impl Suit {
    pub fn to_char(self) -> char {
        match self {
            Suit::Characters => 'c',
            Suit::Bamboo => 'b',
            Suit::Circles => 'o',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dragon {
    Red,
    Green,
    White,
}

impl Dragon {
    pub fn to_char(self) -> char {
        match self {
            Dragon::Red => 'R',
            Dragon::Green => 'G',
            Dragon::White => 'W',
        }
    }
}

// A single tile, compared by kind and identity. The derived ordering (suits
// by suit then rank, then winds, then dragons) is the display order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tile {
    Suit(Suit, u8), // rank 1..=9
    Wind(Wind),
    Dragon(Dragon),
}

impl Tile {
    pub fn from_symbol(s: &str) -> Result<Self, String> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(format!("invalid tile symbol: '{}'", s));
        }
        Ok(match chars[0] {
            'c' => Tile::Suit(Suit::Characters, rank_from_char(chars[1])?),
            'b' => Tile::Suit(Suit::Bamboo, rank_from_char(chars[1])?),
            'o' => Tile::Suit(Suit::Circles, rank_from_char(chars[1])?),
            'w' => Tile::Wind(wind_from_char(chars[1])?),
            'd' => Tile::Dragon(dragon_from_char(chars[1])?),
            c => return Err(format!("invalid tile type: '{}'", c)),
        })
    }

    #[inline]
    pub fn is_suit(&self) -> bool {
        matches!(self, Tile::Suit(..))
    }

    #[inline]
    pub fn is_wind(&self) -> bool {
        matches!(self, Tile::Wind(_))
    }

    #[inline]
    pub fn is_dragon(&self) -> bool {
        matches!(self, Tile::Dragon(_))
    }

    #[inline]
    pub fn is_honor(&self) -> bool {
        !self.is_suit()
    }

    // Major tiles are terminals (1, 9) and honors; everything else is minor.
    #[inline]
    pub fn is_major(&self) -> bool {
        match self {
            Tile::Suit(_, n) => *n == 1 || *n == 9,
            _ => true,
        }
    }

    #[inline]
    pub fn is_minor(&self) -> bool {
        !self.is_major()
    }

    pub fn suit(&self) -> Option<Suit> {
        match self {
            Tile::Suit(s, _) => Some(*s),
            _ => None,
        }
    }

    pub fn wind(&self) -> Option<Wind> {
        match self {
            Tile::Wind(w) => Some(*w),
            _ => None,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Suit(s, n) => write!(f, "{}{}", s.to_char(), n),
            Tile::Wind(w) => write!(f, "w{}", w.to_char()),
            Tile::Dragon(d) => write!(f, "d{}", d.to_char()),
        }
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

pub fn rank_from_char(c: char) -> Result<u8, String> {
    match c.to_digit(10) {
        Some(n @ 1..=9) => Ok(n as u8),
        _ => Err(format!("invalid rank: '{}'", c)),
    }
}

pub fn wind_from_char(c: char) -> Result<Wind, String> {
    Ok(match c {
        'E' => Wind::East,
        'S' => Wind::South,
        'W' => Wind::West,
        'N' => Wind::North,
        _ => return Err(format!("invalid wind symbol: '{}'", c)),
    })
}

pub fn dragon_from_char(c: char) -> Result<Dragon, String> {
    Ok(match c {
        'R' => Dragon::Red,
        'G' => Dragon::Green,
        'W' => Dragon::White,
        _ => return Err(format!("invalid dragon symbol: '{}'", c)),
    })
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Tile::from_symbol(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

#[test]
fn test_wind_cycle() {
    for w in [Wind::East, Wind::South, Wind::West, Wind::North] {
        assert_eq!(w, w.next().next().next().next());
    }
    assert_eq!(Wind::East.next(), Wind::South);
    assert_eq!(Wind::North.next(), Wind::East);
}

#[test]
fn test_major_minor() {
    assert!(Tile::Suit(Suit::Bamboo, 1).is_major());
    assert!(Tile::Suit(Suit::Bamboo, 9).is_major());
    assert!(Tile::Suit(Suit::Bamboo, 5).is_minor());
    assert!(Tile::Wind(Wind::North).is_major());
    assert!(Tile::Dragon(Dragon::Green).is_major());
}

#[test]
fn test_tile_kinds() {
    let suit = Tile::Suit(Suit::Circles, 3);
    let wind = Tile::Wind(Wind::West);
    let dragon = Tile::Dragon(Dragon::Red);
    assert!(suit.is_suit() && !suit.is_honor());
    assert!(wind.is_wind() && wind.is_honor());
    assert!(dragon.is_dragon() && dragon.is_honor());
    assert_eq!(Some(Suit::Circles), suit.suit());
    assert_eq!(Some(Wind::West), wind.wind());
    assert_eq!(None, suit.wind());
}

#[test]
fn test_tile_symbol() {
    for s in ["c1", "b9", "o5", "wE", "wN", "dR", "dW"] {
        assert_eq!(s, Tile::from_symbol(s).unwrap().to_string());
    }
    assert!(Tile::from_symbol("c0").is_err());
    assert!(Tile::from_symbol("x3").is_err());
}
