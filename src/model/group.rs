use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GroupType {
    Pair,
    Chow,
    Pung,
    Kong,
}

impl GroupType {
    // Tiles a group contributes toward the mahjong hand size. A kong's
    // fourth tile is covered by the replacement draw, so it counts as three.
    #[inline]
    pub fn hand_size(self) -> usize {
        match self {
            GroupType::Pair => 2,
            _ => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Concealed,
    Exposed,
}

// An immutable meld: pair, chow, pung or kong. The representative tile is
// the lowest tile of a chow. Field order gives the display ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Group {
    group_type: GroupType,
    tile: Tile,
    visibility: Visibility,
}

impl Group {
    // Pairs carry no concealment distinction relevant to scoring.
    pub fn pair(tile: Tile) -> Self {
        Self {
            group_type: GroupType::Pair,
            tile,
            visibility: Visibility::Concealed,
        }
    }

    pub fn chow(tile: Tile, visibility: Visibility) -> Result<Self, Error> {
        match tile {
            Tile::Suit(_, n) if n <= 7 => Ok(Self {
                group_type: GroupType::Chow,
                tile,
                visibility,
            }),
            Tile::Suit(..) => Err(Error::InvalidModel(format!(
                "chow cannot start at {}",
                tile
            ))),
            _ => Err(Error::InvalidModel(format!(
                "chow of honor tile {}",
                tile
            ))),
        }
    }

    pub fn pung(tile: Tile, visibility: Visibility) -> Self {
        Self {
            group_type: GroupType::Pung,
            tile,
            visibility,
        }
    }

    pub fn kong(tile: Tile, visibility: Visibility) -> Self {
        Self {
            group_type: GroupType::Kong,
            tile,
            visibility,
        }
    }

    #[inline]
    pub fn group_type(&self) -> GroupType {
        self.group_type
    }

    #[inline]
    pub fn tile(&self) -> Tile {
        self.tile
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn is_concealed(&self) -> bool {
        self.visibility == Visibility::Concealed
    }

    // The physical tiles of the group, for display.
    pub fn tiles(&self) -> Vec<Tile> {
        match self.group_type {
            GroupType::Pair => vec![self.tile; 2],
            GroupType::Pung => vec![self.tile; 3],
            GroupType::Kong => vec![self.tile; 4],
            GroupType::Chow => match self.tile {
                Tile::Suit(s, n) => {
                    vec![self.tile, Tile::Suit(s, n + 1), Tile::Suit(s, n + 2)]
                }
                _ => vec![], // unreachable by construction
            },
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tile {
            Tile::Suit(s, _) => {
                write!(f, "{}", s.to_char())?;
                for t in self.tiles() {
                    if let Tile::Suit(_, n) = t {
                        write!(f, "{}", n)?;
                    }
                }
            }
            Tile::Wind(w) => {
                write!(f, "w")?;
                for _ in 0..self.tiles().len() {
                    write!(f, "{}", w.to_char())?;
                }
            }
            Tile::Dragon(d) => {
                write!(f, "d")?;
                for _ in 0..self.tiles().len() {
                    write!(f, "{}", d.to_char())?;
                }
            }
        }
        if self.visibility == Visibility::Exposed {
            write!(f, "+")?;
        }
        Ok(())
    }
}

#[test]
fn test_hand_size() {
    assert_eq!(2, GroupType::Pair.hand_size());
    assert_eq!(3, GroupType::Chow.hand_size());
    assert_eq!(3, GroupType::Pung.hand_size());
    assert_eq!(3, GroupType::Kong.hand_size());
}

#[test]
fn test_group_accessors() {
    let g = Group::pung(Tile::Suit(Suit::Circles, 5), Visibility::Exposed);
    assert_eq!(GroupType::Pung, g.group_type());
    assert_eq!(Tile::Suit(Suit::Circles, 5), g.tile());
    assert_eq!(Visibility::Exposed, g.visibility());
    assert!(!g.is_concealed());
    assert!(Group::pair(Tile::Wind(Wind::East)).is_concealed());
}

#[test]
fn test_chow_construction() {
    let g = Group::chow(Tile::Suit(Suit::Bamboo, 7), Visibility::Concealed).unwrap();
    assert_eq!(
        vec![
            Tile::Suit(Suit::Bamboo, 7),
            Tile::Suit(Suit::Bamboo, 8),
            Tile::Suit(Suit::Bamboo, 9)
        ],
        g.tiles()
    );
    assert!(Group::chow(Tile::Suit(Suit::Bamboo, 8), Visibility::Concealed).is_err());
    assert!(Group::chow(Tile::Dragon(Dragon::Red), Visibility::Concealed).is_err());
}

#[test]
fn test_group_display() {
    let g = Group::chow(Tile::Suit(Suit::Characters, 2), Visibility::Concealed).unwrap();
    assert_eq!("c234", g.to_string());
    assert_eq!(
        "o555+",
        Group::pung(Tile::Suit(Suit::Circles, 5), Visibility::Exposed).to_string()
    );
    assert_eq!(
        "dRRRR+",
        Group::kong(Tile::Dragon(Dragon::Red), Visibility::Exposed).to_string()
    );
    assert_eq!("wEE", Group::pair(Tile::Wind(Wind::East)).to_string());
}
