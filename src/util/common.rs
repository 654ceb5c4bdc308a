use crate::model::*;
use crate::scoring::ScoredHand;

// Parse one group expression: tiles of one meld written as a type character
// followed by the tile identities, with a '+' suffix for an exposed meld.
// "c123" chow, "o555+" exposed pung, "wEE" pair of east, "dRRRR+" kong.
pub fn group_from_string(exp: &str) -> Result<Group, String> {
    let (body, visibility) = match exp.strip_suffix('+') {
        Some(e) => (e, Visibility::Exposed),
        None => (exp, Visibility::Concealed),
    };

    let mut chars = body.chars();
    let kind = chars.next().ok_or_else(|| "empty group".to_string())?;
    let rest: Vec<char> = chars.collect();
    if rest.len() < 2 || rest.len() > 4 {
        return Err(format!("invalid group size: '{}'", exp));
    }

    match kind {
        'c' | 'b' | 'o' => {
            let suit = match kind {
                'c' => Suit::Characters,
                'b' => Suit::Bamboo,
                _ => Suit::Circles,
            };
            let mut ranks = vec![];
            for c in &rest {
                ranks.push(rank_from_char(*c)?);
            }
            ranks.sort_unstable();

            let tile = Tile::Suit(suit, ranks[0]);
            if ranks.iter().all(|&r| r == ranks[0]) {
                group_of_size(tile, ranks.len(), visibility)
            } else if ranks.len() == 3 && ranks[1] == ranks[0] + 1 && ranks[2] == ranks[0] + 2 {
                Group::chow(tile, visibility).map_err(|e| e.to_string())
            } else {
                Err(format!("invalid group: '{}'", exp))
            }
        }
        'w' => {
            let wind = wind_from_char(rest[0])?;
            if !rest.iter().all(|&c| c == rest[0]) {
                return Err(format!("mixed wind group: '{}'", exp));
            }
            group_of_size(Tile::Wind(wind), rest.len(), visibility)
        }
        'd' => {
            let dragon = dragon_from_char(rest[0])?;
            if !rest.iter().all(|&c| c == rest[0]) {
                return Err(format!("mixed dragon group: '{}'", exp));
            }
            group_of_size(Tile::Dragon(dragon), rest.len(), visibility)
        }
        c => Err(format!("invalid tile type: '{}'", c)),
    }
}

fn group_of_size(tile: Tile, count: usize, visibility: Visibility) -> Result<Group, String> {
    match count {
        2 => Ok(Group::pair(tile)),
        3 => Ok(Group::pung(tile, visibility)),
        4 => Ok(Group::kong(tile, visibility)),
        n => Err(format!("invalid group size: {}", n)),
    }
}

pub fn groups_from_string(exp: &str) -> Result<Vec<Group>, String> {
    exp.split(',')
        .filter(|e| !e.is_empty())
        .map(group_from_string)
        .collect()
}

// Set one named circumstance flag on a hand.
pub fn apply_flag(hand: &mut ScoredHand, flag: &str) -> Result<(), String> {
    match flag {
        "wall" => hand.set_mahjong_by_wall_tile(true),
        "lastwall" => hand.set_mahjong_by_last_wall_tile(true),
        "only" => hand.set_mahjong_by_only_possible_tile(true),
        "loose" => hand.set_mahjong_by_loose_tile(true),
        "lastdiscard" => hand.set_mahjong_by_last_discard(true),
        "robbedkong" => hand.set_mahjong_by_robbing_kong(true),
        "origcall" => hand.set_mahjong_by_original_call(true),
        "standingcall" => hand.set_non_mahjong_by_original_call(true),
        "pairconcealed" => hand.set_mahjong_pair_concealed(true),
        "" => Ok(()),
        _ => return Err(format!("unknown circumstance flag: '{}'", flag)),
    }
    .map_err(|e| e.to_string())
}

#[test]
fn test_group_parsing() {
    for exp in ["c123", "c555+", "b99", "o1111", "wEE", "wNNN+", "dRRRR+", "dGG"] {
        let group = group_from_string(exp).unwrap();
        assert_eq!(exp, group.to_string());
    }

    assert!(group_from_string("c129").is_err()); // not a run
    assert!(group_from_string("c12345").is_err()); // too long
    assert!(group_from_string("wES").is_err()); // mixed winds
    assert!(group_from_string("d89").is_err()); // bad dragon symbol
    assert!(group_from_string("z111").is_err()); // bad tile type
}

#[test]
fn test_chow_in_any_order() {
    let group = group_from_string("o645").unwrap();
    assert_eq!("o456", group.to_string());
    assert_eq!(GroupType::Chow, group.group_type());
}
