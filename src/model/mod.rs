// Data model for the western-classical mahjong game.
mod define;
mod error;
mod game;
mod group;
mod player;
mod round;
mod tile;

#[cfg(test)]
pub mod round_util;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use define::*;
pub use error::*;
pub use game::*;
pub use group::*;
pub use player::*;
pub use round::*;
pub use tile::*;
