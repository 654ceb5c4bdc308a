use super::*;

// A player identity, usable as a map key. Instances are only created through
// a PlayerRegistry so that one name maps to one logical identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Player {
    name: String,
}

impl Player {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// Name-deduplicating registry, owned by whoever assembles a session. We
// expect no more than four players, so a Vec beats a map here.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Get the existing Player matching the name, or create a new one.
    pub fn get(&mut self, name: &str) -> Player {
        if let Some(p) = self.players.iter().find(|p| p.name == name) {
            return p.clone();
        }
        let player = Player {
            name: name.to_string(),
        };
        self.players.push(player.clone());
        player
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[test]
fn test_registry_dedup() {
    let mut registry = PlayerRegistry::new();
    assert!(registry.is_empty());
    let a1 = registry.get("Mickey");
    let a2 = registry.get("Mickey");
    let b = registry.get("Donald");
    assert_eq!(a1, a2);
    assert_ne!(a1, b);
    assert_eq!("Mickey", a1.name());
    assert_eq!(2, registry.len());
}
