//! Player identification and per-player storage.
//!
//! `PlayerMap` is how the engine keeps one value per seat: player state,
//! choice agents, and so on.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use ccg_choice::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per player, indexed by `PlayerId`.
///
/// ```
/// use ccg_choice::core::{PlayerId, PlayerMap};
///
/// let mut hands: PlayerMap<u32> = PlayerMap::from_vec(vec![7, 7]);
/// hands[PlayerId::new(1)] -= 1;
/// assert_eq!(hands[PlayerId::new(1)], 6);
/// assert_eq!(hands.try_get(PlayerId::new(5)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Build a map from one value per seat, in seat order.
    ///
    /// Used to hand a resolver one boxed agent per player.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Create a map with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Whether `player` has a seat in this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Get a player's entry, or `None` for an unknown seat.
    #[must_use]
    pub fn try_get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Mutable variant of `try_get`.
    pub fn try_get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
