//! Showing chosen cards to players.

use crate::core::{EntityId, PlayerId, ZoneKind};

/// Default title for revealed choices.
pub const DEFAULT_REVEAL_TITLE: &str = "Chosen cards";

/// Where reveals go (a UI, a network layer, a log).
pub trait RevealChannel {
    /// Show `cards` on behalf of `revealer`. With `conceal_from_revealer`
    /// only the other players see them.
    fn reveal(&mut self, cards: &[EntityId], revealer: PlayerId, conceal_from_revealer: bool, title: &str);
}

/// One recorded reveal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealEvent {
    pub cards: Vec<EntityId>,
    pub revealer: PlayerId,
    pub conceal_from_revealer: bool,
    pub title: String,
}

impl RevealEvent {
    /// The players who get to see the cards.
    #[must_use]
    pub fn audience(&self, player_count: usize) -> Vec<PlayerId> {
        PlayerId::all(player_count)
            .filter(|&p| self.seen_by(p))
            .collect()
    }

    #[must_use]
    pub fn seen_by(&self, player: PlayerId) -> bool {
        !(self.conceal_from_revealer && player == self.revealer)
    }
}

/// Records every reveal in order.
#[derive(Clone, Debug, Default)]
pub struct RevealLog {
    events: Vec<RevealEvent>,
}

impl RevealLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[RevealEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl RevealChannel for RevealLog {
    fn reveal(&mut self, cards: &[EntityId], revealer: PlayerId, conceal_from_revealer: bool, title: &str) {
        self.events.push(RevealEvent {
            cards: cards.to_vec(),
            revealer,
            conceal_from_revealer,
            title: title.to_string(),
        });
    }
}

/// Drops every reveal.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoReveal;

impl RevealChannel for NoReveal {
    fn reveal(&mut self, _cards: &[EntityId], _revealer: PlayerId, _conceal_from_revealer: bool, _title: &str) {}
}

/// Cards an agent gets to look at while choosing, shown to other
/// players afterwards (the exposed part of a searched library).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelayedReveal {
    pub cards: Vec<EntityId>,
    pub zone: ZoneKind,
    /// Whose zone the cards are in.
    pub owner: PlayerId,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_and_audience() {
        let mut log = RevealLog::new();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        log.reveal(&[EntityId(5)], p0, true, DEFAULT_REVEAL_TITLE);
        log.reveal(&[EntityId(6)], p1, false, "Random picks");

        assert_eq!(log.len(), 2);
        let hidden = &log.events()[0];
        assert_eq!(hidden.audience(3), vec![p1, PlayerId::new(2)]);
        assert!(!hidden.seen_by(p0));

        let open = &log.events()[1];
        assert_eq!(open.audience(2), vec![p0, p1]);
        assert_eq!(open.title, "Random picks");
    }
}
