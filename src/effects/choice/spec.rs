//! Typed configuration of a choose-card effect.
//!
//! `ChooseCardSpec` is what the resolver runs. Build it directly with the
//! builder methods, or from a `ChooseCardParams` flag record (usually read
//! from JSON, see `ChooseCardSpec::from_json`).

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId, ZoneKind};
use crate::effects::targeting::CardFilter;

use super::amount::Amount;

/// Which lands `EachBasicType` looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasicTypeScope {
    /// Every land on the battlefield.
    #[default]
    AllPlayers,
    /// Only lands the choosing player controls.
    Controlled,
}

/// A player named relative to the invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerRef {
    /// The player activating the effect.
    You,
    /// The first participating player.
    Targeted,
    Player(PlayerId),
}

/// Extra context appended to the prompt title, e.g. "Choose a card (Player 1)".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleTag {
    /// The named players.
    Players(PlayerRef),
    /// The type recorded on the source card by an earlier effect.
    ChosenType,
}

/// The single selection behavior of a choice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ChoiceMode {
    /// One multi-pick between `min` and `max` cards.
    #[default]
    Normal,
    /// Pick one card from a player's library (possibly only its top cards).
    LibrarySearch { searched: PlayerRef },
    /// `max` cards at random, no agent involved.
    Random,
    /// At most one land of each basic land type.
    EachBasicType { scope: BasicTypeScope },
    /// At most one each of Cleric, Rogue, Warrior and Wizard.
    ChooseParty,
    /// Creatures whose powers sum to at most `total`.
    WithTotalPower { total: Amount },
    /// Up to `max` creatures, no two sharing a power.
    WithDifferentPowers,
    /// Exactly one creature for each power present in the pool.
    EachDifferentPower,
    /// One pick among cards the player controls, one among the rest.
    ControlAndNot,
}

impl ChoiceMode {
    /// The parameter flag that selects this mode.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ChoiceMode::Normal => "Normal",
            ChoiceMode::LibrarySearch { .. } => "QuasiLibrarySearch",
            ChoiceMode::Random => "AtRandom",
            ChoiceMode::EachBasicType { .. } => "EachBasicType",
            ChoiceMode::ChooseParty => "ChooseParty",
            ChoiceMode::WithTotalPower { .. } => "WithTotalPower",
            ChoiceMode::WithDifferentPowers => "WithDifferentPowers",
            ChoiceMode::EachDifferentPower => "EachDifferentPower",
            ChoiceMode::ControlAndNot => "ControlAndNot",
        }
    }
}

/// Where the pool comes from before filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolSource {
    Zone(ZoneKind),
    AllCards,
}

impl Default for PoolSource {
    fn default() -> Self {
        PoolSource::Zone(ZoneKind::Battlefield)
    }
}

/// How the candidate pool is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolSpec {
    pub source: PoolSource,
    pub filter: Option<CardFilter>,
    /// Keep only cards the first participating player controls.
    pub target_controls: bool,
    /// Replaces the pool entirely.
    pub defined: Option<Vec<EntityId>>,
    /// Prepend the cards on the stack.
    pub include_stack: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealSpec {
    pub enabled: bool,
    /// Reveal only after every player has chosen.
    pub secretly: bool,
    pub title: Option<String>,
}

/// What the source card records besides `chosen`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemorySpec {
    pub remember: bool,
    pub forget: bool,
    pub imprint: bool,
}

/// A fully configured choose-card effect.
///
/// ```
/// use ccg_choice::effects::choice::{Amount, ChoiceMode, ChooseCardSpec};
///
/// let spec = ChooseCardSpec::new(ChoiceMode::Normal)
///     .with_amount(Amount::Fixed(2))
///     .with_min_amount(1)
///     .remember();
/// assert_eq!(spec.min_amount, Some(1));
/// assert!(spec.memory.remember);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChooseCardSpec {
    pub mode: ChoiceMode,
    pub amount: Amount,
    /// Defaults to the resolved amount.
    pub min_amount: Option<usize>,
    pub mandatory: bool,
    /// Prompt shown to agents.
    pub title: Option<String>,
    /// Appended to the prompt of plain and library choices.
    pub title_tag: Option<TitleTag>,
    /// Noun for the chosen cards in `describe` ("card" when unset).
    pub description: Option<String>,
    /// Trailing phrase for `describe`, e.g. "from your graveyard".
    pub from_description: Option<String>,
    pub pool: PoolSpec,
    pub reveal: RevealSpec,
    pub memory: MemorySpec,
}

impl ChooseCardSpec {
    #[must_use]
    pub fn new(mode: ChoiceMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = amount;
        self
    }

    #[must_use]
    pub fn with_min_amount(mut self, min: usize) -> Self {
        self.min_amount = Some(min);
        self
    }

    #[must_use]
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, noun: impl Into<String>, from: Option<String>) -> Self {
        self.description = Some(noun.into());
        self.from_description = from;
        self
    }

    #[must_use]
    pub fn from_zone(mut self, kind: ZoneKind) -> Self {
        self.pool.source = PoolSource::Zone(kind);
        self
    }

    #[must_use]
    pub fn all_cards(mut self) -> Self {
        self.pool.source = PoolSource::AllCards;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: CardFilter) -> Self {
        self.pool.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn target_controls(mut self) -> Self {
        self.pool.target_controls = true;
        self
    }

    #[must_use]
    pub fn with_defined(mut self, cards: Vec<EntityId>) -> Self {
        self.pool.defined = Some(cards);
        self
    }

    #[must_use]
    pub fn include_stack(mut self) -> Self {
        self.pool.include_stack = true;
        self
    }

    #[must_use]
    pub fn reveal(mut self) -> Self {
        self.reveal.enabled = true;
        self
    }

    /// Reveal, but only once everyone has chosen.
    #[must_use]
    pub fn secretly(mut self) -> Self {
        self.reveal.enabled = true;
        self.reveal.secretly = true;
        self
    }

    #[must_use]
    pub fn with_reveal_title(mut self, title: impl Into<String>) -> Self {
        self.reveal.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn remember(mut self) -> Self {
        self.memory.remember = true;
        self
    }

    #[must_use]
    pub fn forget(mut self) -> Self {
        self.memory.forget = true;
        self
    }

    #[must_use]
    pub fn with_title_tag(mut self, tag: TitleTag) -> Self {
        self.title_tag = Some(tag);
        self
    }

    #[must_use]
    pub fn imprint(mut self) -> Self {
        self.memory.imprint = true;
        self
    }
}

impl ChooseCardSpec {
    /// One-line summary for a stack entry, e.g. "Player 0 may choose 2 cards."
    #[must_use]
    pub fn describe(&self, players: &[PlayerId], count: i64) -> String {
        let who = join_players(players);
        let verb = match (self.mandatory, players.len()) {
            (false, _) => "may choose",
            (true, 1) => "chooses",
            (true, _) => "choose",
        };

        let mut noun = self.description.clone().unwrap_or_else(|| "card".to_string());
        if !noun.contains("card") && !noun.contains("control") {
            noun.push_str(" card");
        }
        let counted = if count == 1 {
            with_article(&noun)
        } else {
            format!("{count} {}", pluralize(&noun))
        };

        match &self.from_description {
            Some(from) => format!("{who} {verb} {counted} {from}."),
            None => format!("{who} {verb} {counted}."),
        }
    }
}

/// "a Plains", "an Island", "an artifact card".
pub(crate) fn with_article(noun: &str) -> String {
    match noun.chars().next() {
        Some(c) if "AEIOUaeiou".contains(c) => format!("an {noun}"),
        _ => format!("a {noun}"),
    }
}

fn join_players(players: &[PlayerId]) -> String {
    let names: Vec<String> = players.iter().map(ToString::to_string).collect();
    match names.as_slice() {
        [] => "No one".to_string(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

/// Pluralize the head noun: "creature card" -> "creature cards",
/// "creature you control" -> "creatures you control".
fn pluralize(noun: &str) -> String {
    if let Some(idx) = noun.find("card") {
        let end = idx + "card".len();
        return format!("{}s{}", &noun[..end], &noun[end..]);
    }
    match noun.split_once(' ') {
        Some((head, rest)) => format!("{head}s {rest}"),
        None => format!("{noun}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let spec = ChooseCardSpec::new(ChoiceMode::ChooseParty);

        assert_eq!(spec.amount, Amount::Fixed(1));
        assert_eq!(spec.pool.source, PoolSource::Zone(ZoneKind::Battlefield));
        assert!(!spec.mandatory);
        assert!(!spec.reveal.enabled);
        assert_eq!(spec.mode.name(), "ChooseParty");
    }

    #[test]
    fn test_describe() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        let spec = ChooseCardSpec::default();
        assert_eq!(spec.describe(&[p0], 1), "Player 0 may choose a card.");
        assert_eq!(spec.describe(&[p0], 2), "Player 0 may choose 2 cards.");

        let spec = ChooseCardSpec::default()
            .mandatory()
            .with_description("creature you control", None);
        assert_eq!(spec.describe(&[p0], 2), "Player 0 chooses 2 creatures you control.");
        assert_eq!(
            spec.describe(&[p0, p1], 1),
            "Player 0 and Player 1 choose a creature you control."
        );

        let spec = ChooseCardSpec::default()
            .with_description("artifact", Some("from your graveyard".into()));
        assert_eq!(
            spec.describe(&[p1], 3),
            "Player 1 may choose 3 artifact cards from your graveyard."
        );
        assert_eq!(spec.describe(&[p1], 1), "Player 1 may choose an artifact card from your graveyard.");
    }

    #[test]
    fn test_with_article() {
        assert_eq!(with_article("Island"), "an Island");
        assert_eq!(with_article("Plains"), "a Plains");
        assert_eq!(with_article("enchantment card"), "an enchantment card");
    }

    #[test]
    fn test_secretly_implies_reveal() {
        let spec = ChooseCardSpec::default().secretly();
        assert!(spec.reveal.enabled);
        assert!(spec.reveal.secretly);
    }
}
