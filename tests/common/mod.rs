//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use ccg_choice::cards::{CardDefinition, CardId, CardType};
use ccg_choice::core::{EntityId, GameConfig, GameState, PlayerId, ZoneKind};
use ccg_choice::effects::choice::{
    AgentSet, ChoiceContext, ChoiceError, ChoiceInvocation, ChoiceOutcome, ChoiceResolver,
    ChooseCardSpec, RevealChannel,
};

/// Install a debug-level subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// A game under construction, with a source card in player 0's exile.
pub struct Board {
    pub state: GameState,
    pub source: EntityId,
    next_card_id: u32,
}

impl Board {
    pub fn new(player_count: usize) -> Self {
        let mut state = GameState::new(GameConfig::standard(player_count), 42);
        let source_def = CardDefinition::new(CardId::new(0), "Choice Source").with_type(CardType::Enchantment);
        let source = state
            .spawn(&source_def, PlayerId::new(0), ZoneKind::Exile)
            .expect("standard config has exile zones");
        Self {
            state,
            source,
            next_card_id: 1,
        }
    }

    fn next_id(&mut self) -> CardId {
        let id = CardId::new(self.next_card_id);
        self.next_card_id += 1;
        id
    }

    pub fn card(&mut self, definition: &CardDefinition, owner: PlayerId, kind: ZoneKind) -> EntityId {
        self.state
            .spawn(definition, owner, kind)
            .expect("zone exists in the standard config")
    }

    /// A creature on the battlefield.
    pub fn creature(&mut self, owner: PlayerId, power: i64) -> EntityId {
        self.creature_with(owner, power, &[])
    }

    pub fn creature_with(&mut self, owner: PlayerId, power: i64, subtypes: &[&str]) -> EntityId {
        let id = self.next_id();
        let mut def = CardDefinition::new(id, format!("Creature {}", id.raw()))
            .with_type(CardType::Creature)
            .with_power(power);
        for subtype in subtypes {
            def = def.with_subtype(*subtype);
        }
        self.card(&def, owner, ZoneKind::Battlefield)
    }

    /// A basic land on the battlefield.
    pub fn land(&mut self, owner: PlayerId, land_type: &str) -> EntityId {
        let id = self.next_id();
        let def = CardDefinition::new(id, land_type)
            .with_type(CardType::Land)
            .with_subtype(land_type);
        self.card(&def, owner, ZoneKind::Battlefield)
    }

    /// A card put on top of `owner`'s library.
    pub fn library_card(&mut self, owner: PlayerId, card_type: CardType) -> EntityId {
        let id = self.next_id();
        let def = CardDefinition::new(id, format!("Library Card {}", id.raw())).with_type(card_type);
        self.card(&def, owner, ZoneKind::Library)
    }

    /// Resolve `spec` with the default context.
    pub fn resolve<S: AgentSet + ?Sized>(
        &mut self,
        spec: &ChooseCardSpec,
        players: &[PlayerId],
        agents: &mut S,
        reveal: &mut dyn RevealChannel,
    ) -> Result<ChoiceOutcome, ChoiceError> {
        self.resolve_with(spec, players, agents, reveal, &ChoiceContext::new())
    }

    pub fn resolve_with<S: AgentSet + ?Sized>(
        &mut self,
        spec: &ChooseCardSpec,
        players: &[PlayerId],
        agents: &mut S,
        reveal: &mut dyn RevealChannel,
        context: &ChoiceContext<'_>,
    ) -> Result<ChoiceOutcome, ChoiceError> {
        init_tracing();
        let invocation = ChoiceInvocation::new(self.source, PlayerId::new(0))
            .with_players(players.iter().copied());
        ChoiceResolver::resolve(&mut self.state, spec, &invocation, agents, reveal, context)
    }

    pub fn chosen(&self) -> Vec<EntityId> {
        self.state
            .get_card(self.source)
            .map(|c| c.memory.chosen.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn power(&self, entity: EntityId) -> i64 {
        self.state.power_of(entity)
    }
}
