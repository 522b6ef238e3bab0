//! Choose-card effects.
//!
//! An effect builds a pool of candidate cards, works out how many to pick,
//! and asks each participating player's agent to choose. Modes vary the
//! shape of the question: one pick per basic land type, a power budget,
//! pairwise different powers, and so on.
//!
//! ## Key Types
//!
//! - `ChooseCardSpec`: what to ask (one `ChoiceMode`, amount, pool, reveal, memory)
//! - `ChooseCardParams`: the script flag record, converted into a spec
//! - `ChoiceResolver`: runs a spec against the game
//! - `ChoiceAgent`: answers for one player
//! - `RevealChannel`: where chosen cards are shown
//!
//! ## Flow
//!
//! 1. Build the pool (zone or all cards, filter, control, defined cards, stack)
//! 2. Resolve the amount; zero or less is a no-op
//! 3. Each player picks according to the mode
//! 4. Reveal, then record the aggregate on the source card

mod agent;
mod amount;
mod context;
mod error;
mod modes;
mod params;
mod pool;
mod resolver;
mod reveal;
mod selection;
mod spec;

pub use agent::{
    AgentSet, ChoiceAgent, ChoiceRequest, ConfirmMode, FirstChoiceAgent, Offer, RandomAgent,
    ScriptedAgent, ScriptedAnswer,
};
pub use amount::{literal_amount, Amount, AmountEvalFn};
pub use context::ChoiceContext;
pub use error::ChoiceError;
pub use params::ChooseCardParams;
pub use pool::build_pool;
pub use resolver::{ChoiceInvocation, ChoiceOutcome, ChoiceResolver, ChoiceStatus};
pub use reveal::{DelayedReveal, NoReveal, RevealChannel, RevealEvent, RevealLog, DEFAULT_REVEAL_TITLE};
pub use selection::{CandidatePool, Selection};
pub use spec::{
    BasicTypeScope, ChoiceMode, ChooseCardSpec, MemorySpec, PlayerRef, PoolSource, PoolSpec,
    RevealSpec, TitleTag,
};
