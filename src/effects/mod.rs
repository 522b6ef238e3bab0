//! Effects that ask players about cards.
//!
//! - `targeting`: `CardFilter`, the validity predicates effects use to
//!   narrow down candidate cards
//! - `choice`: choose-card effects and the resolver that runs them
//!
//! Game-specific meaning (amount expressions, custom filter clauses,
//! player targetability) comes in through callbacks on the contexts, so
//! nothing here knows a particular rule set.

pub mod choice;
pub mod targeting;

pub use choice::{ChoiceContext, ChoiceError, ChoiceResolver, ChooseCardSpec};
pub use targeting::{CardFilter, FilterContext};
