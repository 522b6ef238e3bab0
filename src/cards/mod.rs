//! Card system: definitions, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardType`: Card types on the type line
//! - `CardDefinition`: Printed card data with generic attributes
//! - `CardInstance`: Runtime card state (zone, controller, power, memory)
//! - `CardMemory`: Chosen/remembered/imprinted lists on a source card
//! - `CardRegistry`: Card definition lookup, loadable from a catalog

pub mod attributes;
pub mod definition;
pub mod instance;
pub mod registry;

pub use attributes::{AttributeKey, AttributeValue, Attributes};
pub use definition::{CardDefinition, CardId, CardType, BASIC_LAND_TYPES, PARTY_TYPES};
pub use instance::{CardInstance, CardMemory, POWER_MODIFIER};
pub use registry::CardRegistry;
