//! The flag record a choose-card effect is scripted with.
//!
//! `ChooseCardParams` mirrors the script keys one to one (PascalCase in
//! JSON). Flags are plain booleans; valued keys are strings the way a
//! card script writes them. Conversion into `ChooseCardSpec` validates the
//! record: at most one mode flag, numeric `MinAmount`, known zone names.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId, ZoneKind};
use crate::effects::targeting::CardFilter;

use super::amount::Amount;
use super::spec::{
    BasicTypeScope, ChoiceMode, ChooseCardSpec, MemorySpec, PlayerRef, PoolSource, PoolSpec,
    RevealSpec, TitleTag,
};
use super::ChoiceError;

/// Script parameters of a choose-card effect.
///
/// ```
/// use ccg_choice::effects::choice::{ChoiceMode, ChooseCardSpec};
///
/// let spec = ChooseCardSpec::from_json(r#"{"Amount": "2", "ControlAndNot": true}"#).unwrap();
/// assert_eq!(spec.mode, ChoiceMode::ControlAndNot);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default, deny_unknown_fields)]
pub struct ChooseCardParams {
    pub amount: Option<String>,
    pub min_amount: Option<String>,
    pub mandatory: bool,
    pub choice_zone: Option<String>,
    pub all_cards: bool,
    pub choices: Option<CardFilter>,
    pub target_controls: bool,
    pub defined_cards: Option<Vec<EntityId>>,
    pub include_spells_on_stack: bool,
    /// "Controlled" restricts to the chooser's lands; any other value means all lands.
    pub each_basic_type: Option<String>,
    pub choose_party: bool,
    /// Power budget expression.
    pub with_total_power: Option<String>,
    pub with_different_powers: bool,
    pub each_different_power: bool,
    pub control_and_not: bool,
    pub at_random: bool,
    pub quasi_library_search: Option<PlayerRef>,
    pub choice_title: Option<String>,
    /// "ChosenType" or "Defined <player>" (You, Targeted, Player N).
    pub choice_title_append: Option<String>,
    pub choice_desc: Option<String>,
    pub from_desc: Option<String>,
    pub reveal: bool,
    pub secretly_choose: bool,
    pub reveal_title: Option<String>,
    pub remember_chosen: bool,
    pub forget_chosen: bool,
    pub imprint_chosen: bool,
}

impl ChooseCardParams {
    /// Every mode the flags ask for, in flag precedence order.
    fn requested_modes(&self) -> Vec<ChoiceMode> {
        let mut modes = Vec::new();
        if let Some(scope) = &self.each_basic_type {
            let scope = if scope == "Controlled" {
                BasicTypeScope::Controlled
            } else {
                BasicTypeScope::AllPlayers
            };
            modes.push(ChoiceMode::EachBasicType { scope });
        }
        if self.choose_party {
            modes.push(ChoiceMode::ChooseParty);
        }
        if let Some(total) = &self.with_total_power {
            modes.push(ChoiceMode::WithTotalPower {
                total: Amount::parse(total),
            });
        }
        if self.with_different_powers {
            modes.push(ChoiceMode::WithDifferentPowers);
        }
        if self.each_different_power {
            modes.push(ChoiceMode::EachDifferentPower);
        }
        if self.control_and_not {
            modes.push(ChoiceMode::ControlAndNot);
        }
        if self.at_random {
            modes.push(ChoiceMode::Random);
        }
        if let Some(searched) = self.quasi_library_search {
            modes.push(ChoiceMode::LibrarySearch { searched });
        }
        modes
    }
}

fn parse_title_tag(raw: &str) -> Option<TitleTag> {
    if raw == "ChosenType" {
        return Some(TitleTag::ChosenType);
    }
    let player = match raw.strip_prefix("Defined ")? {
        "You" => PlayerRef::You,
        "Targeted" => PlayerRef::Targeted,
        other => {
            let index = other.strip_prefix("Player ")?.parse::<u8>().ok()?;
            PlayerRef::Player(PlayerId::new(index))
        }
    };
    Some(TitleTag::Players(player))
}

impl TryFrom<ChooseCardParams> for ChooseCardSpec {
    type Error = ChoiceError;

    fn try_from(params: ChooseCardParams) -> Result<Self, Self::Error> {
        let mut modes = params.requested_modes();
        if modes.len() > 1 {
            return Err(ChoiceError::ConflictingModes(
                modes.iter().map(ChoiceMode::name).collect(),
            ));
        }
        let mode = modes.pop().unwrap_or_default();

        let min_amount = params
            .min_amount
            .map(|raw| {
                raw.trim().parse::<usize>().map_err(|_| ChoiceError::InvalidParam {
                    name: "MinAmount",
                    value: raw.clone(),
                })
            })
            .transpose()?;

        let title_tag = params
            .choice_title_append
            .map(|raw| {
                parse_title_tag(&raw).ok_or(ChoiceError::InvalidParam {
                    name: "ChoiceTitleAppend",
                    value: raw,
                })
            })
            .transpose()?;

        let source = if params.all_cards {
            PoolSource::AllCards
        } else {
            match params.choice_zone {
                Some(zone) => PoolSource::Zone(zone.parse::<ZoneKind>().map_err(|_| {
                    ChoiceError::InvalidParam {
                        name: "ChoiceZone",
                        value: zone.clone(),
                    }
                })?),
                None => PoolSource::default(),
            }
        };

        Ok(ChooseCardSpec {
            mode,
            amount: params.amount.as_deref().map(Amount::parse).unwrap_or_default(),
            min_amount,
            mandatory: params.mandatory,
            title: params.choice_title,
            title_tag,
            description: params.choice_desc,
            from_description: params.from_desc,
            pool: PoolSpec {
                source,
                filter: params.choices,
                target_controls: params.target_controls,
                defined: params.defined_cards,
                include_stack: params.include_spells_on_stack,
            },
            reveal: RevealSpec {
                enabled: params.reveal,
                secretly: params.secretly_choose,
                title: params.reveal_title,
            },
            memory: MemorySpec {
                remember: params.remember_chosen,
                forget: params.forget_chosen,
                imprint: params.imprint_chosen,
            },
        })
    }
}

impl ChooseCardSpec {
    /// Parse a JSON parameter record and validate it.
    pub fn from_json(json: &str) -> Result<Self, ChoiceError> {
        let params: ChooseCardParams = serde_json::from_str(json)?;
        Self::try_from(params)
    }
}
