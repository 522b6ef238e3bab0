use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::GameState;

use super::ChoiceError;

/// Evaluator for amount expressions.
pub type AmountEvalFn<'a> = dyn Fn(&str, &GameState) -> Result<i64, String> + 'a;

/// How many cards a choice asks for.
///
/// ```
/// use ccg_choice::effects::choice::Amount;
///
/// assert_eq!("3".parse::<Amount>().unwrap(), Amount::Fixed(3));
/// assert_eq!("Random".parse::<Amount>().unwrap(), Amount::Random);
/// assert_eq!("X".parse::<Amount>().unwrap(), Amount::Expr("X".into()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Amount {
    Fixed(i64),
    /// Uniform in `0..=pool size`.
    Random,
    /// Resolved by the context's amount evaluator.
    Expr(String),
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Fixed(1)
    }
}

impl FromStr for Amount {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = s.parse() {
                return Ok(Amount::Fixed(n));
            }
        }
        if s == "Random" {
            return Ok(Amount::Random);
        }
        Ok(Amount::Expr(s.to_string()))
    }
}

impl Amount {
    /// Parse a parameter value.
    pub fn parse(s: &str) -> Self {
        match s.parse() {
            Ok(amount) => amount,
            Err(never) => match never {},
        }
    }

    /// Resolve to a number. `pool_size` bounds `Random`.
    pub fn resolve(
        &self,
        state: &mut GameState,
        pool_size: usize,
        eval: &AmountEvalFn<'_>,
    ) -> Result<i64, ChoiceError> {
        match self {
            Amount::Fixed(n) => Ok(*n),
            Amount::Random => Ok(state.rng.gen_inclusive(pool_size) as i64),
            Amount::Expr(expr) => eval(expr, state).map_err(|reason| ChoiceError::Amount {
                expr: expr.clone(),
                reason,
            }),
        }
    }
}

/// Default amount evaluator: plain (possibly signed) integers only.
pub fn literal_amount(expr: &str, _state: &GameState) -> Result<i64, String> {
    expr.trim()
        .parse()
        .map_err(|_| "no amount evaluator for non-literal expressions".to_string())
}
