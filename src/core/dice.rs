//! Dice notation.
//!
//! Expressions like `2d6+3` are parsed once, when an action is loaded;
//! the interpreter only ever rolls already-validated expressions.

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::DiceParseError;

/// A parsed dice expression: `count`d`sides` plus a flat modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceExpr {
    pub count: u32,
    pub sides: u32,
    pub modifier: i64,
}

impl DiceExpr {
    /// Build an expression directly. `count` and `sides` must be nonzero;
    /// use [`FromStr`] for untrusted input.
    #[must_use]
    pub fn new(count: u32, sides: u32, modifier: i64) -> Self {
        debug_assert!(count > 0 && sides > 0);
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Roll and return the total.
    pub fn roll(&self, rng: &mut impl Rng) -> i64 {
        let mut total = self.modifier;
        for _ in 0..self.count {
            total += rng.gen_range(1..=i64::from(self.sides));
        }
        total
    }

    /// Roll and return each die plus the total.
    pub fn roll_detailed(&self, rng: &mut impl Rng) -> (SmallVec<[i64; 8]>, i64) {
        let mut dice = SmallVec::new();
        for _ in 0..self.count {
            dice.push(rng.gen_range(1..=i64::from(self.sides)));
        }
        let total = dice.iter().sum::<i64>() + self.modifier;
        (dice, total)
    }

    /// Minimum possible total.
    #[must_use]
    pub fn min(&self) -> i64 {
        i64::from(self.count) + self.modifier
    }

    /// Maximum possible total.
    #[must_use]
    pub fn max(&self) -> i64 {
        i64::from(self.count) * i64::from(self.sides) + self.modifier
    }
}

impl FromStr for DiceExpr {
    type Err = DiceParseError;

    fn from_str(notation: &str) -> Result<Self, Self::Err> {
        let notation = notation.trim().to_lowercase();

        let d_pos = notation
            .find('d')
            .ok_or_else(|| DiceParseError::MissingSeparator(notation.clone()))?;

        // "d6" means "1d6"
        let count_str = &notation[..d_pos];
        let count: u32 = if count_str.is_empty() {
            1
        } else {
            count_str
                .parse()
                .map_err(|_| DiceParseError::InvalidCount(count_str.to_string()))?
        };
        if count == 0 {
            return Err(DiceParseError::ZeroCount);
        }

        let rest = &notation[d_pos + 1..];
        let (sides_str, modifier) = if let Some(plus_pos) = rest.find('+') {
            let mod_str = &rest[plus_pos + 1..];
            let modifier: i64 = mod_str
                .parse()
                .map_err(|_| DiceParseError::InvalidModifier(mod_str.to_string()))?;
            (&rest[..plus_pos], modifier)
        } else if let Some(minus_pos) = rest.rfind('-') {
            if minus_pos == 0 {
                (rest, 0)
            } else {
                // the slice keeps the minus sign
                let mod_str = &rest[minus_pos..];
                let modifier: i64 = mod_str
                    .parse()
                    .map_err(|_| DiceParseError::InvalidModifier(mod_str.to_string()))?;
                (&rest[..minus_pos], modifier)
            }
        } else {
            (rest, 0)
        };

        let sides: u32 = sides_str
            .parse()
            .map_err(|_| DiceParseError::InvalidSides(sides_str.to_string()))?;
        if sides == 0 {
            return Err(DiceParseError::ZeroSides);
        }

        Ok(Self {
            count,
            sides,
            modifier,
        })
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifier > 0 {
            write!(f, "{}d{}+{}", self.count, self.sides, self.modifier)
        } else if self.modifier < 0 {
            write!(f, "{}d{}{}", self.count, self.sides, self.modifier)
        } else {
            write!(f, "{}d{}", self.count, self.sides)
        }
    }
}

impl TryFrom<String> for DiceExpr {
    type Error = DiceParseError;

    fn try_from(notation: String) -> Result<Self, Self::Error> {
        notation.parse()
    }
}

impl From<DiceExpr> for String {
    fn from(dice: DiceExpr) -> Self {
        dice.to_string()
    }
}

/// A literal quantity or a dice expression.
///
/// On the wire this is either a JSON number or a notation string, so
/// `"amount": 10` and `"amount": "2d6+3"` both work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Fixed(i64),
    Dice(DiceExpr),
}

impl Amount {
    /// Resolve to a concrete value, rolling any dice through `roll`.
    pub fn resolve(&self, roll: impl FnOnce(&DiceExpr) -> i64) -> i64 {
        match self {
            Amount::Fixed(value) => *value,
            Amount::Dice(dice) => roll(dice),
        }
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Fixed(value)
    }
}

// Integer literals land here.
impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount::Fixed(i64::from(value))
    }
}

impl From<DiceExpr> for Amount {
    fn from(dice: DiceExpr) -> Self {
        Amount::Dice(dice)
    }
}
