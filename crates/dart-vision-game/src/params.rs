use serde::{Deserialize, Serialize};

/// Condition the last dart must meet for a leg to be won on exactly zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutRule {
    /// Last dart must be a double.
    #[default]
    Double,
    /// A double or the bullseye.
    DoubleOrBull,
    /// Any dart.
    Any,
}

impl CheckoutRule {
    pub fn allows(self, last_label: &str) -> bool {
        match self {
            CheckoutRule::Double => last_label.starts_with("Double"),
            CheckoutRule::DoubleOrBull => {
                last_label.starts_with("Double") || last_label == "Bullseye"
            }
            CheckoutRule::Any => true,
        }
    }

    /// Whether a remaining score of 1 can never be checked out.
    pub fn requires_double(self) -> bool {
        !matches!(self, CheckoutRule::Any)
    }

    /// Whether scoring `total` from `remaining` already busts, before the
    /// checkout dart itself is looked at.
    pub fn busts(self, remaining: u32, total: u32) -> bool {
        match remaining.checked_sub(total) {
            None => true,
            Some(1) => self.requires_double(),
            Some(_) => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameParams {
    pub starting_score: u32,
    /// Leg wins per set.
    pub legs_per_set: u32,
    pub checkout: CheckoutRule,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            starting_score: 501,
            legs_per_set: 3,
            checkout: CheckoutRule::Double,
        }
    }
}
