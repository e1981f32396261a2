use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a prize is celebrated or consoled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrizeCategory {
    #[default]
    Success,
    Failure,
}

/// A single awardable outcome
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prize {
    pub label: String,
    #[serde(default)]
    pub category: PrizeCategory,
}

impl Prize {
    pub fn new(label: impl Into<String>, category: PrizeCategory) -> Self {
        Self {
            label: label.into(),
            category,
        }
    }

    pub fn success(label: impl Into<String>) -> Self {
        Self::new(label, PrizeCategory::Success)
    }

    pub fn failure(label: impl Into<String>) -> Self {
        Self::new(label, PrizeCategory::Failure)
    }

    pub fn is_failure(&self) -> bool {
        self.category == PrizeCategory::Failure
    }
}

impl fmt::Display for Prize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Built-in pool: five gifts and one consolation
pub fn default_prizes() -> Vec<Prize> {
    vec![
        Prize::success("Gift certificate for 2000 rubles at WB/Ozon"),
        Prize::success("Box of New Year chocolates"),
        Prize::success("Coupon for hugs"),
        Prize::success("Gift certificate for 1000 rubles at WB/Ozon"),
        Prize::success("Telegram Premium for 3 months"),
        Prize::failure("New Year cashback! Try again..."),
    ]
}
