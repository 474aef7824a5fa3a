use serde::{Deserialize, Serialize};

/// One progressive tax bracket.
///
/// `up_to_income` is the bracket's ceiling. A ceiling of `0` marks the
/// unbounded top bracket, which must come last.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub up_to_income: f64,
    pub rate: f64,
}

impl TaxBracket {
    pub const fn new(up_to_income: f64, rate: f64) -> Self {
        Self { up_to_income, rate }
    }

    pub const fn top(rate: f64) -> Self {
        Self {
            up_to_income: 0.0,
            rate,
        }
    }

    pub fn is_top(&self) -> bool {
        self.up_to_income == 0.0
    }
}
