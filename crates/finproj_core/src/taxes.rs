//! Progressive income tax
//!
//! Brackets are described by their ceilings (`up_to_income`), with a ceiling
//! of zero marking the unbounded top bracket. Federal and provincial tax are
//! two independent schedules evaluated on the same income and summed.

use crate::error::{ConfigError, Result};
use crate::model::TaxBracket;

/// A bracket list that has passed validation
#[derive(Debug, Clone, Copy)]
pub struct TaxSchedule<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> TaxSchedule<'a> {
    /// Validate `brackets`; `field` names them in any error
    pub fn new(brackets: &'a [TaxBracket], field: &str) -> Result<Self> {
        validate_brackets(brackets, field)?;
        Ok(Self { brackets })
    }

    /// Tax owed on an annual income
    pub fn tax_on(&self, annual_income: f64) -> f64 {
        if annual_income.is_nan() || annual_income <= 0.0 {
            return 0.0;
        }

        let mut tax = 0.0;
        let mut floor = 0.0;

        for bracket in self.brackets {
            let ceiling = if bracket.is_top() {
                f64::INFINITY
            } else {
                bracket.up_to_income
            };

            let taxable = annual_income.min(ceiling) - floor;
            if taxable <= 0.0 {
                break;
            }
            tax += taxable * bracket.rate;
            floor = ceiling;
        }

        tax
    }
}

/// Tax owed on `annual_income` under `brackets`
pub fn compute_tax(annual_income: f64, brackets: &[TaxBracket]) -> Result<f64> {
    Ok(TaxSchedule::new(brackets, "tax_brackets")?.tax_on(annual_income))
}

/// Federal plus provincial tax for one month, computed on the annualized income
pub fn monthly_tax(monthly_income: f64, federal: &TaxSchedule, provincial: &TaxSchedule) -> f64 {
    let annualized = monthly_income * 12.0;
    (federal.tax_on(annualized) + provincial.tax_on(annualized)) / 12.0
}

fn validate_brackets(brackets: &[TaxBracket], field: &str) -> Result<()> {
    if brackets.is_empty() {
        return Err(ConfigError::EmptyTaxBrackets {
            field: field.to_string(),
        });
    }

    for (i, bracket) in brackets.iter().enumerate() {
        if !bracket.rate.is_finite() || !(0.0..=1.0).contains(&bracket.rate) {
            return Err(ConfigError::InvalidRate {
                field: format!("{field}[{i}].rate"),
                value: bracket.rate,
                min: 0.0,
                max: 1.0,
            });
        }
        if !bracket.up_to_income.is_finite() {
            return Err(ConfigError::NonFiniteValue {
                field: format!("{field}[{i}].up_to_income"),
            });
        }
        if bracket.up_to_income < 0.0 {
            return Err(ConfigError::NegativeAmount {
                field: format!("{field}[{i}].up_to_income"),
                value: bracket.up_to_income,
            });
        }
    }

    let top_index = brackets
        .iter()
        .position(TaxBracket::is_top)
        .ok_or_else(|| ConfigError::MissingTopBracket {
            field: field.to_string(),
        })?;

    if top_index != brackets.len() - 1 {
        return Err(ConfigError::TopBracketNotLast {
            field: field.to_string(),
            index: top_index,
        });
    }

    let bounded = &brackets[..top_index];
    for i in 1..bounded.len() {
        if bounded[i].up_to_income <= bounded[i - 1].up_to_income {
            return Err(ConfigError::UnsortedTaxBrackets {
                field: field.to_string(),
                index: i,
            });
        }
    }

    Ok(())
}
