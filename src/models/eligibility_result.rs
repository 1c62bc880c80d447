//! Eligibility result models.
//!
//! This module contains the [`EligibilityResult`] returned by every income
//! rule, and the [`AuditStep`] records that trace which rule path fired.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CommonInputs, EmploymentStatus};
use crate::calculation::{currency_label, round_currency};

/// A single step in the audit trace recording a rule decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number, starting at 1.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

impl AuditStep {
    /// Creates an unnumbered step; the number is assigned when the step is
    /// attached to a result.
    pub fn new(
        rule_id: impl Into<String>,
        rule_name: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            step_number: 0,
            rule_id: rule_id.into(),
            rule_name: rule_name.into(),
            input,
            output,
            reasoning: reasoning.into(),
        }
    }
}

/// The outcome of evaluating one borrower's income under one status rule.
///
/// Invariants upheld by the constructors:
/// - `monthly_eligible_revenue` is rounded to the cent;
/// - an ineligible result has a zero eligible revenue and at least one warning;
/// - for an ineligible result `total_monthly_revenue` is only a display floor
///   (fixed salary + other income). Use [`EligibilityResult::validated_total`]
///   when the figure must be relied upon.
///
/// # Example
///
/// ```
/// use revenue_engine::models::{CommonInputs, EligibilityResult, EmploymentStatus};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let common = CommonInputs::new(Decimal::from(2000), Decimal::from(150));
/// let result = EligibilityResult::ineligible(
///     EmploymentStatus::Cdd,
///     &common,
///     "CDD: no income figure supplied.",
///     vec!["Supply the 12-month net taxable income.".to_string()],
/// );
///
/// assert!(!result.eligible);
/// assert_eq!(result.monthly_eligible_revenue, Decimal::ZERO);
/// assert_eq!(result.total_monthly_revenue, Decimal::from_str("2150.00").unwrap());
/// assert_eq!(result.validated_total(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    /// The status the result was computed for.
    pub status: EmploymentStatus,
    /// Whether the income can be retained by the lender.
    pub eligible: bool,
    /// Monthly income the lender may count.
    pub monthly_eligible_revenue: Decimal,
    /// Eligible revenue plus other stable income (display floor when ineligible).
    pub total_monthly_revenue: Decimal,
    /// Which formula path fired and why.
    pub explanation: String,
    /// Caveats, in the order they were raised.
    pub warnings: Vec<String>,
    /// Trace of the rule path.
    pub audit_steps: Vec<AuditStep>,
}

impl EligibilityResult {
    /// Builds an eligible result from an unrounded monthly revenue.
    ///
    /// A revenue that rounds to zero cannot be counted, so the result is
    /// ineligible with a warning instead.
    pub fn eligible(
        status: EmploymentStatus,
        monthly_eligible_revenue: Decimal,
        common: &CommonInputs,
        explanation: impl Into<String>,
    ) -> Self {
        let monthly_eligible_revenue = round_currency(monthly_eligible_revenue);
        if monthly_eligible_revenue.is_zero() {
            return Self::ineligible(
                status,
                common,
                explanation,
                vec![format!(
                    "Retained income rounds to {} per month: nothing can be counted.",
                    currency_label(monthly_eligible_revenue)
                )],
            );
        }
        Self {
            status,
            eligible: true,
            monthly_eligible_revenue,
            total_monthly_revenue: round_currency(
                monthly_eligible_revenue + common.other_stable_monthly_income,
            ),
            explanation: explanation.into(),
            warnings: Vec::new(),
            audit_steps: Vec::new(),
        }
    }

    /// Builds an ineligible result carrying the display floor.
    ///
    /// When no warning is supplied the explanation is repeated as the warning,
    /// so an ineligible result is never left without a reason.
    pub fn ineligible(
        status: EmploymentStatus,
        common: &CommonInputs,
        explanation: impl Into<String>,
        warnings: Vec<String>,
    ) -> Self {
        let explanation = explanation.into();
        let warnings = if warnings.is_empty() {
            vec![explanation.clone()]
        } else {
            warnings
        };
        Self {
            status,
            eligible: false,
            monthly_eligible_revenue: round_currency(Decimal::ZERO),
            total_monthly_revenue: round_currency(
                common.fixed_monthly_salary + common.other_stable_monthly_income,
            ),
            explanation,
            warnings,
            audit_steps: Vec::new(),
        }
    }

    /// Appends a warning.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Appends an audit step, numbering it after the existing ones.
    pub fn with_audit_step(mut self, mut step: AuditStep) -> Self {
        step.step_number = self.audit_steps.len() as u32 + 1;
        self.audit_steps.push(step);
        self
    }

    /// The total monthly revenue, only when it reflects validated income.
    pub fn validated_total(&self) -> Option<Decimal> {
        self.eligible.then_some(self.total_monthly_revenue)
    }
}
