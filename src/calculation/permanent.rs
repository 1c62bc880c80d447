//! Permanent contract (CDI) income rule.
//!
//! The rule is a small state machine evaluated in priority order:
//!
//! 1. a documented change of situation retains the mean of the latest payslips;
//! 2. under 12 months of tenure, the contract salary is retained once the
//!    probation period is over, with a coefficient depending on executive status;
//! 3. from 12 months of tenure, the lower of the two fiscal bases is retained,
//!    falling back to the fixed salary when neither is supplied.
//!
//! Bonuses are added on the contract and fallback paths only. The fiscal
//! bases already include them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::currency::{MONTHS_PER_YEAR, average_of_present, currency_label};
use crate::models::{
    AuditStep, CommonInputs, EligibilityResult, EmploymentStatus, PermanentInputs,
};

/// Tenure from which the fiscal bases replace the contract terms.
pub const STABLE_TENURE_MONTHS: u32 = 12;

/// Tenure from which non-contractual bonuses are credited in full.
pub const FULL_BONUS_CREDIT_TENURE_MONTHS: u32 = 36;

/// Share of the contract gross salary retained for an executive.
pub const EXECUTIVE_COEFFICIENT: Decimal = Decimal::from_parts(75, 0, 0, false, 2);

/// Share of the contract gross salary retained for a non-executive.
pub const NON_EXECUTIVE_COEFFICIENT: Decimal = Decimal::from_parts(78, 0, 0, false, 2);

/// The branch of the CDI rule that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermanentPath {
    /// Mean of the latest payslips after a change of situation.
    SituationChange,
    /// Under 12 months, probation still running.
    ProbationNotCompleted,
    /// Under 12 months, contract salary with coefficient plus bonuses.
    ContractBasis,
    /// From 12 months, lower of the two fiscal bases.
    FiscalBase,
    /// From 12 months without fiscal figures, fixed salary plus bonuses.
    FixedSalaryFallback,
}

impl PermanentPath {
    fn as_str(&self) -> &'static str {
        match self {
            PermanentPath::SituationChange => "situation_change",
            PermanentPath::ProbationNotCompleted => "probation_not_completed",
            PermanentPath::ContractBasis => "contract_basis",
            PermanentPath::FiscalBase => "fiscal_base",
            PermanentPath::FixedSalaryFallback => "fixed_salary_fallback",
        }
    }
}

/// Selects the branch of the CDI rule that applies to `inputs`.
///
/// # Examples
///
/// ```
/// use revenue_engine::calculation::{select_permanent_path, PermanentPath};
/// use revenue_engine::models::PermanentInputs;
/// use rust_decimal::Decimal;
///
/// let inputs = PermanentInputs {
///     tenure_months: 24,
///     probation_completed: true,
///     executive: false,
///     contractual_annual_gross_salary: Decimal::ZERO,
///     contractual_annual_bonus: Decimal::ZERO,
///     non_contractual_bonuses: vec![],
///     cumulative_taxable_income: Decimal::from(28000),
///     tax_return_taxable_income: Decimal::from(26000),
///     situation_change: None,
/// };
/// assert_eq!(select_permanent_path(&inputs), PermanentPath::FiscalBase);
/// ```
pub fn select_permanent_path(inputs: &PermanentInputs) -> PermanentPath {
    if !positive_payslips(inputs).is_empty() {
        return PermanentPath::SituationChange;
    }
    if inputs.tenure_months < STABLE_TENURE_MONTHS {
        if inputs.probation_completed {
            PermanentPath::ContractBasis
        } else {
            PermanentPath::ProbationNotCompleted
        }
    } else if fiscal_base(inputs).is_some() {
        PermanentPath::FiscalBase
    } else {
        PermanentPath::FixedSalaryFallback
    }
}

/// Monthly credit for non-contractual bonuses.
///
/// The mean of the supplied positive years divided by 12, reduced to two
/// thirds while tenure is under 36 months.
///
/// # Examples
///
/// ```
/// use revenue_engine::calculation::non_contractual_bonus_monthly;
/// use rust_decimal::Decimal;
///
/// let bonuses = [Decimal::from(1200), Decimal::from(1800)];
/// assert_eq!(non_contractual_bonus_monthly(&bonuses, 48), Decimal::from(125));
/// assert_eq!(non_contractual_bonus_monthly(&[], 6), Decimal::ZERO);
/// ```
pub fn non_contractual_bonus_monthly(bonuses: &[Decimal], tenure_months: u32) -> Decimal {
    let monthly = average_of_present(bonuses.iter().copied().map(Some)) / MONTHS_PER_YEAR;
    if tenure_months < FULL_BONUS_CREDIT_TENURE_MONTHS {
        monthly * Decimal::TWO / Decimal::from(3)
    } else {
        monthly
    }
}

/// Evaluates a permanent contract.
///
/// # Examples
///
/// ```
/// use revenue_engine::calculation::evaluate_permanent;
/// use revenue_engine::models::{CommonInputs, PermanentInputs};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let inputs = PermanentInputs {
///     tenure_months: 6,
///     probation_completed: true,
///     executive: false,
///     contractual_annual_gross_salary: Decimal::from(30000),
///     contractual_annual_bonus: Decimal::ZERO,
///     non_contractual_bonuses: vec![Decimal::ZERO; 3],
///     cumulative_taxable_income: Decimal::ZERO,
///     tax_return_taxable_income: Decimal::ZERO,
///     situation_change: None,
/// };
/// let common = CommonInputs::new(Decimal::from(2500), Decimal::ZERO);
///
/// let result = evaluate_permanent(&common, &inputs);
/// assert_eq!(result.monthly_eligible_revenue, Decimal::from_str("1950.00").unwrap());
/// ```
pub fn evaluate_permanent(common: &CommonInputs, inputs: &PermanentInputs) -> EligibilityResult {
    let path = select_permanent_path(inputs);
    debug!(path = path.as_str(), tenure_months = inputs.tenure_months, "CDI path selected");

    let input = serde_json::json!({
        "tenure_months": inputs.tenure_months,
        "probation_completed": inputs.probation_completed,
        "executive": inputs.executive,
        "contractual_annual_gross_salary": inputs.contractual_annual_gross_salary.to_string(),
        "contractual_annual_bonus": inputs.contractual_annual_bonus.to_string(),
        "cumulative_taxable_income": inputs.cumulative_taxable_income.to_string(),
        "tax_return_taxable_income": inputs.tax_return_taxable_income.to_string(),
        "situation_change": inputs.situation_change.is_some()
    });

    let result = match path {
        PermanentPath::SituationChange => {
            let payslips = positive_payslips(inputs);
            let mean = average_of_present(payslips.iter().copied().map(Some));
            let result = EligibilityResult::eligible(
                EmploymentStatus::Cdi,
                mean,
                common,
                "CDI (situation change): mean of the latest net payslips.",
            );
            let reasoning = format!(
                "mean of {} payslip(s) = {}",
                payslips.len(),
                currency_label(result.monthly_eligible_revenue)
            );
            path_step(result, path, input, reasoning)
        }
        PermanentPath::ProbationNotCompleted => {
            let result = EligibilityResult::ineligible(
                EmploymentStatus::Cdi,
                common,
                "CDI < 12 months: probation not completed.",
                vec!["Probation period not completed: income cannot be retained yet.".to_string()],
            );
            path_step(
                result,
                path,
                input,
                format!(
                    "tenure {} months < {} and probation still running",
                    inputs.tenure_months, STABLE_TENURE_MONTHS
                ),
            )
        }
        PermanentPath::ContractBasis => {
            let coefficient = if inputs.executive {
                EXECUTIVE_COEFFICIENT
            } else {
                NON_EXECUTIVE_COEFFICIENT
            };
            let base = inputs.contractual_annual_gross_salary * coefficient / MONTHS_PER_YEAR;
            let (bonus_credit, bonus_step) = bonus_credit(inputs);
            let result = EligibilityResult::eligible(
                EmploymentStatus::Cdi,
                base + bonus_credit,
                common,
                format!(
                    "CDI < 12 months: (annual gross x {}) / 12 + bonuses (contractual 100% / 12; non-contractual mean / 12 x {}).",
                    coefficient,
                    bonus_ratio_label(inputs.tenure_months)
                ),
            )
            .with_audit_step(bonus_step);
            let reasoning = format!(
                "{} x {} / 12 = {}, + bonuses {} = {}",
                currency_label(inputs.contractual_annual_gross_salary),
                coefficient,
                currency_label(base),
                currency_label(bonus_credit),
                currency_label(result.monthly_eligible_revenue)
            );
            path_step(result, path, input, reasoning)
        }
        PermanentPath::FiscalBase => {
            // Checked by select_permanent_path.
            let lowest = fiscal_base(inputs).unwrap_or(Decimal::ZERO);
            let result = EligibilityResult::eligible(
                EmploymentStatus::Cdi,
                lowest / MONTHS_PER_YEAR,
                common,
                "CDI >= 12 months: fiscal base = min(cumulative net taxable; tax-return net taxable) / 12.",
            );
            let reasoning = format!(
                "min of supplied fiscal bases = {}, / 12 = {} (bonuses already included)",
                currency_label(lowest),
                currency_label(result.monthly_eligible_revenue)
            );
            path_step(result, path, input, reasoning)
        }
        PermanentPath::FixedSalaryFallback => {
            let (bonus_credit, bonus_step) = bonus_credit(inputs);
            let result = EligibilityResult::eligible(
                EmploymentStatus::Cdi,
                common.fixed_monthly_salary + bonus_credit,
                common,
                format!(
                    "CDI >= 12 months (fallback): fixed salary + bonuses (contractual 100% / 12; non-contractual mean / 12 x {}).",
                    bonus_ratio_label(inputs.tenure_months)
                ),
            )
            .with_audit_step(bonus_step)
            .with_warning(
                "No fiscal figure supplied: supply the cumulative net taxable income or the last tax return to use the fiscal base.",
            );
            let reasoning = format!(
                "{} + bonuses {} = {}",
                currency_label(common.fixed_monthly_salary),
                currency_label(bonus_credit),
                currency_label(result.monthly_eligible_revenue)
            );
            path_step(result, path, input, reasoning)
        }
    };

    if path != PermanentPath::SituationChange && inputs.situation_change.is_some() {
        return result.with_warning(
            "Situation change flagged without any payslip figure: standard CDI rule applied.",
        );
    }
    result
}

fn positive_payslips(inputs: &PermanentInputs) -> Vec<Decimal> {
    inputs
        .situation_change
        .as_ref()
        .map(|change| {
            change
                .recent_net_payslips
                .iter()
                .copied()
                .filter(|payslip| *payslip > Decimal::ZERO)
                .collect()
        })
        .unwrap_or_default()
}

/// The lower of the positive fiscal figures, if any.
fn fiscal_base(inputs: &PermanentInputs) -> Option<Decimal> {
    [
        inputs.cumulative_taxable_income,
        inputs.tax_return_taxable_income,
    ]
    .into_iter()
    .filter(|value| *value > Decimal::ZERO)
    .min()
}

fn bonus_ratio_label(tenure_months: u32) -> &'static str {
    if tenure_months < FULL_BONUS_CREDIT_TENURE_MONTHS {
        "2/3"
    } else {
        "1"
    }
}

/// Monthly bonus credit (contractual + non-contractual) and its audit step.
fn bonus_credit(inputs: &PermanentInputs) -> (Decimal, AuditStep) {
    let contractual = inputs.contractual_annual_bonus / MONTHS_PER_YEAR;
    let non_contractual =
        non_contractual_bonus_monthly(&inputs.non_contractual_bonuses, inputs.tenure_months);
    let total = contractual + non_contractual;

    let step = AuditStep::new(
        "cdi_bonus_credit",
        "CDI Bonus Credit",
        serde_json::json!({
            "contractual_annual_bonus": inputs.contractual_annual_bonus.to_string(),
            "non_contractual_bonuses": inputs
                .non_contractual_bonuses
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>(),
            "tenure_months": inputs.tenure_months
        }),
        serde_json::json!({
            "contractual_monthly": contractual.round_dp(2).to_string(),
            "non_contractual_monthly": non_contractual.round_dp(2).to_string(),
            "non_contractual_ratio": bonus_ratio_label(inputs.tenure_months)
        }),
        format!(
            "contractual {} / 12 + non-contractual mean / 12 x {} = {}",
            currency_label(inputs.contractual_annual_bonus),
            bonus_ratio_label(inputs.tenure_months),
            currency_label(total)
        ),
    );
    (total, step)
}

fn path_step(
    result: EligibilityResult,
    path: PermanentPath,
    input: serde_json::Value,
    reasoning: String,
) -> EligibilityResult {
    let output = serde_json::json!({
        "path": path,
        "eligible": result.eligible,
        "monthly_eligible_revenue": result.monthly_eligible_revenue.to_string()
    });
    result.with_audit_step(AuditStep::new(
        "cdi_income",
        "CDI Income",
        input,
        output,
        reasoning,
    ))
}
