//! Fixed-term contract income rule (CDD, CDIC).
//!
//! The retained income is the 12-month net taxable income, excluding any
//! unemployment-insurance benefit, minus one-off bonuses and overtime,
//! spread over twelve months.

use rust_decimal::Decimal;
use tracing::debug;

use super::currency::{MONTHS_PER_YEAR, currency_label};
use crate::models::{
    AuditStep, CommonInputs, EligibilityResult, EmploymentStatus, FixedTermInputs,
};

/// Below this many remaining months the contract is flagged as ending soon.
pub const CONTRACT_ENDING_SOON_MONTHS: u32 = 3;

/// Evaluates a fixed-term contract.
///
/// `status` must be [`EmploymentStatus::Cdd`] or [`EmploymentStatus::Cdic`];
/// it only changes the wording of the explanation.
///
/// # Examples
///
/// ```
/// use revenue_engine::calculation::evaluate_fixed_term;
/// use revenue_engine::models::{CommonInputs, EmploymentStatus, FixedTermInputs};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let common = CommonInputs::new(Decimal::from(2000), Decimal::from(100));
/// let inputs = FixedTermInputs {
///     annual_taxable_income: Decimal::from(26000),
///     annual_deductions: Decimal::from(2000),
///     remaining_contract_months: 10,
/// };
///
/// let result = evaluate_fixed_term(EmploymentStatus::Cdd, &common, &inputs);
/// assert_eq!(result.monthly_eligible_revenue, Decimal::from_str("2000.00").unwrap());
/// assert_eq!(result.total_monthly_revenue, Decimal::from_str("2100.00").unwrap());
/// ```
pub fn evaluate_fixed_term(
    status: EmploymentStatus,
    common: &CommonInputs,
    inputs: &FixedTermInputs,
) -> EligibilityResult {
    let name = status.display_name();
    let input = serde_json::json!({
        "annual_taxable_income": inputs.annual_taxable_income.to_string(),
        "annual_deductions": inputs.annual_deductions.to_string(),
        "remaining_contract_months": inputs.remaining_contract_months
    });

    if inputs.annual_taxable_income <= Decimal::ZERO {
        debug!(status = %status, "fixed-term income missing");
        let reasoning = format!(
            "{}: no 12-month net taxable income supplied, income cannot be retained",
            name
        );
        return EligibilityResult::ineligible(
            status,
            common,
            format!("{}: 12-month net taxable income missing.", name),
            vec![
                "Supply the 12-month net taxable income excluding unemployment-insurance benefit."
                    .to_string(),
            ],
        )
        .with_audit_step(fixed_term_step(
            input,
            serde_json::json!({ "eligible": false, "reason": "income_missing" }),
            reasoning,
        ));
    }

    let net_annual = inputs.annual_taxable_income - inputs.annual_deductions;
    if net_annual <= Decimal::ZERO {
        debug!(status = %status, "fixed-term deductions absorb income");
        let warning = format!(
            "Annual deductions ({}) absorb the whole 12-month net taxable income ({}).",
            currency_label(inputs.annual_deductions),
            currency_label(inputs.annual_taxable_income)
        );
        return EligibilityResult::ineligible(
            status,
            common,
            format!("{}: nothing left once one-off bonuses and overtime are deducted.", name),
            vec![warning.clone()],
        )
        .with_audit_step(fixed_term_step(
            input,
            serde_json::json!({ "eligible": false, "reason": "deductions_exceed_income" }),
            warning,
        ));
    }

    let monthly = net_annual / MONTHS_PER_YEAR;

    let mut explanation = format!(
        "{}: 12-month net taxable income excluding unemployment benefit / 12.",
        name
    );
    if inputs.annual_deductions > Decimal::ZERO {
        explanation.push_str(&format!(
            " One-off bonuses/overtime deducted ({} per year).",
            currency_label(inputs.annual_deductions)
        ));
    }

    let mut result = EligibilityResult::eligible(status, monthly, common, explanation);
    let reasoning = format!(
        "({} - {}) / 12 = {}",
        currency_label(inputs.annual_taxable_income),
        currency_label(inputs.annual_deductions),
        currency_label(result.monthly_eligible_revenue)
    );
    let output = serde_json::json!({
        "eligible": result.eligible,
        "monthly_eligible_revenue": result.monthly_eligible_revenue.to_string()
    });

    if inputs.remaining_contract_months < CONTRACT_ENDING_SOON_MONTHS {
        result = result.with_warning(format!(
            "Contract ending soon: fewer than {} months remaining ({}).",
            CONTRACT_ENDING_SOON_MONTHS, inputs.remaining_contract_months
        ));
    }

    debug!(
        status = %status,
        revenue = %result.monthly_eligible_revenue,
        "fixed-term income retained"
    );
    result.with_audit_step(fixed_term_step(input, output, reasoning))
}

fn fixed_term_step(
    input: serde_json::Value,
    output: serde_json::Value,
    reasoning: String,
) -> AuditStep {
    AuditStep::new("fixed_term_income", "Fixed-Term Income", input, output, reasoning)
}
