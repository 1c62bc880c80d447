//! Single-formula income rules.
//!
//! Military, civil-service trainee, childminder, apprentice, volunteer
//! firefighter, elected official, multi-employer and foster family incomes
//! are each one annual basis spread over twelve months.

use rust_decimal::Decimal;
use tracing::debug;

use super::currency::{MONTHS_PER_YEAR, currency_label};
use crate::models::{
    ApprenticeInputs, AuditStep, ChildminderAssistantInputs, CommonInputs, EligibilityResult,
    ElectedOfficialInputs, EmploymentStatus, FosterFamilyInputs, MilitaryInputs,
    MultiEmployerInputs, PublicInternshipInputs, VolunteerFirefighterInputs,
};

/// Number of years averaged for military income.
pub const MILITARY_YEARS: u32 = 3;

/// Number of years averaged for volunteer firefighter income.
pub const FIREFIGHTER_YEARS: u32 = 2;

/// An annual basis ready to be spread over twelve months.
struct AnnualBasis {
    status: EmploymentStatus,
    rule_id: &'static str,
    rule_name: &'static str,
    amount: Decimal,
    formula: &'static str,
    missing_warning: &'static str,
    input: serde_json::Value,
}

/// Turns an annual basis into a result, routing a zero basis to ineligibility.
fn retain_annual_basis(common: &CommonInputs, basis: AnnualBasis) -> EligibilityResult {
    let name = basis.status.display_name();

    if basis.amount <= Decimal::ZERO {
        debug!(status = %basis.status, "annual basis missing");
        return EligibilityResult::ineligible(
            basis.status,
            common,
            format!("{}: no annual income supplied.", name),
            vec![basis.missing_warning.to_string()],
        )
        .with_audit_step(AuditStep::new(
            basis.rule_id,
            basis.rule_name,
            basis.input,
            serde_json::json!({ "eligible": false, "reason": "income_missing" }),
            format!("{}: annual basis is zero", name),
        ));
    }

    let result = EligibilityResult::eligible(
        basis.status,
        basis.amount / MONTHS_PER_YEAR,
        common,
        format!("{}: {} / 12.", name, basis.formula),
    );

    debug!(
        status = %basis.status,
        revenue = %result.monthly_eligible_revenue,
        "annual basis retained"
    );
    let reasoning = format!(
        "{} / 12 = {}",
        currency_label(basis.amount),
        currency_label(result.monthly_eligible_revenue)
    );
    let output = serde_json::json!({
        "eligible": result.eligible,
        "annual_basis": basis.amount.to_string(),
        "monthly_eligible_revenue": result.monthly_eligible_revenue.to_string()
    });
    result.with_audit_step(AuditStep::new(
        basis.rule_id,
        basis.rule_name,
        basis.input,
        output,
        reasoning,
    ))
}

/// Evaluates military income: mean of three yearly taxable incomes.
///
/// A year left empty counts as zero in the mean.
///
/// # Examples
///
/// ```
/// use revenue_engine::calculation::evaluate_military;
/// use revenue_engine::models::{AnnualIncomeHistory, CommonInputs, MilitaryInputs};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let inputs = MilitaryInputs {
///     annual_incomes: AnnualIncomeHistory::new(
///         Some(Decimal::from(30000)),
///         Some(Decimal::from(28800)),
///         Some(Decimal::from(27600)),
///     ),
/// };
/// let result = evaluate_military(&CommonInputs::new(Decimal::ZERO, Decimal::ZERO), &inputs);
/// assert_eq!(result.monthly_eligible_revenue, Decimal::from_str("2400.00").unwrap());
/// ```
pub fn evaluate_military(common: &CommonInputs, inputs: &MilitaryInputs) -> EligibilityResult {
    let total = inputs.annual_incomes.total();
    let declared: Vec<Option<String>> = inputs
        .annual_incomes
        .values()
        .iter()
        .map(|value| value.map(|d| d.to_string()))
        .collect();
    retain_annual_basis(
        common,
        AnnualBasis {
            status: EmploymentStatus::Military,
            rule_id: "military_income",
            rule_name: "Military Income",
            amount: total / Decimal::from(MILITARY_YEARS),
            formula: "mean of the last three yearly taxable incomes",
            missing_warning: "Supply the taxable incomes of the last three years.",
            input: serde_json::json!({ "annual_incomes": declared }),
        },
    )
}

/// Evaluates a civil-service trainee: annual taxable income.
pub fn evaluate_public_internship(
    common: &CommonInputs,
    inputs: &PublicInternshipInputs,
) -> EligibilityResult {
    retain_annual_basis(
        common,
        AnnualBasis {
            status: EmploymentStatus::PublicInternship,
            rule_id: "public_internship_income",
            rule_name: "Public Internship Income",
            amount: inputs.annual_taxable_income,
            formula: "annual taxable income",
            missing_warning: "Supply the annual net taxable income.",
            input: serde_json::json!({
                "annual_taxable_income": inputs.annual_taxable_income.to_string()
            }),
        },
    )
}

/// Evaluates a childminder: annual cumulative benefit-scheme income.
pub fn evaluate_childminder_assistant(
    common: &CommonInputs,
    inputs: &ChildminderAssistantInputs,
) -> EligibilityResult {
    let result = retain_annual_basis(
        common,
        AnnualBasis {
            status: EmploymentStatus::ChildminderAssistant,
            rule_id: "childminder_income",
            rule_name: "Childminder Income",
            amount: inputs.annual_benefit_income,
            formula: "annual cumulative childcare-scheme income",
            missing_warning: "Supply the annual cumulative childcare-scheme income.",
            input: serde_json::json!({
                "annual_benefit_income": inputs.annual_benefit_income.to_string()
            }),
        },
    );
    if result.eligible {
        result.with_warning("Verify the continuity of the childcare contracts and approval.")
    } else {
        result
    }
}

/// Evaluates an apprentice: annual taxable income, nothing once the contract
/// has expired.
///
/// # Examples
///
/// ```
/// use revenue_engine::calculation::evaluate_apprentice;
/// use revenue_engine::models::{ApprenticeInputs, CommonInputs};
/// use rust_decimal::Decimal;
///
/// let inputs = ApprenticeInputs {
///     annual_taxable_income: Decimal::from(14400),
///     remaining_contract_months: 0,
/// };
/// let result = evaluate_apprentice(&CommonInputs::new(Decimal::ZERO, Decimal::ZERO), &inputs);
/// assert!(!result.eligible);
/// assert_eq!(result.monthly_eligible_revenue, Decimal::ZERO);
/// ```
pub fn evaluate_apprentice(common: &CommonInputs, inputs: &ApprenticeInputs) -> EligibilityResult {
    let input = serde_json::json!({
        "annual_taxable_income": inputs.annual_taxable_income.to_string(),
        "remaining_contract_months": inputs.remaining_contract_months
    });

    if inputs.remaining_contract_months == 0 {
        debug!("apprenticeship contract expired");
        return EligibilityResult::ineligible(
            EmploymentStatus::Apprentice,
            common,
            "Apprentice: contract expired, income not retained.",
            vec!["Contract expired: no remaining months on the apprenticeship contract.".to_string()],
        )
        .with_audit_step(AuditStep::new(
            "apprentice_income",
            "Apprentice Income",
            input,
            serde_json::json!({ "eligible": false, "reason": "contract_expired" }),
            "remaining contract duration is 0 months",
        ));
    }

    let mut result = retain_annual_basis(
        common,
        AnnualBasis {
            status: EmploymentStatus::Apprentice,
            rule_id: "apprentice_income",
            rule_name: "Apprentice Income",
            amount: inputs.annual_taxable_income,
            formula: "annual taxable income",
            missing_warning: "Supply the annual net taxable income of the apprentice.",
            input,
        },
    );
    if result.eligible {
        result
            .explanation
            .push_str(" Use the apprentice's tax notice, or the parents' if attached to their household.");
    }
    result
}

/// Evaluates a volunteer firefighter: mean of two yearly taxable incomes.
pub fn evaluate_volunteer_firefighter(
    common: &CommonInputs,
    inputs: &VolunteerFirefighterInputs,
) -> EligibilityResult {
    let total = inputs.taxable_income_year_n + inputs.taxable_income_year_n_minus_1;
    let result = retain_annual_basis(
        common,
        AnnualBasis {
            status: EmploymentStatus::VolunteerFirefighter,
            rule_id: "volunteer_firefighter_income",
            rule_name: "Volunteer Firefighter Income",
            amount: total / Decimal::from(FIREFIGHTER_YEARS),
            formula: "mean of the last two yearly taxable incomes",
            missing_warning: "Supply the taxable incomes of the last two years.",
            input: serde_json::json!({
                "taxable_income_year_n": inputs.taxable_income_year_n.to_string(),
                "taxable_income_year_n_minus_1": inputs.taxable_income_year_n_minus_1.to_string()
            }),
        },
    );
    if result.eligible {
        result.with_warning("Activity is expected to continue for at least 24 months.")
    } else {
        result
    }
}

/// Evaluates an elected official: mandate income plus other annual income.
pub fn evaluate_elected_official(
    common: &CommonInputs,
    inputs: &ElectedOfficialInputs,
) -> EligibilityResult {
    let result = retain_annual_basis(
        common,
        AnnualBasis {
            status: EmploymentStatus::ElectedOfficial,
            rule_id: "elected_official_income",
            rule_name: "Elected Official Income",
            amount: inputs.annual_mandate_income + inputs.other_annual_income,
            formula: "(mandate income + other annual income)",
            missing_warning: "Supply the annual mandate income.",
            input: serde_json::json!({
                "annual_mandate_income": inputs.annual_mandate_income.to_string(),
                "other_annual_income": inputs.other_annual_income.to_string()
            }),
        },
    );
    if result.eligible {
        result.with_warning("Check that the mandate covers the loan duration.")
    } else {
        result
    }
}

/// Evaluates a borrower with several employers: sum of every employer's
/// annual taxable income.
///
/// # Examples
///
/// ```
/// use revenue_engine::calculation::evaluate_multi_employer;
/// use revenue_engine::models::{CommonInputs, EmployerIncome, MultiEmployerInputs};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let inputs = MultiEmployerInputs {
///     employers: vec![
///         EmployerIncome { annual_taxable_income: Decimal::from(18000), fixed_term: false },
///         EmployerIncome { annual_taxable_income: Decimal::from(12000), fixed_term: false },
///     ],
/// };
/// let result = evaluate_multi_employer(&CommonInputs::new(Decimal::ZERO, Decimal::ZERO), &inputs);
/// assert_eq!(result.monthly_eligible_revenue, Decimal::from_str("2500.00").unwrap());
/// ```
pub fn evaluate_multi_employer(
    common: &CommonInputs,
    inputs: &MultiEmployerInputs,
) -> EligibilityResult {
    let total: Decimal = inputs
        .employers
        .iter()
        .map(|employer| employer.annual_taxable_income)
        .sum();
    let fixed_term_count = inputs
        .employers
        .iter()
        .filter(|employer| employer.fixed_term)
        .count();
    let employers: Vec<serde_json::Value> = inputs
        .employers
        .iter()
        .map(|employer| {
            serde_json::json!({
                "annual_taxable_income": employer.annual_taxable_income.to_string(),
                "fixed_term": employer.fixed_term
            })
        })
        .collect();

    let result = retain_annual_basis(
        common,
        AnnualBasis {
            status: EmploymentStatus::MultiEmployer,
            rule_id: "multi_employer_income",
            rule_name: "Multi-Employer Income",
            amount: total,
            formula: "sum of the annual taxable incomes of every employer",
            missing_warning: "Supply the annual net taxable income of each employer.",
            input: serde_json::json!({ "employers": employers }),
        },
    );

    if fixed_term_count > 0 {
        result.with_warning(format!(
            "{} fixed-term contract(s) among the employers: verify at least 18 months of activity over the last 24.",
            fixed_term_count
        ))
    } else {
        result
    }
}

/// Evaluates a foster family: annual income excluding resident-support supplements.
pub fn evaluate_foster_family(
    common: &CommonInputs,
    inputs: &FosterFamilyInputs,
) -> EligibilityResult {
    let result = retain_annual_basis(
        common,
        AnnualBasis {
            status: EmploymentStatus::FosterFamily,
            rule_id: "foster_family_income",
            rule_name: "Foster Family Income",
            amount: inputs.annual_income_excluding_supplements,
            formula: "annual income excluding resident-support supplements",
            missing_warning: "Supply the annual income excluding resident-support supplements.",
            input: serde_json::json!({
                "annual_income_excluding_supplements":
                    inputs.annual_income_excluding_supplements.to_string()
            }),
        },
    );
    if result.eligible {
        result.with_warning("Verify the continuity of the approval (5 years, renewable).")
    } else {
        result
    }
}
