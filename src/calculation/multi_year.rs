//! Multi-year average income rules (Temp-Agency, Intermittent, Seasonal).
//!
//! These statuses retain the mean of up to three annual net taxable incomes
//! (unemployment-insurance benefit included), provided the borrower shows a
//! long enough history of activity. The history check does not look at the
//! income figures.

use rust_decimal::Decimal;
use tracing::debug;

use super::currency::{MONTHS_PER_YEAR, average_of_present, currency_label};
use crate::models::{
    AnnualIncomeHistory, AuditStep, CommonInputs, EligibilityResult, EmploymentStatus,
    IntermittentInputs, SeasonalInputs, TempAgencyInputs,
};

/// Minimum months of activity over the last 24 for a temp-agency worker.
pub const TEMP_AGENCY_MIN_ACTIVITY_MONTHS: u32 = 18;

/// Minimum years of documented activity for an intermittent worker.
pub const INTERMITTENT_MIN_ACTIVITY_YEARS: u32 = 3;

/// Minimum seasons over the last three years for a seasonal worker.
pub const SEASONAL_MIN_SEASONS: u32 = 2;

/// The activity-history requirement of one status.
struct HistoryRequirement {
    metric: &'static str,
    actual: u32,
    required: u32,
    unmet_warning: String,
}

impl HistoryRequirement {
    fn is_met(&self) -> bool {
        self.actual >= self.required
    }
}

/// Evaluates a temporary agency worker (at least 18 months of activity out of 24).
///
/// # Examples
///
/// ```
/// use revenue_engine::calculation::evaluate_temp_agency;
/// use revenue_engine::models::{AnnualIncomeHistory, CommonInputs, TempAgencyInputs};
/// use rust_decimal::Decimal;
///
/// let inputs = TempAgencyInputs {
///     annual_incomes: AnnualIncomeHistory::new(Some(Decimal::from(24000)), None, None),
///     months_of_activity: 12,
/// };
/// let result = evaluate_temp_agency(&CommonInputs::new(Decimal::ZERO, Decimal::ZERO), &inputs);
/// assert!(!result.eligible);
/// ```
pub fn evaluate_temp_agency(common: &CommonInputs, inputs: &TempAgencyInputs) -> EligibilityResult {
    let requirement = HistoryRequirement {
        metric: "months_of_activity",
        actual: inputs.months_of_activity,
        required: TEMP_AGENCY_MIN_ACTIVITY_MONTHS,
        unmet_warning: format!(
            "Temp-Agency: at least {} months of activity over the last 24 are required ({} declared).",
            TEMP_AGENCY_MIN_ACTIVITY_MONTHS, inputs.months_of_activity
        ),
    };
    evaluate_multi_year(
        EmploymentStatus::TempAgency,
        common,
        &inputs.annual_incomes,
        requirement,
    )
}

/// Evaluates an intermittent worker (at least 3 years of documented activity).
pub fn evaluate_intermittent(
    common: &CommonInputs,
    inputs: &IntermittentInputs,
) -> EligibilityResult {
    let requirement = HistoryRequirement {
        metric: "years_of_activity",
        actual: inputs.years_of_activity,
        required: INTERMITTENT_MIN_ACTIVITY_YEARS,
        unmet_warning: format!(
            "Intermittent: at least {} years of documented activity are required ({} declared).",
            INTERMITTENT_MIN_ACTIVITY_YEARS, inputs.years_of_activity
        ),
    };
    let result = evaluate_multi_year(
        EmploymentStatus::Intermittent,
        common,
        &inputs.annual_incomes,
        requirement,
    );
    if result.eligible {
        result.with_warning("Verify the regularity of activity over the last three years.")
    } else {
        result
    }
}

/// Evaluates a seasonal worker (at least 2 seasons over the last 3 years).
pub fn evaluate_seasonal(common: &CommonInputs, inputs: &SeasonalInputs) -> EligibilityResult {
    let requirement = HistoryRequirement {
        metric: "seasons_completed",
        actual: inputs.seasons_completed,
        required: SEASONAL_MIN_SEASONS,
        unmet_warning: format!(
            "Seasonal: at least {} seasons over the last 3 years are required ({} declared).",
            SEASONAL_MIN_SEASONS, inputs.seasons_completed
        ),
    };
    evaluate_multi_year(
        EmploymentStatus::Seasonal,
        common,
        &inputs.annual_incomes,
        requirement,
    )
}

fn evaluate_multi_year(
    status: EmploymentStatus,
    common: &CommonInputs,
    incomes: &AnnualIncomeHistory,
    requirement: HistoryRequirement,
) -> EligibilityResult {
    let name = status.display_name();
    let supplied: Vec<Decimal> = incomes
        .values()
        .iter()
        .flatten()
        .copied()
        .filter(|value| *value > Decimal::ZERO)
        .collect();

    let declared: Vec<Option<String>> = incomes
        .values()
        .iter()
        .map(|value| value.map(|d| d.to_string()))
        .collect();
    let mut input = serde_json::json!({
        "annual_incomes": declared,
        "required": requirement.required
    });
    input[requirement.metric] = serde_json::json!(requirement.actual);

    // Missing figures take precedence over the history check.
    if supplied.is_empty() {
        debug!(status = %status, "no annual income supplied");
        return EligibilityResult::ineligible(
            status,
            common,
            format!("{}: no annual net taxable income supplied.", name),
            vec!["Supply at least one annual net taxable income figure.".to_string()],
        )
        .with_audit_step(AuditStep::new(
            "multi_year_average",
            "Multi-Year Average Income",
            input,
            serde_json::json!({ "eligible": false, "reason": "income_missing" }),
            format!("{}: no positive annual figure among N, N-1, N-2", name),
        ));
    }

    if !requirement.is_met() {
        debug!(
            status = %status,
            actual = requirement.actual,
            required = requirement.required,
            "activity history requirement not met"
        );
        let reasoning = format!(
            "{} {} < {} required, income not averaged",
            requirement.metric, requirement.actual, requirement.required
        );
        return EligibilityResult::ineligible(
            status,
            common,
            format!(
                "{}: activity history requirement not met, income not retained.",
                name
            ),
            vec![requirement.unmet_warning],
        )
        .with_audit_step(AuditStep::new(
            "multi_year_average",
            "Multi-Year Average Income",
            input,
            serde_json::json!({ "eligible": false, "reason": "history_requirement_unmet" }),
            reasoning,
        ));
    }

    let annual_average = average_of_present(supplied.iter().copied().map(Some));
    let result = EligibilityResult::eligible(
        status,
        annual_average / MONTHS_PER_YEAR,
        common,
        format!(
            "{}: mean of {} supplied annual net taxable income figure(s) / 12.",
            name,
            supplied.len()
        ),
    );

    debug!(
        status = %status,
        years = supplied.len(),
        revenue = %result.monthly_eligible_revenue,
        "multi-year average retained"
    );
    let reasoning = format!(
        "mean of {} year(s) = {}, / 12 = {}",
        supplied.len(),
        currency_label(annual_average),
        currency_label(result.monthly_eligible_revenue)
    );
    let output = serde_json::json!({
        "eligible": result.eligible,
        "years_used": supplied.len(),
        "monthly_eligible_revenue": result.monthly_eligible_revenue.to_string()
    });
    result.with_audit_step(AuditStep::new(
        "multi_year_average",
        "Multi-Year Average Income",
        input,
        output,
        reasoning,
    ))
}
