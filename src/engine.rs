//! Rule dispatch for the eligible revenue engine.
//!
//! [`evaluate`] checks the input contract, then hands the inputs to the rule
//! of the selected status. The match over [`StatusInputs`] is exhaustive, so
//! adding a status without a rule fails to compile.

use std::time::Instant;

use tracing::{info, warn};

use crate::calculation::{
    evaluate_apprentice, evaluate_childminder_assistant, evaluate_elected_official,
    evaluate_fixed_term, evaluate_foster_family, evaluate_intermittent, evaluate_military,
    evaluate_multi_employer, evaluate_permanent, evaluate_public_internship, evaluate_seasonal,
    evaluate_temp_agency, evaluate_volunteer_firefighter, validate_inputs,
};
use crate::error::EngineResult;
use crate::models::{CommonInputs, EligibilityResult, EmploymentStatus, StatusInputs};

/// The engine version reported alongside every evaluation.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Evaluates the eligible monthly revenue of one borrower.
///
/// Business ineligibility comes back as `Ok` with `eligible = false`; only a
/// broken input contract (mismatched variant, negative or oversized amount,
/// out-of-range list) is an `Err`.
///
/// # Examples
///
/// ```
/// use revenue_engine::engine::evaluate;
/// use revenue_engine::models::{
///     CommonInputs, EmployerIncome, EmploymentStatus, MultiEmployerInputs, StatusInputs,
/// };
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let common = CommonInputs::new(Decimal::ZERO, Decimal::ZERO);
/// let inputs = StatusInputs::MultiEmployer(MultiEmployerInputs {
///     employers: vec![
///         EmployerIncome { annual_taxable_income: Decimal::from(18000), fixed_term: false },
///         EmployerIncome { annual_taxable_income: Decimal::from(12000), fixed_term: false },
///     ],
/// });
///
/// let result = evaluate(EmploymentStatus::MultiEmployer, &common, &inputs).unwrap();
/// assert_eq!(result.monthly_eligible_revenue, Decimal::from_str("2500.00").unwrap());
/// ```
pub fn evaluate(
    status: EmploymentStatus,
    common: &CommonInputs,
    inputs: &StatusInputs,
) -> EngineResult<EligibilityResult> {
    if let Err(error) = validate_inputs(status, common, inputs) {
        warn!(status = %status, error = %error, "input contract violated");
        return Err(error);
    }

    let started = Instant::now();
    let result = match inputs {
        StatusInputs::Cdi(cdi) => evaluate_permanent(common, cdi),
        StatusInputs::Cdd(fixed_term) => {
            evaluate_fixed_term(EmploymentStatus::Cdd, common, fixed_term)
        }
        StatusInputs::Cdic(fixed_term) => {
            evaluate_fixed_term(EmploymentStatus::Cdic, common, fixed_term)
        }
        StatusInputs::TempAgency(temp) => evaluate_temp_agency(common, temp),
        StatusInputs::Intermittent(intermittent) => evaluate_intermittent(common, intermittent),
        StatusInputs::Seasonal(seasonal) => evaluate_seasonal(common, seasonal),
        StatusInputs::Military(military) => evaluate_military(common, military),
        StatusInputs::PublicInternship(internship) => {
            evaluate_public_internship(common, internship)
        }
        StatusInputs::ChildminderAssistant(childminder) => {
            evaluate_childminder_assistant(common, childminder)
        }
        StatusInputs::Apprentice(apprentice) => evaluate_apprentice(common, apprentice),
        StatusInputs::VolunteerFirefighter(firefighter) => {
            evaluate_volunteer_firefighter(common, firefighter)
        }
        StatusInputs::ElectedOfficial(elected) => evaluate_elected_official(common, elected),
        StatusInputs::MultiEmployer(multi) => evaluate_multi_employer(common, multi),
        StatusInputs::FosterFamily(foster) => evaluate_foster_family(common, foster),
    };

    info!(
        status = %status,
        eligible = result.eligible,
        revenue = %result.monthly_eligible_revenue,
        warnings = result.warnings.len(),
        duration_us = started.elapsed().as_micros() as u64,
        "evaluation complete"
    );
    Ok(result)
}
