//! Income rules for the eligible revenue engine.
//!
//! One module per family of rules: the CDI state machine, the fixed-term
//! rule shared by CDD and CDIC, the multi-year averages with their history
//! preconditions, and the single-formula statuses. Currency helpers and the
//! input contract checks are shared by all of them.

mod currency;
mod fixed_term;
mod multi_year;
mod permanent;
mod single_formula;
mod validation;

pub use currency::{MONTHS_PER_YEAR, average_of_present, currency_label, round_currency};
pub use fixed_term::{CONTRACT_ENDING_SOON_MONTHS, evaluate_fixed_term};
pub use multi_year::{
    INTERMITTENT_MIN_ACTIVITY_YEARS, SEASONAL_MIN_SEASONS, TEMP_AGENCY_MIN_ACTIVITY_MONTHS,
    evaluate_intermittent, evaluate_seasonal, evaluate_temp_agency,
};
pub use permanent::{
    EXECUTIVE_COEFFICIENT, FULL_BONUS_CREDIT_TENURE_MONTHS, NON_EXECUTIVE_COEFFICIENT,
    PermanentPath, STABLE_TENURE_MONTHS, evaluate_permanent, non_contractual_bonus_monthly,
    select_permanent_path,
};
pub use single_formula::{
    FIREFIGHTER_YEARS, MILITARY_YEARS, evaluate_apprentice, evaluate_childminder_assistant,
    evaluate_elected_official, evaluate_foster_family, evaluate_military, evaluate_multi_employer,
    evaluate_public_internship, evaluate_volunteer_firefighter,
};
pub use validation::{
    MAX_AMOUNT, MAX_BONUS_YEARS, MAX_PAYSLIPS, MAX_TEMP_AGENCY_ACTIVITY_MONTHS, validate_inputs,
};
