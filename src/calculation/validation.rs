//! Input contract checks run before any income rule.
//!
//! A failed check is a caller error, not an ineligibility: the engine
//! returns [`EngineError::InvalidInput`] naming the offending field path.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AnnualIncomeHistory, CommonInputs, EmploymentStatus, StatusInputs};

/// Most years of non-contractual bonus a CDI file may list.
pub const MAX_BONUS_YEARS: usize = 3;

/// Most recent payslips a CDI situation change may list.
pub const MAX_PAYSLIPS: usize = 3;

/// Longest temp-agency activity window looked at, in months.
pub const MAX_TEMP_AGENCY_ACTIVITY_MONTHS: u32 = 24;

/// Largest amount accepted in any currency field (one billion euros).
///
/// Sums and products of accepted amounts stay inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Validates `common` and `inputs` against the selected `status`.
///
/// # Examples
///
/// ```
/// use revenue_engine::calculation::validate_inputs;
/// use revenue_engine::error::EngineError;
/// use revenue_engine::models::{
///     CommonInputs, EmploymentStatus, PublicInternshipInputs, StatusInputs,
/// };
/// use rust_decimal::Decimal;
///
/// let common = CommonInputs::new(Decimal::from(1800), Decimal::ZERO);
/// let inputs = StatusInputs::PublicInternship(PublicInternshipInputs {
///     annual_taxable_income: Decimal::from(21000),
/// });
///
/// assert!(validate_inputs(EmploymentStatus::PublicInternship, &common, &inputs).is_ok());
///
/// let mismatch = validate_inputs(EmploymentStatus::Military, &common, &inputs);
/// assert!(matches!(mismatch, Err(EngineError::InvalidInput { .. })));
/// ```
pub fn validate_inputs(
    status: EmploymentStatus,
    common: &CommonInputs,
    inputs: &StatusInputs,
) -> EngineResult<()> {
    if inputs.status() != status {
        return Err(EngineError::invalid_input(
            "inputs.status",
            format!(
                "inputs are for '{}' but status '{}' was selected",
                inputs.status(),
                status
            ),
        ));
    }

    amount("common.fixed_monthly_salary", common.fixed_monthly_salary)?;
    amount(
        "common.other_stable_monthly_income",
        common.other_stable_monthly_income,
    )?;

    match inputs {
        StatusInputs::Cdi(cdi) => {
            amount(
                "inputs.contractual_annual_gross_salary",
                cdi.contractual_annual_gross_salary,
            )?;
            amount("inputs.contractual_annual_bonus", cdi.contractual_annual_bonus)?;
            bounded_list(
                "inputs.non_contractual_bonuses",
                cdi.non_contractual_bonuses.len(),
                MAX_BONUS_YEARS,
            )?;
            for (index, bonus) in cdi.non_contractual_bonuses.iter().enumerate() {
                amount(&format!("inputs.non_contractual_bonuses[{}]", index), *bonus)?;
            }
            amount(
                "inputs.cumulative_taxable_income",
                cdi.cumulative_taxable_income,
            )?;
            amount(
                "inputs.tax_return_taxable_income",
                cdi.tax_return_taxable_income,
            )?;
            if let Some(change) = &cdi.situation_change {
                bounded_list(
                    "inputs.situation_change.recent_net_payslips",
                    change.recent_net_payslips.len(),
                    MAX_PAYSLIPS,
                )?;
                for (index, payslip) in change.recent_net_payslips.iter().enumerate() {
                    amount(
                        &format!("inputs.situation_change.recent_net_payslips[{}]", index),
                        *payslip,
                    )?;
                }
            }
        }
        StatusInputs::Cdd(fixed_term) | StatusInputs::Cdic(fixed_term) => {
            amount("inputs.annual_taxable_income", fixed_term.annual_taxable_income)?;
            amount("inputs.annual_deductions", fixed_term.annual_deductions)?;
        }
        StatusInputs::TempAgency(temp) => {
            history("inputs.annual_incomes", &temp.annual_incomes)?;
            if temp.months_of_activity > MAX_TEMP_AGENCY_ACTIVITY_MONTHS {
                return Err(EngineError::invalid_input(
                    "inputs.months_of_activity",
                    format!(
                        "must be at most {} (got {})",
                        MAX_TEMP_AGENCY_ACTIVITY_MONTHS, temp.months_of_activity
                    ),
                ));
            }
        }
        StatusInputs::Intermittent(intermittent) => {
            history("inputs.annual_incomes", &intermittent.annual_incomes)?;
        }
        StatusInputs::Seasonal(seasonal) => {
            history("inputs.annual_incomes", &seasonal.annual_incomes)?;
        }
        StatusInputs::Military(military) => {
            history("inputs.annual_incomes", &military.annual_incomes)?;
        }
        StatusInputs::PublicInternship(internship) => {
            amount("inputs.annual_taxable_income", internship.annual_taxable_income)?;
        }
        StatusInputs::ChildminderAssistant(childminder) => {
            amount("inputs.annual_benefit_income", childminder.annual_benefit_income)?;
        }
        StatusInputs::Apprentice(apprentice) => {
            amount("inputs.annual_taxable_income", apprentice.annual_taxable_income)?;
        }
        StatusInputs::VolunteerFirefighter(firefighter) => {
            amount("inputs.taxable_income_year_n", firefighter.taxable_income_year_n)?;
            amount(
                "inputs.taxable_income_year_n_minus_1",
                firefighter.taxable_income_year_n_minus_1,
            )?;
        }
        StatusInputs::ElectedOfficial(elected) => {
            amount("inputs.annual_mandate_income", elected.annual_mandate_income)?;
            amount("inputs.other_annual_income", elected.other_annual_income)?;
        }
        StatusInputs::MultiEmployer(multi) => {
            if multi.employers.is_empty() {
                return Err(EngineError::invalid_input(
                    "inputs.employers",
                    "at least one employer is required",
                ));
            }
            for (index, employer) in multi.employers.iter().enumerate() {
                amount(
                    &format!("inputs.employers[{}].annual_taxable_income", index),
                    employer.annual_taxable_income,
                )?;
            }
        }
        StatusInputs::FosterFamily(foster) => {
            amount(
                "inputs.annual_income_excluding_supplements",
                foster.annual_income_excluding_supplements,
            )?;
        }
    }

    Ok(())
}

fn amount(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative (got {})", value),
        ));
    }
    if value > MAX_AMOUNT {
        return Err(EngineError::invalid_input(
            field,
            format!("must be at most {} (got {})", MAX_AMOUNT, value),
        ));
    }
    Ok(())
}

fn bounded_list(field: &str, len: usize, max: usize) -> EngineResult<()> {
    if len > max {
        return Err(EngineError::invalid_input(
            field,
            format!("at most {} entries allowed (got {})", max, len),
        ));
    }
    Ok(())
}

fn history(field: &str, incomes: &AnnualIncomeHistory) -> EngineResult<()> {
    let labels = ["year_n", "year_n_minus_1", "year_n_minus_2"];
    for (label, value) in labels.iter().zip(incomes.values()) {
        if let Some(value) = value {
            amount(&format!("{}.{}", field, label), value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        EmployerIncome, FixedTermInputs, MultiEmployerInputs, PermanentInputs, SituationChange,
        TempAgencyInputs,
    };
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn common() -> CommonInputs {
        CommonInputs::new(dec("2000"), dec("0"))
    }

    fn cdi() -> PermanentInputs {
        PermanentInputs {
            tenure_months: 24,
            probation_completed: true,
            executive: false,
            contractual_annual_gross_salary: dec("30000"),
            contractual_annual_bonus: Decimal::ZERO,
            non_contractual_bonuses: vec![],
            cumulative_taxable_income: Decimal::ZERO,
            tax_return_taxable_income: Decimal::ZERO,
            situation_change: None,
        }
    }

    fn field_of(result: EngineResult<()>) -> String {
        match result {
            Err(EngineError::InvalidInput { field, .. }) => field,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    /// VAL-001: status and inputs variant must agree
    #[test]
    fn test_status_mismatch_rejected() {
        let inputs = StatusInputs::Cdd(FixedTermInputs {
            annual_taxable_income: dec("24000"),
            annual_deductions: Decimal::ZERO,
            remaining_contract_months: 6,
        });

        assert_eq!(
            field_of(validate_inputs(EmploymentStatus::Cdic, &common(), &inputs)),
            "inputs.status"
        );
        assert!(validate_inputs(EmploymentStatus::Cdd, &common(), &inputs).is_ok());
    }

    /// VAL-002: negative common amounts rejected
    #[test]
    fn test_negative_common_rejected() {
        let common = CommonInputs::new(dec("2000"), dec("-1"));
        let inputs = StatusInputs::Cdi(cdi());

        assert_eq!(
            field_of(validate_inputs(EmploymentStatus::Cdi, &common, &inputs)),
            "common.other_stable_monthly_income"
        );
    }

    /// VAL-003: at most three bonus years
    #[test]
    fn test_too_many_bonus_years() {
        let mut inputs = cdi();
        inputs.non_contractual_bonuses = vec![dec("100"); 4];

        assert_eq!(
            field_of(validate_inputs(
                EmploymentStatus::Cdi,
                &common(),
                &StatusInputs::Cdi(inputs)
            )),
            "inputs.non_contractual_bonuses"
        );
    }

    /// VAL-004: at most three payslips, none negative
    #[test]
    fn test_payslip_bounds() {
        let mut inputs = cdi();
        inputs.situation_change = Some(SituationChange {
            recent_net_payslips: vec![dec("2000"), dec("-5")],
        });
        assert_eq!(
            field_of(validate_inputs(
                EmploymentStatus::Cdi,
                &common(),
                &StatusInputs::Cdi(inputs.clone())
            )),
            "inputs.situation_change.recent_net_payslips[1]"
        );

        inputs.situation_change = Some(SituationChange {
            recent_net_payslips: vec![dec("2000"); 4],
        });
        assert_eq!(
            field_of(validate_inputs(
                EmploymentStatus::Cdi,
                &common(),
                &StatusInputs::Cdi(inputs)
            )),
            "inputs.situation_change.recent_net_payslips"
        );
    }

    /// VAL-005: temp-agency activity capped at 24 months
    #[test]
    fn test_temp_agency_months_bound() {
        let inputs = |months| {
            StatusInputs::TempAgency(TempAgencyInputs {
                annual_incomes: AnnualIncomeHistory::new(Some(dec("20000")), None, None),
                months_of_activity: months,
            })
        };

        assert!(validate_inputs(EmploymentStatus::TempAgency, &common(), &inputs(24)).is_ok());
        assert_eq!(
            field_of(validate_inputs(EmploymentStatus::TempAgency, &common(), &inputs(25))),
            "inputs.months_of_activity"
        );
    }

    /// VAL-006: negative history figure names the year
    #[test]
    fn test_negative_history_year() {
        let inputs = StatusInputs::TempAgency(TempAgencyInputs {
            annual_incomes: AnnualIncomeHistory::new(Some(dec("20000")), Some(dec("-1")), None),
            months_of_activity: 20,
        });

        assert_eq!(
            field_of(validate_inputs(EmploymentStatus::TempAgency, &common(), &inputs)),
            "inputs.annual_incomes.year_n_minus_1"
        );
    }

    /// VAL-007: multi-employer needs one employer and indexes offenders
    #[test]
    fn test_multi_employer_rules() {
        let empty = StatusInputs::MultiEmployer(MultiEmployerInputs { employers: vec![] });
        assert_eq!(
            field_of(validate_inputs(EmploymentStatus::MultiEmployer, &common(), &empty)),
            "inputs.employers"
        );

        let negative = StatusInputs::MultiEmployer(MultiEmployerInputs {
            employers: vec![
                EmployerIncome {
                    annual_taxable_income: dec("12000"),
                    fixed_term: false,
                },
                EmployerIncome {
                    annual_taxable_income: dec("-3"),
                    fixed_term: true,
                },
            ],
        });
        assert_eq!(
            field_of(validate_inputs(EmploymentStatus::MultiEmployer, &common(), &negative)),
            "inputs.employers[1].annual_taxable_income"
        );
    }

    /// VAL-008: amounts above the ceiling are rejected before any sum is taken
    #[test]
    fn test_amount_ceiling() {
        let huge = StatusInputs::MultiEmployer(MultiEmployerInputs {
            employers: vec![
                EmployerIncome {
                    annual_taxable_income: Decimal::MAX,
                    fixed_term: false,
                },
                EmployerIncome {
                    annual_taxable_income: Decimal::MAX,
                    fixed_term: false,
                },
            ],
        });
        assert_eq!(
            field_of(validate_inputs(EmploymentStatus::MultiEmployer, &common(), &huge)),
            "inputs.employers[0].annual_taxable_income"
        );

        let floor_overflow = CommonInputs::new(Decimal::MAX, Decimal::MAX);
        let cdd = StatusInputs::Cdd(FixedTermInputs {
            annual_taxable_income: Decimal::ZERO,
            annual_deductions: Decimal::ZERO,
            remaining_contract_months: 6,
        });
        assert_eq!(
            field_of(validate_inputs(EmploymentStatus::Cdd, &floor_overflow, &cdd)),
            "common.fixed_monthly_salary"
        );

        let at_ceiling = CommonInputs::new(MAX_AMOUNT, MAX_AMOUNT);
        assert!(validate_inputs(EmploymentStatus::Cdd, &at_ceiling, &cdd).is_ok());
    }

    #[test]
    fn test_zero_amounts_are_valid() {
        let inputs = StatusInputs::Cdd(FixedTermInputs {
            annual_taxable_income: Decimal::ZERO,
            annual_deductions: Decimal::ZERO,
            remaining_contract_months: 0,
        });
        let common = CommonInputs::new(Decimal::ZERO, Decimal::ZERO);

        assert!(validate_inputs(EmploymentStatus::Cdd, &common, &inputs).is_ok());
    }
}
