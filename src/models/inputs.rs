//! Input records consumed by the income rules.
//!
//! [`CommonInputs`] is supplied for every status; [`StatusInputs`] carries the
//! fields specific to one status and is tagged with that status on the wire.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmploymentStatus;

/// Monthly figures supplied for every status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonInputs {
    /// Fixed monthly salary.
    pub fixed_monthly_salary: Decimal,
    /// Other stable monthly income (pensions, rents, allowances...).
    #[serde(default)]
    pub other_stable_monthly_income: Decimal,
}

impl CommonInputs {
    /// Creates common inputs from the two monthly figures.
    pub fn new(fixed_monthly_salary: Decimal, other_stable_monthly_income: Decimal) -> Self {
        Self {
            fixed_monthly_salary,
            other_stable_monthly_income,
        }
    }
}

/// Up to three annual net taxable income figures, most recent first.
///
/// A year left unfilled is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualIncomeHistory {
    /// Year N.
    #[serde(default)]
    pub year_n: Option<Decimal>,
    /// Year N-1.
    #[serde(default)]
    pub year_n_minus_1: Option<Decimal>,
    /// Year N-2.
    #[serde(default)]
    pub year_n_minus_2: Option<Decimal>,
}

impl AnnualIncomeHistory {
    /// Builds a history from the three yearly figures.
    pub fn new(
        year_n: Option<Decimal>,
        year_n_minus_1: Option<Decimal>,
        year_n_minus_2: Option<Decimal>,
    ) -> Self {
        Self {
            year_n,
            year_n_minus_1,
            year_n_minus_2,
        }
    }

    /// The three figures in order N, N-1, N-2.
    pub fn values(&self) -> [Option<Decimal>; 3] {
        [self.year_n, self.year_n_minus_1, self.year_n_minus_2]
    }

    /// Sum of the supplied figures, treating a missing year as zero.
    pub fn total(&self) -> Decimal {
        self.values().iter().flatten().copied().sum()
    }
}

/// Inputs for the permanent-contract (CDI) rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermanentInputs {
    /// Months elapsed since the start of the contract.
    pub tenure_months: u32,
    /// Whether the probation period is over.
    #[serde(default)]
    pub probation_completed: bool,
    /// Whether the borrower has executive (cadre) status.
    #[serde(default)]
    pub executive: bool,
    /// Gross annual salary written in the contract.
    #[serde(default)]
    pub contractual_annual_gross_salary: Decimal,
    /// Contractually guaranteed annual bonus.
    #[serde(default)]
    pub contractual_annual_bonus: Decimal,
    /// Non-contractual bonuses of the last years (N-1, N-2, N-3), at most three.
    #[serde(default)]
    pub non_contractual_bonuses: Vec<Decimal>,
    /// Cumulative net taxable income from the last December payslip.
    #[serde(default)]
    pub cumulative_taxable_income: Decimal,
    /// Net taxable income from the last tax return.
    #[serde(default)]
    pub tax_return_taxable_income: Decimal,
    /// Present when the borrower's situation changed recently.
    #[serde(default)]
    pub situation_change: Option<SituationChange>,
}

/// A recent change of situation documented by the latest payslips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SituationChange {
    /// Net pay of the most recent payslips (M-1, M-2, M-3), at most three.
    #[serde(default)]
    pub recent_net_payslips: Vec<Decimal>,
}

/// Inputs shared by the fixed-term family (CDD, CDIC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedTermInputs {
    /// Net taxable income over 12 months, excluding unemployment-insurance benefit.
    pub annual_taxable_income: Decimal,
    /// Annual one-off bonuses and overtime to deduct.
    #[serde(default)]
    pub annual_deductions: Decimal,
    /// Months left before the contract ends.
    pub remaining_contract_months: u32,
}

/// Inputs for the temporary agency worker rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempAgencyInputs {
    /// Annual net taxable incomes, unemployment benefit included.
    #[serde(default)]
    pub annual_incomes: AnnualIncomeHistory,
    /// Months of activity over the last 24 months.
    pub months_of_activity: u32,
}

/// Inputs for the intermittent worker rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntermittentInputs {
    /// Annual net taxable incomes, unemployment benefit included.
    #[serde(default)]
    pub annual_incomes: AnnualIncomeHistory,
    /// Years of documented activity.
    pub years_of_activity: u32,
}

/// Inputs for the seasonal worker rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalInputs {
    /// Annual net taxable incomes, unemployment benefit included.
    #[serde(default)]
    pub annual_incomes: AnnualIncomeHistory,
    /// Seasons completed over the last three years.
    pub seasons_completed: u32,
}

/// Inputs for the military rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilitaryInputs {
    /// Annual taxable incomes of the last three years.
    #[serde(default)]
    pub annual_incomes: AnnualIncomeHistory,
}

/// Inputs for the civil-service trainee rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicInternshipInputs {
    /// Annual net taxable income.
    pub annual_taxable_income: Decimal,
}

/// Inputs for the childminder rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildminderAssistantInputs {
    /// Annual cumulative income received through the childcare benefit scheme.
    pub annual_benefit_income: Decimal,
}

/// Inputs for the apprentice rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprenticeInputs {
    /// Annual net taxable income.
    pub annual_taxable_income: Decimal,
    /// Months left before the apprenticeship contract ends.
    pub remaining_contract_months: u32,
}

/// Inputs for the volunteer firefighter rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerFirefighterInputs {
    /// Taxable income of year N.
    #[serde(default)]
    pub taxable_income_year_n: Decimal,
    /// Taxable income of year N-1.
    #[serde(default)]
    pub taxable_income_year_n_minus_1: Decimal,
}

/// Inputs for the elected official rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectedOfficialInputs {
    /// Annual income from the mandate.
    #[serde(default)]
    pub annual_mandate_income: Decimal,
    /// Other annual income.
    #[serde(default)]
    pub other_annual_income: Decimal,
}

/// One employer of a multi-employer borrower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerIncome {
    /// Annual net taxable income paid by this employer.
    pub annual_taxable_income: Decimal,
    /// Whether the contract with this employer is fixed-term.
    #[serde(default)]
    pub fixed_term: bool,
}

/// Inputs for the multi-employer rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiEmployerInputs {
    /// One entry per employer, at least one.
    pub employers: Vec<EmployerIncome>,
}

/// Inputs for the foster family rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FosterFamilyInputs {
    /// Annual income excluding resident-support supplements.
    pub annual_income_excluding_supplements: Decimal,
}

/// Status-specific inputs, one variant per [`EmploymentStatus`].
///
/// # Example
///
/// ```
/// use revenue_engine::models::{EmploymentStatus, StatusInputs};
///
/// let json = r#"{
///     "status": "apprentice",
///     "annual_taxable_income": "14400",
///     "remaining_contract_months": 12
/// }"#;
/// let inputs: StatusInputs = serde_json::from_str(json).unwrap();
/// assert_eq!(inputs.status(), EmploymentStatus::Apprentice);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatusInputs {
    /// Permanent contract.
    Cdi(PermanentInputs),
    /// Fixed-term contract.
    Cdd(FixedTermInputs),
    /// Project-bound permanent contract.
    Cdic(FixedTermInputs),
    /// Temporary agency worker.
    TempAgency(TempAgencyInputs),
    /// Intermittent worker.
    Intermittent(IntermittentInputs),
    /// Seasonal worker.
    Seasonal(SeasonalInputs),
    /// Armed forces.
    Military(MilitaryInputs),
    /// Civil-service trainee.
    PublicInternship(PublicInternshipInputs),
    /// Childminder.
    ChildminderAssistant(ChildminderAssistantInputs),
    /// Apprentice.
    Apprentice(ApprenticeInputs),
    /// Volunteer firefighter.
    VolunteerFirefighter(VolunteerFirefighterInputs),
    /// Elected official.
    ElectedOfficial(ElectedOfficialInputs),
    /// Several employers.
    MultiEmployer(MultiEmployerInputs),
    /// Foster family.
    FosterFamily(FosterFamilyInputs),
}

impl StatusInputs {
    /// The status this variant belongs to.
    pub fn status(&self) -> EmploymentStatus {
        match self {
            StatusInputs::Cdi(_) => EmploymentStatus::Cdi,
            StatusInputs::Cdd(_) => EmploymentStatus::Cdd,
            StatusInputs::Cdic(_) => EmploymentStatus::Cdic,
            StatusInputs::TempAgency(_) => EmploymentStatus::TempAgency,
            StatusInputs::Intermittent(_) => EmploymentStatus::Intermittent,
            StatusInputs::Seasonal(_) => EmploymentStatus::Seasonal,
            StatusInputs::Military(_) => EmploymentStatus::Military,
            StatusInputs::PublicInternship(_) => EmploymentStatus::PublicInternship,
            StatusInputs::ChildminderAssistant(_) => EmploymentStatus::ChildminderAssistant,
            StatusInputs::Apprentice(_) => EmploymentStatus::Apprentice,
            StatusInputs::VolunteerFirefighter(_) => EmploymentStatus::VolunteerFirefighter,
            StatusInputs::ElectedOfficial(_) => EmploymentStatus::ElectedOfficial,
            StatusInputs::MultiEmployer(_) => EmploymentStatus::MultiEmployer,
            StatusInputs::FosterFamily(_) => EmploymentStatus::FosterFamily,
        }
    }
}
