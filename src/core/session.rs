use super::engine::{clamp_age, derive_target_ages, project_to_age, projection_for_timeframe};
use super::format::format_phone;
use super::types::{
    InputField, LeadDetails, MAX_WEEKLY_AMOUNT, MIN_WEEKLY_AMOUNT, Projection, RETIREMENT_AGE,
    RejectReason, Rejection, Scenario, TargetAges, Timeframe,
};
use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormStep {
    FirstName,
    LastName,
    Phone,
}

impl FormStep {
    pub fn number(self) -> u8 {
        match self {
            FormStep::FirstName => 1,
            FormStep::LastName => 2,
            FormStep::Phone => 3,
        }
    }

    fn field(self) -> InputField {
        match self {
            FormStep::FirstName => InputField::FirstName,
            FormStep::LastName => InputField::LastName,
            FormStep::Phone => InputField::Phone,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    Setup,
    Results,
    LeadForm(FormStep),
    Comparison,
}

/// Partially captured lead fields. Values persist across back-navigation and
/// rejected submissions; only a completed step 3 promotes them into
/// `Session::captured`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LeadDraft {
    pub first_name: String,
    pub last_name: String,
}

/// What a renderer needs to know, derived from the session rather than stored
/// in it. Keeps the transitions free of any visibility bookkeeping.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub setup_visible: bool,
    pub results_visible: bool,
    pub lead_form_visible: bool,
    pub comparison_visible: bool,
    pub form_step: Option<u8>,
    pub rejection: Option<Rejection>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonView {
    pub first_name: String,
    pub goal_value: i64,
    pub return_rate_pct: u32,
}

/// One page visit's worth of state. Created empty, mutated by the transition
/// methods below, and discarded when the visit ends. Nothing here persists.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub page: Page,
    pub age: u32,
    pub weekly_amount: u32,
    pub scenario: Scenario,
    pub selected_timeframe: Timeframe,
    pub target_ages: TargetAges,
    pub lead_draft: LeadDraft,
    pub captured: Option<LeadDetails>,
    pub rejection: Option<Rejection>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            page: Page::Setup,
            age: 25,
            weekly_amount: 25,
            scenario: Scenario::Normal,
            selected_timeframe: Timeframe::Long,
            target_ages: derive_target_ages(25),
            lead_draft: LeadDraft::default(),
            captured: None,
            rejection: None,
        }
    }

    /// Setup -> Results on a valid submit. Age and amount arrive as raw field
    /// text; malformed input rejects with a field-specific reason, well-formed
    /// but out-of-range input is clamped.
    pub fn submit_setup(&mut self, age_raw: &str, amount_raw: &str) -> Result<(), Rejection> {
        let age = self.validated(parse_age(age_raw))?;
        let amount = self.validated(parse_amount(amount_raw))?;

        self.age = clamp_age(age);
        self.weekly_amount = clamp_amount(amount);
        self.target_ages = derive_target_ages(self.age);
        self.selected_timeframe = Timeframe::Long;
        self.rejection = None;
        self.page = Page::Results;
        Ok(())
    }

    pub fn back_to_setup(&mut self) {
        if self.page == Page::Results {
            self.page = Page::Setup;
        }
    }

    pub fn open_lead_form(&mut self) {
        if self.page == Page::Results {
            self.page = Page::LeadForm(FormStep::FirstName);
        }
    }

    /// LeadForm -> Results, resetting to step 1. Draft values are kept so a
    /// returning user does not retype them.
    pub fn cancel_lead_form(&mut self) {
        if matches!(self.page, Page::LeadForm(_)) {
            self.page = Page::Results;
            self.rejection = None;
        }
    }

    /// Advance the lead form by one validated field. An empty value is a
    /// self-loop on the current step; completing step 3 captures the lead and
    /// moves to the comparison screen.
    pub fn submit_lead_field(&mut self, value: &str) -> Result<(), Rejection> {
        let Page::LeadForm(step) = self.page else {
            return Ok(());
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            let rejection = Rejection::new(step.field(), RejectReason::Empty);
            self.rejection = Some(rejection);
            return Err(rejection);
        }

        self.rejection = None;
        match step {
            FormStep::FirstName => {
                self.lead_draft.first_name = trimmed.to_string();
                self.page = Page::LeadForm(FormStep::LastName);
            }
            FormStep::LastName => {
                self.lead_draft.last_name = trimmed.to_string();
                self.page = Page::LeadForm(FormStep::Phone);
            }
            FormStep::Phone => {
                self.captured = Some(LeadDetails {
                    first_name: self.lead_draft.first_name.clone(),
                    last_name: self.lead_draft.last_name.clone(),
                    phone: format_phone(trimmed),
                });
                self.page = Page::Comparison;
            }
        }
        Ok(())
    }

    pub fn set_scenario(&mut self, scenario: Scenario) {
        self.scenario = scenario;
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        self.selected_timeframe = timeframe;
    }

    /// Slider input; out-of-range values clamp rather than reject.
    pub fn set_amount(&mut self, amount: u32) {
        self.weekly_amount = clamp_amount(amount);
    }

    pub fn clear_rejection(&mut self) {
        self.rejection = None;
    }

    /// Projection for the currently selected timeframe and scenario.
    pub fn projection(&self) -> Projection {
        projection_for_timeframe(
            self.age,
            &self.target_ages,
            self.selected_timeframe,
            self.weekly_amount,
            self.scenario,
        )
    }

    /// The personalized comparison summary, always evaluated at retirement age
    /// regardless of the timeframe selected on the results screen. `None`
    /// until a lead has been captured.
    pub fn comparison(&self) -> Option<ComparisonView> {
        let captured = self.captured.as_ref()?;
        let projection = project_to_age(self.age, RETIREMENT_AGE, self.weekly_amount, self.scenario);
        Some(ComparisonView {
            first_name: captured.first_name.clone(),
            goal_value: projection.final_value,
            return_rate_pct: self.scenario.annual_rate_pct(),
        })
    }

    pub fn view(&self) -> ViewModel {
        ViewModel {
            setup_visible: self.page == Page::Setup,
            results_visible: self.page == Page::Results,
            lead_form_visible: matches!(self.page, Page::LeadForm(_)),
            comparison_visible: self.page == Page::Comparison,
            form_step: match self.page {
                Page::LeadForm(step) => Some(step.number()),
                _ => None,
            },
            rejection: self.rejection,
        }
    }

    fn validated<T>(&mut self, parsed: Result<T, Rejection>) -> Result<T, Rejection> {
        match parsed {
            Ok(value) => Ok(value),
            Err(rejection) => {
                self.rejection = Some(rejection);
                Err(rejection)
            }
        }
    }
}

pub fn parse_age(raw: &str) -> Result<u32, Rejection> {
    parse_field(raw, InputField::Age, 0)
}

/// Amounts below the minimum reject with a dedicated reason so the form can
/// show the "at least $10" hint; amounts above the maximum are clamped later.
pub fn parse_amount(raw: &str) -> Result<u32, Rejection> {
    parse_field(raw, InputField::Amount, MIN_WEEKLY_AMOUNT)
}

fn parse_field(raw: &str, field: InputField, minimum: u32) -> Result<u32, Rejection> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Rejection::new(field, RejectReason::Empty));
    }
    let value = trimmed
        .parse::<u32>()
        .map_err(|_| Rejection::new(field, RejectReason::NotANumber))?;
    if value < minimum {
        return Err(Rejection::new(field, RejectReason::BelowMinimum));
    }
    Ok(value)
}

fn clamp_amount(amount: u32) -> u32 {
    amount.clamp(MIN_WEEKLY_AMOUNT, MAX_WEEKLY_AMOUNT)
}
