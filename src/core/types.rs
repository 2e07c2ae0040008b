use serde::Serialize;

pub const MIN_AGE: u32 = 16;
pub const MAX_AGE: u32 = 64;
pub const RETIREMENT_AGE: u32 = 65;
pub const MIN_WEEKLY_AMOUNT: u32 = 10;
pub const MAX_WEEKLY_AMOUNT: u32 = 2000;
pub const AMOUNT_STEP: u32 = 5;
pub const WEEKS_PER_YEAR: u32 = 52;

/// Duration of the count-up tween on the main projected value.
pub const VALUE_TWEEN_MS: u64 = 400;
/// Duration of the social-proof counter on the comparison screen.
pub const SOCIAL_COUNT_TWEEN_MS: u64 = 2500;
pub const SOCIAL_COUNT_TARGET: f64 = 47_000.0;
/// How long a rejected field stays flagged before the flag auto-clears.
pub const REJECTION_FLAG_MS: u64 = 500;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Low,
    Normal,
    High,
}

impl Scenario {
    pub fn annual_rate(self) -> f64 {
        match self {
            Scenario::Low => 0.10,
            Scenario::Normal => 0.12,
            Scenario::High => 0.14,
        }
    }

    pub fn annual_rate_pct(self) -> u32 {
        (self.annual_rate() * 100.0).round() as u32
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Short,
    Medium,
    Long,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAges {
    pub short: u32,
    pub medium: u32,
    pub long: u32,
}

impl TargetAges {
    pub fn for_timeframe(&self, timeframe: Timeframe) -> u32 {
        match timeframe {
            Timeframe::Short => self.short,
            Timeframe::Medium => self.medium,
            Timeframe::Long => self.long,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub target_age: u32,
    pub years: u32,
    pub final_value: i64,
    pub total_contributed: i64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDetails {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    Age,
    Amount,
    FirstName,
    LastName,
    Phone,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectReason {
    Empty,
    NotANumber,
    BelowMinimum,
}

/// A validation failure on a single input field. Never fatal: the caller flags
/// the field, returns focus to it, and clears the flag after a fixed interval.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    pub field: InputField,
    pub reason: RejectReason,
}

impl Rejection {
    pub fn new(field: InputField, reason: RejectReason) -> Self {
        Self { field, reason }
    }
}
