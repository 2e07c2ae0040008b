mod anim;
mod engine;
mod format;
mod session;
mod types;

pub use anim::{Delay, Easing, Tween, ValueDisplay};
pub use engine::{
    clamp_age, derive_target_ages, project, project_to_age, projection_for_timeframe, weekly_rate,
};
pub use format::{format_currency, format_number, format_phone};
pub use session::{
    ComparisonView, FormStep, LeadDraft, Page, Session, ViewModel, parse_age, parse_amount,
};
pub use types::{
    AMOUNT_STEP, InputField, LeadDetails, MAX_AGE, MAX_WEEKLY_AMOUNT, MIN_AGE, MIN_WEEKLY_AMOUNT,
    Projection, REJECTION_FLAG_MS, RETIREMENT_AGE, RejectReason, Rejection, SOCIAL_COUNT_TARGET,
    SOCIAL_COUNT_TWEEN_MS, Scenario, TargetAges, Timeframe, VALUE_TWEEN_MS, WEEKS_PER_YEAR,
};
