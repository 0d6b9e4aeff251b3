use axum::response::Redirect;
use serde::Deserialize;

use crate::server::middleware::journey::JourneyId;

pub const CHECK_ANSWERS_STEP: &str = "check-answers";

/// Query string accepted by every journey step POST.
///
/// `preserveHistory=true` marks a "change" link followed from the check
/// answers page: the step returns there instead of moving on.
#[derive(Deserialize, Debug, Default, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct StepQuery {
    #[serde(default)]
    pub preserve_history: bool,
}

/// Builds journey step redirects for one wizard.
pub struct StepRedirect<'a> {
    base: &'static str,
    journey_id: &'a JourneyId,
    query: StepQuery,
}

impl<'a> StepRedirect<'a> {
    /// # Arguments
    /// - `base` - Wizard root, e.g. `/appointments/create`
    /// - `journey_id` - Journey being advanced
    /// - `query` - Step query of the current request
    pub fn new(base: &'static str, journey_id: &'a JourneyId, query: StepQuery) -> Self {
        Self {
            base,
            journey_id,
            query,
        }
    }

    pub fn path(&self, step: &str) -> String {
        format!("{}/{}/{}", self.base, self.journey_id.as_str(), step)
    }

    /// Redirect to `step`, or back to check answers when history is preserved.
    pub fn next(&self, step: &str) -> Redirect {
        if self.query.preserve_history {
            return Redirect::to(&self.path(CHECK_ANSWERS_STEP));
        }
        Redirect::to(&self.path(step))
    }

    /// Redirect to `step` regardless of history, keeping `preserveHistory` so
    /// the following step can still return to check answers.
    pub fn detour(&self, step: &str) -> Redirect {
        if self.query.preserve_history {
            return Redirect::to(&format!("{}?preserveHistory=true", self.path(step)));
        }
        Redirect::to(&self.path(step))
    }
}
