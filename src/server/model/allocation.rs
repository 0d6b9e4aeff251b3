//! Allocation journey state, step forms and date rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    model::activities::{ActivityPay, ActivitySchedule, AllocationCreateRequest},
    server::model::{
        form::{FormInput, FormParser, FormValues, ValidationErrors, YesNo},
        journey::{JourneyData, JourneySlot},
    },
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPrisoner {
    pub number: String,
    pub name: String,
    pub incentive_level: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationActivity {
    pub schedule_id: i64,
    pub activity_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Answers collected while allocating a prisoner to an activity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocateJourney {
    pub prisoner: AllocationPrisoner,
    pub activity: AllocationActivity,
    /// Pay rates offered at the prisoner's incentive level.
    pub pay_rates: Vec<ActivityPay>,
    pub pay: Option<ActivityPay>,
    pub start_date: Option<NaiveDate>,
    pub end_date_option: Option<YesNo>,
    pub end_date: Option<NaiveDate>,
}

impl JourneyData for AllocateJourney {
    const SLOT: JourneySlot = JourneySlot::Allocate;
}

impl AllocateJourney {
    /// Seeds a journey from the prisoner and the schedule being allocated to.
    ///
    /// Only pay rates for the prisoner's incentive level are offered. When the
    /// level is unknown every rate is offered.
    pub fn new(prisoner: AllocationPrisoner, schedule: ActivitySchedule) -> Self {
        let pay_rates = schedule
            .activity
            .pay
            .into_iter()
            .filter(|pay| match &prisoner.incentive_level {
                Some(level) => pay.incentive_level.eq_ignore_ascii_case(level),
                None => true,
            })
            .collect();

        Self {
            activity: AllocationActivity {
                schedule_id: schedule.id,
                activity_id: schedule.activity.id,
                name: schedule.activity.summary,
                start_date: schedule.start_date,
                end_date: schedule.end_date,
            },
            prisoner,
            pay_rates,
            pay: None,
            start_date: None,
            end_date_option: None,
            end_date: None,
        }
    }

    /// Looks up an offered pay rate by its pay band id.
    pub fn find_pay_rate(&self, pay_band_id: i64) -> Option<&ActivityPay> {
        self.pay_rates
            .iter()
            .find(|pay| pay.prison_pay_band.id == pay_band_id)
    }

    /// Checks a start date against today and the schedule's dates.
    ///
    /// # Arguments
    /// - `date` - Proposed first day of the allocation
    /// - `today` - Current date
    ///
    /// # Returns
    /// - `Ok(())` - Date is acceptable
    /// - `Err(ValidationErrors)` - One failure against `startDate`
    pub fn validate_start_date(&self, date: NaiveDate, today: NaiveDate) -> Result<(), ValidationErrors> {
        if date <= today {
            return Err(ValidationErrors::single("startDate", "Enter a date in the future"));
        }
        if date < self.activity.start_date {
            return Err(ValidationErrors::single(
                "startDate",
                "Enter a date on or after the activity's start date",
            ));
        }
        if let Some(end) = self.activity.end_date {
            if date > end {
                return Err(ValidationErrors::single(
                    "startDate",
                    "Enter a date on or before the activity's end date",
                ));
            }
        }
        Ok(())
    }

    /// Records the start date, dropping a chosen end date that now falls
    /// before it.
    ///
    /// # Returns
    /// - `true` - The end date was dropped and must be asked for again
    /// - `false` - Any chosen end date is still valid
    pub fn set_start_date(&mut self, date: NaiveDate) -> bool {
        self.start_date = Some(date);

        match self.end_date {
            Some(end) if end < date => {
                self.end_date = None;
                self.end_date_option == Some(YesNo::Yes)
            }
            _ => false,
        }
    }

    /// Checks an end date against the chosen start date and the schedule end.
    pub fn validate_end_date(&self, date: NaiveDate) -> Result<(), ValidationErrors> {
        if let Some(start) = self.start_date {
            if date < start {
                return Err(ValidationErrors::single(
                    "endDate",
                    "Enter a date on or after the allocation start date",
                ));
            }
        }
        if let Some(end) = self.activity.end_date {
            if date > end {
                return Err(ValidationErrors::single(
                    "endDate",
                    "Enter a date on or before the activity's end date",
                ));
            }
        }
        Ok(())
    }

    /// Builds the activities API request.
    ///
    /// # Returns
    /// - `Some(request)` - Pay band and start date have been chosen
    /// - `None` - The journey is incomplete or its end date precedes the start
    pub fn to_request(&self) -> Option<AllocationCreateRequest> {
        let start_date = self.start_date?;
        let end_date = match self.end_date_option {
            Some(YesNo::Yes) => self.end_date,
            _ => None,
        };
        if end_date.is_some_and(|end| end < start_date) {
            return None;
        }

        Some(AllocationCreateRequest {
            prisoner_number: self.prisoner.number.clone(),
            pay_band_id: self.pay.as_ref()?.prison_pay_band.id,
            start_date,
            end_date,
        })
    }
}

/// Summary kept after submission for the confirmation page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationConfirmation {
    pub allocation_id: i64,
    pub prisoner_name: String,
    pub prisoner_number: String,
    pub activity_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl JourneyData for AllocationConfirmation {
    const SLOT: JourneySlot = JourneySlot::AllocationConfirmation;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayBandForm {
    pub pay_band_id: i64,
}

impl FormInput for PayBandForm {
    fn parse(values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut form = FormParser::new(values);
        let pay_band_id = form.choice::<i64>("payBand", "Select a pay rate");

        form.finish(move || {
            Some(Self {
                pay_band_id: pay_band_id?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartDateForm {
    pub start_date: NaiveDate,
}

impl FormInput for StartDateForm {
    fn parse(values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut form = FormParser::new(values);
        let start_date = form.date("startDate", "Enter a start date", "Enter a valid start date");

        form.finish(move || {
            Some(Self {
                start_date: start_date?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndDateOptionForm {
    pub end_date_option: YesNo,
}

impl FormInput for EndDateOptionForm {
    fn parse(values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut form = FormParser::new(values);
        let end_date_option = form.choice::<YesNo>("endDateOption", "Select if you want to set an end date");

        form.finish(move || {
            Some(Self {
                end_date_option: end_date_option?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndDateForm {
    pub end_date: NaiveDate,
}

impl FormInput for EndDateForm {
    fn parse(values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut form = FormParser::new(values);
        let end_date = form.date("endDate", "Enter an end date", "Enter a valid end date");

        form.finish(move || {
            Some(Self {
                end_date: end_date?,
            })
        })
    }
}
