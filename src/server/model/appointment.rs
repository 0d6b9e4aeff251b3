//! Appointment creation journey state and step forms.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{
    model::activities::{
        AppointmentCategorySummary, AppointmentLocationSummary, AppointmentSeriesCreateRequest,
        AppointmentSeriesSchedule,
    },
    server::model::{
        form::{today, FormInput, FormParser, FormValues, ValidationErrors, YesNo},
        journey::{JourneyData, JourneySlot},
        recurrence::{calculate_end_date, RepeatFrequency},
    },
};

/// Upper bound on the number of appointments in one series.
pub const MAX_NUMBER_OF_APPOINTMENTS: u32 = 312;

pub const EXTRA_INFORMATION_MAX_LENGTH: usize = 4000;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentType {
    #[default]
    Individual,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JourneyPrisoner {
    pub number: String,
    pub name: String,
    pub cell_location: Option<String>,
}

/// Answers collected by the appointment creation journey so far.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentJourney {
    pub appointment_type: AppointmentType,
    pub prisoner: Option<JourneyPrisoner>,
    pub category: Option<AppointmentCategorySummary>,
    pub location: Option<AppointmentLocationSummary>,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub repeat: Option<YesNo>,
    pub frequency: Option<RepeatFrequency>,
    pub number_of_appointments: Option<u32>,
    pub extra_information: Option<String>,
}

impl JourneyData for CreateAppointmentJourney {
    const SLOT: JourneySlot = JourneySlot::CreateAppointment;
}

impl CreateAppointmentJourney {
    pub fn individual() -> Self {
        Self {
            appointment_type: AppointmentType::Individual,
            ..Default::default()
        }
    }

    /// Repeat schedule, if the appointment repeats.
    pub fn schedule(&self) -> Option<AppointmentSeriesSchedule> {
        match self.repeat? {
            YesNo::Yes => Some(AppointmentSeriesSchedule {
                frequency: self.frequency?,
                number_of_appointments: self.number_of_appointments?,
            }),
            YesNo::No => None,
        }
    }

    /// Date of the last appointment in the series.
    ///
    /// Equal to the start date for one-off appointments; `None` until a start
    /// date has been entered.
    pub fn end_date(&self) -> Option<NaiveDate> {
        let start = self.start_date?;
        Some(match self.schedule() {
            Some(schedule) => {
                calculate_end_date(start, schedule.frequency, schedule.number_of_appointments)
            }
            None => start,
        })
    }

    /// Builds the activities API request.
    ///
    /// # Returns
    /// - `Some(request)` - Every required answer is present
    /// - `None` - The journey is incomplete
    pub fn to_request(&self, prison_code: &str) -> Option<AppointmentSeriesCreateRequest> {
        let prisoner = self.prisoner.as_ref()?;
        let category = self.category.as_ref()?;
        let location = self.location.as_ref()?;
        let repeat = self.repeat?;

        let schedule = self.schedule();
        if repeat == YesNo::Yes && schedule.is_none() {
            return None;
        }

        Some(AppointmentSeriesCreateRequest {
            appointment_type: "INDIVIDUAL".to_string(),
            prison_code: prison_code.to_string(),
            prisoner_numbers: vec![prisoner.number.clone()],
            category_code: category.code.clone(),
            internal_location_id: location.id,
            in_cell: false,
            start_date: self.start_date?,
            start_time: self.start_time?,
            end_time: self.end_time,
            schedule,
            extra_information: self.extra_information.clone(),
        })
    }
}

/// Checks the `A1234BC` prisoner number shape.
pub fn is_prisoner_number(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    chars.len() == 7
        && chars[0].is_ascii_uppercase()
        && chars[1..5].iter().all(char::is_ascii_digit)
        && chars[5..].iter().all(char::is_ascii_uppercase)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectPrisonerForm {
    pub prisoner_number: String,
}

impl FormInput for SelectPrisonerForm {
    fn parse(values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut form = FormParser::new(values);
        let number = form
            .required("prisonerNumber", "Enter a prison number")
            .map(|number| number.to_uppercase());

        if let Some(number) = &number {
            if !is_prisoner_number(number) {
                form.error("prisonerNumber", "Enter a prison number in the format A1234BC");
            }
        }

        form.finish(move || {
            Some(Self {
                prisoner_number: number?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryForm {
    pub category_code: String,
}

impl FormInput for CategoryForm {
    fn parse(values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut form = FormParser::new(values);
        let category_code = form.required("categoryCode", "Select a category");

        form.finish(move || {
            Some(Self {
                category_code: category_code?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationForm {
    pub location_id: i64,
}

impl FormInput for LocationForm {
    fn parse(values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut form = FormParser::new(values);
        let location_id = form.choice::<i64>("locationId", "Select a location");

        form.finish(move || {
            Some(Self {
                location_id: location_id?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateAndTimeForm {
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
}

impl FormInput for DateAndTimeForm {
    fn parse(values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut form = FormParser::new(values);

        let start_date = form.date("startDate", "Enter a date", "Enter a valid date");
        if let Some(date) = start_date {
            if date < today() {
                form.error("startDate", "Enter a date on or after today");
            }
        }

        let start_time = form.time("startTime", "Select a start time", "Select a valid start time");
        let end_time = form
            .optional_time("endTime", "Select a valid end time")
            .flatten();

        if let (Some(start), Some(end)) = (start_time, end_time) {
            if end <= start {
                form.error("endTime", "Select an end time after the start time");
            }
        }

        form.finish(move || {
            Some(Self {
                start_date: start_date?,
                start_time: start_time?,
                end_time,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatForm {
    pub repeat: YesNo,
}

impl FormInput for RepeatForm {
    fn parse(values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut form = FormParser::new(values);
        let repeat = form.choice::<YesNo>("repeat", "Select if the appointment will repeat");

        form.finish(move || Some(Self { repeat: repeat? }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatFrequencyAndCountForm {
    pub frequency: RepeatFrequency,
    pub number_of_appointments: u32,
}

impl FormInput for RepeatFrequencyAndCountForm {
    fn parse(values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut form = FormParser::new(values);
        let frequency = form.choice::<RepeatFrequency>("frequency", "Select how often the appointment will repeat");
        let out_of_range = format!("Enter a number between 1 and {}", MAX_NUMBER_OF_APPOINTMENTS);
        let number_of_appointments = form.integer_in(
            "numberOfAppointments",
            1..=MAX_NUMBER_OF_APPOINTMENTS,
            "Enter how many times the appointment will repeat",
            &out_of_range,
        );

        form.finish(move || {
            Some(Self {
                frequency: frequency?,
                number_of_appointments: number_of_appointments?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtraInformationForm {
    pub extra_information: Option<String>,
}

impl FormInput for ExtraInformationForm {
    fn parse(values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut form = FormParser::new(values);
        let extra_information = form.optional_max_length(
            "extraInformation",
            EXTRA_INFORMATION_MAX_LENGTH,
            "You must enter extra information which has no more than 4,000 characters",
        );

        form.finish(move || Some(Self { extra_information }))
    }
}
