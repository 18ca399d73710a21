use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::AppError;

pub const MAX_ADULTS: u32 = 10;
pub const MAX_CHILDREN: u32 = 6;
pub const MAX_ROOMS: u32 = 5;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// State of the stay search form: destination, dates and occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub location: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub rooms: u32,
    pub pet_friendly: bool,
}

impl SearchParams {
    /// Form defaults for a given day: one night from `today`, two adults, one room.
    pub fn for_date(today: NaiveDate) -> Self {
        Self {
            location: String::new(),
            check_in: today,
            check_out: today.checked_add_days(Days::new(1)).unwrap_or(today),
            adults: 2,
            children: 0,
            rooms: 1,
            pet_friendly: false,
        }
    }

    /// Total number of guests.
    pub fn guests(&self) -> u32 {
        self.adults + self.children
    }

    /// Check occupancy bounds and the date range against `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<(), AppError> {
        if !(1..=MAX_ADULTS).contains(&self.adults) {
            return Err(AppError::BadRequest(format!(
                "Adults must be between 1 and {MAX_ADULTS}"
            )));
        }
        if self.children > MAX_CHILDREN {
            return Err(AppError::BadRequest(format!(
                "Children must be between 0 and {MAX_CHILDREN}"
            )));
        }
        if !(1..=MAX_ROOMS).contains(&self.rooms) {
            return Err(AppError::BadRequest(format!(
                "Rooms must be between 1 and {MAX_ROOMS}"
            )));
        }
        if self.check_in < today {
            return Err(AppError::BadRequest("Check-in cannot be in the past".into()));
        }
        if self.check_out <= self.check_in {
            return Err(AppError::BadRequest(
                "Check-out must be after check-in".into(),
            ));
        }
        Ok(())
    }

    /// Serialize to the query string understood by the search results view.
    ///
    /// `search` is only present for a non-blank destination and `petFriendly`
    /// only when set; every other field is always written.
    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        let location = self.location.trim();
        if !location.is_empty() {
            query.append_pair("search", location);
        }
        query
            .append_pair("checkIn", &self.check_in.format(DATE_FORMAT).to_string())
            .append_pair("checkOut", &self.check_out.format(DATE_FORMAT).to_string())
            .append_pair("guests", &self.guests().to_string())
            .append_pair("adults", &self.adults.to_string())
            .append_pair("children", &self.children.to_string())
            .append_pair("rooms", &self.rooms.to_string());
        if self.pet_friendly {
            query.append_pair("petFriendly", "true");
        }
        query.finish()
    }

    /// Navigation target for the search results view.
    pub fn search_path(&self) -> String {
        format!("/search?{}", self.to_query_string())
    }

    /// Parse a query string produced by [`SearchParams::to_query_string`].
    ///
    /// Missing fields take the defaults for `today`; `guests` is derived and
    /// ignored on input.
    pub fn from_query_str(query: &str, today: NaiveDate) -> Result<Self, AppError> {
        let mut params = Self::for_date(today);
        let query = query.strip_prefix('?').unwrap_or(query);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "search" => params.location = value.trim().to_string(),
                "checkIn" => params.check_in = parse_date("checkIn", &value)?,
                "checkOut" => params.check_out = parse_date("checkOut", &value)?,
                "adults" => params.adults = parse_count("adults", &value)?,
                "children" => params.children = parse_count("children", &value)?,
                "rooms" => params.rooms = parse_count("rooms", &value)?,
                "petFriendly" => params.pet_friendly = value == "true",
                _ => {}
            }
        }

        Ok(params)
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| AppError::BadRequest(format!("Invalid {field} date '{value}'")))
}

fn parse_count(field: &str, value: &str) -> Result<u32, AppError> {
    value
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {field} count '{value}'")))
}
