//! Frequent flyer accounts on the profile tab.
//!
//! The book is page-local; callers that sync it to a backend read
//! `rows()` after each change.

use std::fmt;

/// Unvalidated "Add frequent flyer" form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequentFlyerDraft {
    pub airline_code: String,
    pub airline_name: String,
    pub member_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequentFlyer {
    pub id: u64,
    /// Upper-cased IATA-style code.
    pub airline_code: String,
    pub airline_name: Option<String>,
    pub member_number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlyerError {
    MissingAirlineCode,
    MissingMemberNumber,
    NotFound(u64),
}

impl fmt::Display for FlyerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAirlineCode => f.write_str("Airline code is required."),
            Self::MissingMemberNumber => f.write_str("Member number is required."),
            Self::NotFound(id) => write!(f, "Frequent flyer account {id} not found"),
        }
    }
}

impl std::error::Error for FlyerError {}

#[derive(Debug, Default)]
pub struct FrequentFlyerBook {
    rows: Vec<FrequentFlyer>,
    next_id: u64,
}

impl FrequentFlyerBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> &[FrequentFlyer] {
        &self.rows
    }

    /// Validate `draft` and append it. The code check runs first.
    pub fn add(&mut self, draft: &FrequentFlyerDraft) -> Result<&FrequentFlyer, FlyerError> {
        let airline_code = draft.airline_code.trim().to_uppercase();
        if airline_code.is_empty() {
            return Err(FlyerError::MissingAirlineCode);
        }
        let member_number = draft.member_number.trim();
        if member_number.is_empty() {
            return Err(FlyerError::MissingMemberNumber);
        }
        let airline_name = Some(draft.airline_name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        self.next_id += 1;
        self.rows.push(FrequentFlyer {
            id: self.next_id,
            airline_code,
            airline_name,
            member_number: member_number.to_string(),
        });
        Ok(&self.rows[self.rows.len() - 1])
    }

    pub fn remove(&mut self, id: u64) -> Result<FrequentFlyer, FlyerError> {
        let index = self
            .rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(FlyerError::NotFound(id))?;
        Ok(self.rows.remove(index))
    }
}
