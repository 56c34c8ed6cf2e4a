//! School records and submission validation
//!
//! Raw multipart text lands in [`SchoolForm`]; [`NewSchool::from_form`] turns it
//! into a record that is safe to insert. Values are stored exactly as submitted;
//! trimming is only used to decide whether a field is blank.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Loose `x@y.z` shape, same as the submission form enforces client-side
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("invalid email regex"));

/// ASCII digits only; `\d` would also accept other Unicode digits
static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{7,15}$").expect("invalid contact regex"));

/// Required fields in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 6] = ["name", "address", "city", "state", "contact", "email"];

/// Older clients post the email under this name.
const EMAIL_ALIAS: &str = "email_id";

// Column widths from the schema
const MAX_NAME_LEN: usize = 255;
const MAX_ADDRESS_LEN: usize = 255;
const MAX_CITY_LEN: usize = 100;
const MAX_STATE_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 255;

/// Text fields collected from a submission, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolForm {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
}

impl SchoolForm {
    /// Record a text field by its form name.
    ///
    /// The first value for a field wins; unknown names are ignored.
    /// Returns whether the field was recognised.
    pub fn set(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "address" => &mut self.address,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "contact" => &mut self.contact,
            "email" | EMAIL_ALIAS => &mut self.email,
            _ => return false,
        };

        if slot.is_none() {
            *slot = Some(value);
        }
        true
    }

    fn get(&self, field: &str) -> Option<&str> {
        match field {
            "name" => self.name.as_deref(),
            "address" => self.address.as_deref(),
            "city" => self.city.as_deref(),
            "state" => self.state.as_deref(),
            "contact" => self.contact.as_deref(),
            "email" => self.email.as_deref(),
            _ => None,
        }
    }
}

/// A validated school, ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email: String,
}

impl NewSchool {
    /// Validate a submitted form.
    ///
    /// # Rules
    /// - name, address, city, state, contact, email must be non-blank,
    ///   checked in that order
    /// - no field may contain a NUL character
    /// - email must match `^\S+@\S+\.\S+$`
    /// - contact must be 7-15 ASCII digits
    /// - text must fit the column widths
    ///
    /// # Example
    /// ```
    /// use schooldir_server::models::{NewSchool, SchoolForm};
    ///
    /// let mut form = SchoolForm::default();
    /// for (field, value) in [
    ///     ("name", "Hillside Academy"),
    ///     ("address", "12 Ridge Road"),
    ///     ("city", "Pune"),
    ///     ("state", "Maharashtra"),
    ///     ("contact", "9876543210"),
    ///     ("email", "office@hillside.edu"),
    /// ] {
    ///     form.set(field, value.to_string());
    /// }
    /// assert!(NewSchool::from_form(&form).is_ok());
    /// ```
    pub fn from_form(form: &SchoolForm) -> Result<Self, ValidationError> {
        for field in REQUIRED_FIELDS {
            let present = form.get(field).is_some_and(|v| !v.trim().is_empty());
            if !present {
                return Err(ValidationError::Missing { field });
            }
        }
        for field in REQUIRED_FIELDS {
            if form.get(field).is_some_and(|v| v.contains('\0')) {
                return Err(ValidationError::InvalidCharacters { field });
            }
        }

        let field = |name: &str| form.get(name).unwrap_or_default().to_owned();
        let school = Self {
            name: field("name"),
            address: field("address"),
            city: field("city"),
            state: field("state"),
            contact: field("contact"),
            email: field("email"),
        };

        if !EMAIL_RE.is_match(&school.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if !CONTACT_RE.is_match(&school.contact) {
            return Err(ValidationError::InvalidContact);
        }

        check_len("name", &school.name, MAX_NAME_LEN)?;
        check_len("address", &school.address, MAX_ADDRESS_LEN)?;
        check_len("city", &school.city, MAX_CITY_LEN)?;
        check_len("state", &school.state, MAX_STATE_LEN)?;
        check_len("email", &school.email, MAX_EMAIL_LEN)?;

        Ok(school)
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Full school record as stored
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub image: Option<String>,
    #[sqlx(rename = "email_id")]
    pub email: String,
}

/// Listing projection of a school
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct SchoolSummary {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub image: Option<String>,
}

impl From<&School> for SchoolSummary {
    fn from(s: &School) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            address: s.address.clone(),
            city: s.city.clone(),
            image: s.image.clone(),
        }
    }
}
