//! Validation of teacher-submitted course content.

use super::CourseValidationError;

/// Raw submission fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseDraftInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub language: Option<String>,
    pub price: Option<f64>,
}

/// Non-negative, finite course price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Validate a raw price.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Price;
    ///
    /// assert!(Price::new(0.0).is_ok());
    /// assert!(Price::new(-1.0).is_err());
    /// ```
    pub fn new(value: f64) -> Result<Self, CourseValidationError> {
        if !value.is_finite() {
            return Err(CourseValidationError::InvalidPrice);
        }
        if value < 0.0 {
            return Err(CourseValidationError::NegativePrice);
        }
        Ok(Self(value))
    }

    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Course content that passed validation.
///
/// ## Invariants
/// - `title`, `description` and `category` are trimmed and non-empty.
/// - `level` and `language` are trimmed; blank input becomes `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: Option<String>,
    pub language: Option<String>,
    pub price: Price,
}

impl TryFrom<CourseDraftInput> for CourseDraft {
    type Error = CourseValidationError;

    fn try_from(input: CourseDraftInput) -> Result<Self, Self::Error> {
        let title = required(input.title, "title")?;
        let description = required(input.description, "description")?;
        let category = required(input.category, "category")?;
        let price = input
            .price
            .ok_or(CourseValidationError::MissingField { field: "price" })
            .and_then(Price::new)?;

        Ok(Self {
            title,
            description,
            category,
            level: optional(input.level),
            language: optional(input.language),
            price,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, CourseValidationError> {
    optional(value).ok_or(CourseValidationError::MissingField { field })
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}
