use super::{FilmDraft, FilmPatch, NewFilm};

/// First year of commercial cinema; earlier release years are rejected.
pub const MIN_YEAR: i64 = 1895;

/// Ranks are 1-based.
pub const MIN_POSITION: i64 = 1;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError {
            field,
            reason: reason.into(),
        }
    }

    fn missing(field: &'static str) -> Self {
        Self::new(field, "field is required")
    }
}

impl FilmDraft {
    /// Check every field and produce a [`NewFilm`].
    ///
    /// Fields are checked in declaration order; the first failure wins.
    pub fn validate(&self) -> Result<NewFilm, ValidationError> {
        let title = required_text("title", self.title.as_deref())?;
        let rating = required_text("rating", self.rating.as_deref())?;
        check_rating(&rating)?;
        let year = self.year.ok_or_else(|| ValidationError::missing("year"))?;
        check_year(year)?;
        let budget = self.budget.ok_or_else(|| ValidationError::missing("budget"))?;
        check_amount("budget", budget)?;
        let gross = self.gross.ok_or_else(|| ValidationError::missing("gross"))?;
        check_amount("gross", gross)?;
        let poster = required_text("poster", self.poster.as_deref())?;
        let desired_position = self
            .position
            .ok_or_else(|| ValidationError::missing("position"))?;
        check_position(desired_position)?;

        Ok(NewFilm {
            title,
            rating,
            year,
            budget,
            gross,
            poster,
            desired_position,
        })
    }
}

impl FilmPatch {
    /// Apply the insert rules to the fields that are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            required_text("title", Some(title))?;
        }
        if let Some(rating) = &self.rating {
            check_rating(&required_text("rating", Some(rating))?)?;
        }
        if let Some(year) = self.year {
            check_year(year)?;
        }
        if let Some(budget) = self.budget {
            check_amount("budget", budget)?;
        }
        if let Some(gross) = self.gross {
            check_amount("gross", gross)?;
        }
        if let Some(poster) = &self.poster {
            required_text("poster", Some(poster))?;
        }
        if let Some(position) = self.position {
            check_position(position)?;
        }
        Ok(())
    }
}

fn required_text(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::missing(field)),
        Some(text) if text.trim().is_empty() => Err(ValidationError::new(field, "must not be empty")),
        Some(text) => Ok(text.to_string()),
    }
}

fn check_rating(rating: &str) -> Result<(), ValidationError> {
    match rating.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(()),
        _ => Err(ValidationError::new("rating", "must be a decimal number")),
    }
}

fn check_year(year: i64) -> Result<(), ValidationError> {
    if year < MIN_YEAR {
        return Err(ValidationError::new(
            "year",
            format!("must be {} or later", MIN_YEAR),
        ));
    }
    Ok(())
}

fn check_amount(field: &'static str, amount: i64) -> Result<(), ValidationError> {
    if amount < 0 {
        return Err(ValidationError::new(field, "must not be negative"));
    }
    Ok(())
}

fn check_position(position: i64) -> Result<(), ValidationError> {
    if position < MIN_POSITION {
        return Err(ValidationError::new(
            "position",
            format!("must be {} or greater", MIN_POSITION),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> FilmDraft {
        FilmDraft {
            title: Some("Mirror".into()),
            rating: Some("8.0".into()),
            year: Some(1975),
            budget: Some(622_000),
            gross: Some(0),
            poster: Some("https://example.com/mirror.jpg".into()),
            position: Some(2),
        }
    }

    #[test]
    fn complete_draft_is_valid() {
        let new_film = draft().validate().unwrap();
        assert_eq!(new_film.desired_position, 2);
        assert_eq!(new_film.gross, 0);
    }

    #[test]
    fn year_boundary() {
        let mut d = draft();
        d.year = Some(1894);
        assert_eq!(d.validate().unwrap_err().field, "year");

        d.year = Some(1895);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn negative_amounts_rejected() {
        let mut d = draft();
        d.budget = Some(-1);
        assert_eq!(d.validate().unwrap_err().field, "budget");

        let mut d = draft();
        d.gross = Some(-5);
        assert_eq!(d.validate().unwrap_err().field, "gross");
    }

    #[test]
    fn missing_and_blank_fields() {
        let mut d = draft();
        d.poster = None;
        let err = d.validate().unwrap_err();
        assert_eq!(err.field, "poster");
        assert_eq!(err.reason, "field is required");

        let mut d = draft();
        d.title = Some("   ".into());
        assert_eq!(d.validate().unwrap_err().field, "title");
    }

    #[test]
    fn rating_must_be_decimal() {
        let mut d = draft();
        d.rating = Some("great".into());
        assert_eq!(d.validate().unwrap_err().field, "rating");
    }

    #[test]
    fn position_must_be_positive() {
        let mut d = draft();
        d.position = Some(0);
        assert_eq!(d.validate().unwrap_err().field, "position");
    }

    #[test]
    fn patch_checks_only_present_fields() {
        assert!(FilmPatch::new(1).validate().is_ok());

        let patch = FilmPatch {
            year: Some(1800),
            ..FilmPatch::new(1)
        };
        assert_eq!(patch.validate().unwrap_err().field, "year");

        let patch = FilmPatch {
            gross: Some(-1),
            ..FilmPatch::new(1)
        };
        assert_eq!(patch.validate().unwrap_err().field, "gross");
    }

    #[test]
    fn display_names_field() {
        let err = ValidationError::new("year", "must be 1895 or later");
        assert_eq!(err.to_string(), "invalid year: must be 1895 or later");
    }
}
