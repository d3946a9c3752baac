use std::fmt;
use std::str::FromStr;

use crate::models::{ApartmentFields, ApartmentId, ApartmentRecord, ApartmentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Location,
    Rent,
    Status,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Location => "location",
            FormField::Rent => "rent",
            FormField::Status => "status",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(FormField::Name),
            "location" => Ok(FormField::Location),
            "rent" => Ok(FormField::Rent),
            "status" => Ok(FormField::Status),
            other => Err(format!("unknown field '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct FieldError {
    pub field: FormField,
    pub reason: String,
}

impl FieldError {
    fn new(field: FormField, reason: impl Into<String>) -> FieldError {
        FieldError {
            field,
            reason: reason.into(),
        }
    }
}

/// Raw input as typed into the form. Rent stays text until the form is submitted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormFields {
    pub name: String,
    pub location: String,
    pub rent: String,
    pub status: ApartmentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ApartmentId),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormSession {
    fields: FormFields,
    target_id: Option<ApartmentId>,
}

impl FormSession {
    pub fn new() -> FormSession {
        FormSession::default()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn target_id(&self) -> Option<&ApartmentId> {
        self.target_id.as_ref()
    }

    pub fn mode(&self) -> FormMode {
        match &self.target_id {
            Some(id) => FormMode::Edit(id.clone()),
            None => FormMode::Create,
        }
    }

    /// Updates one field. A status that does not parse leaves the session as it was.
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), FieldError> {
        match field {
            FormField::Name => self.fields.name = value.to_string(),
            FormField::Location => self.fields.location = value.to_string(),
            FormField::Rent => self.fields.rent = value.to_string(),
            FormField::Status => {
                self.fields.status = value
                    .parse()
                    .map_err(|reason: String| FieldError::new(field, reason))?
            }
        }
        Ok(())
    }

    pub fn begin_edit(&mut self, record: &ApartmentRecord) {
        self.fields = FormFields {
            name: record.name.clone(),
            location: record.location.clone(),
            rent: record.rent.to_string(),
            status: record.status,
        };
        self.target_id = Some(record.id.clone());
    }

    pub fn reset(&mut self) {
        *self = FormSession::default();
    }

    /// Checks the input and turns it into a request body.
    pub fn to_payload(&self) -> Result<ApartmentFields, FieldError> {
        let name = self.fields.name.trim();
        if name.is_empty() {
            return Err(FieldError::new(FormField::Name, "must not be empty"));
        }

        let location = self.fields.location.trim();
        if location.is_empty() {
            return Err(FieldError::new(FormField::Location, "must not be empty"));
        }

        let rent: f64 = self
            .fields
            .rent
            .trim()
            .parse()
            .map_err(|_| FieldError::new(FormField::Rent, "must be a number"))?;
        if !rent.is_finite() || rent < 0.0 {
            return Err(FieldError::new(FormField::Rent, "must be zero or more"));
        }

        Ok(ApartmentFields {
            name: name.to_string(),
            location: location.to_string(),
            rent,
            status: self.fields.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ApartmentRecord {
        ApartmentRecord {
            id: ApartmentId::from(2),
            name: "Loft".to_string(),
            location: "Harbour".to_string(),
            rent: 950.0,
            status: ApartmentStatus::Occupied,
        }
    }

    #[test]
    fn starts_empty_in_create_mode() {
        let session = FormSession::new();
        assert_eq!(session.mode(), FormMode::Create);
        assert_eq!(session.fields(), &FormFields::default());
        assert_eq!(session.fields().status, ApartmentStatus::Available);
    }

    #[test]
    fn set_field_touches_one_field_only() {
        let mut session = FormSession::new();
        session.begin_edit(&record());
        session.set_field(FormField::Location, "Old Town").unwrap();

        assert_eq!(session.fields().location, "Old Town");
        assert_eq!(session.fields().name, "Loft");
        assert_eq!(session.fields().rent, "950");
        assert_eq!(session.target_id(), Some(&ApartmentId::from(2)));
    }

    #[test]
    fn bad_status_is_refused() {
        let mut session = FormSession::new();
        let before = session.clone();
        let err = session.set_field(FormField::Status, "vacant").unwrap_err();

        assert_eq!(err.field, FormField::Status);
        assert_eq!(session, before);
    }

    #[test]
    fn begin_edit_retargets() {
        let mut session = FormSession::new();
        session.begin_edit(&record());
        let mut other = record();
        other.id = ApartmentId::from(5);
        other.name = "Studio".to_string();
        session.begin_edit(&other);

        assert_eq!(session.mode(), FormMode::Edit(ApartmentId::from(5)));
        assert_eq!(session.fields().name, "Studio");
    }

    #[test]
    fn reset_returns_to_create() {
        let mut session = FormSession::new();
        session.begin_edit(&record());
        session.reset();
        assert_eq!(session, FormSession::new());
    }

    #[test]
    fn payload_validation() {
        let mut session = FormSession::new();
        assert_eq!(session.to_payload().unwrap_err().field, FormField::Name);

        session.set_field(FormField::Name, "Unit A").unwrap();
        session.set_field(FormField::Location, "  ").unwrap();
        assert_eq!(session.to_payload().unwrap_err().field, FormField::Location);

        session.set_field(FormField::Location, "Downtown").unwrap();
        session.set_field(FormField::Rent, "-5").unwrap();
        assert_eq!(session.to_payload().unwrap_err().field, FormField::Rent);

        session.set_field(FormField::Rent, "1200").unwrap();
        let payload = session.to_payload().unwrap();
        assert_eq!(payload.rent, 1200.0);
        assert_eq!(payload.status, ApartmentStatus::Available);
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("Rent".parse::<FormField>(), Ok(FormField::Rent));
        assert!("price".parse::<FormField>().is_err());
    }
}
