//! Publisher domain entity

use crate::shared::{ensure_not_blank, DomainError, DomainResult};

/// Game publisher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publisher {
    /// Store-assigned identifier
    pub id: String,
    pub name: String,
    /// Company registration number
    pub siret: i64,
    pub phone: String,
}

/// Publisher that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPublisher {
    pub name: String,
    pub siret: i64,
    pub phone: String,
}

impl NewPublisher {
    pub fn new(name: impl Into<String>, siret: i64, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            siret,
            phone: phone.into(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_not_blank("name", &self.name)?;
        if self.siret < 0 {
            return Err(DomainError::Validation(format!(
                "siret must not be negative (got {})",
                self.siret
            )));
        }
        Ok(())
    }

    /// Attach the identifier chosen by the store.
    pub fn with_id(self, id: impl Into<String>) -> Publisher {
        Publisher {
            id: id.into(),
            name: self.name,
            siret: self.siret,
            phone: self.phone,
        }
    }
}
