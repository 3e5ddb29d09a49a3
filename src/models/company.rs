//! Company model.

use serde::{Deserialize, Serialize};

/// A company that employees may reference by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Store-assigned identifier; `None` until the company is saved.
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Replacement values for a company update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyPatch {
    pub name: String,
}

impl CompanyPatch {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn apply_to(&self, company: &mut Company) {
        company.name = self.name.clone();
    }
}
