//! Column role configuration for the preprocessing pipeline
//!
//! Columns are routed to pipeline stages by name. The routing is checked
//! once against the input schema when a [`crate::pipeline::Preprocessor`] is
//! built, so a typo in a column list fails before any data is touched.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::PreprocessError;

/// How the imputer treats a group of columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Passed through untouched
    Identifier,
    /// Absences filled with the most frequent value
    Categorical,
    /// Absences filled with the median
    Numeric,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 3] = [
        ColumnRole::Identifier,
        ColumnRole::Categorical,
        ColumnRole::Numeric,
    ];
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Identifier => write!(f, "identifier"),
            ColumnRole::Categorical => write!(f, "categorical"),
            ColumnRole::Numeric => write!(f, "numeric"),
        }
    }
}

/// Ordered column lists per role. Columns outside every list are dropped by
/// the imputer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnRoles {
    #[serde(alias = "id", default)]
    pub identifier: Vec<String>,
    #[serde(alias = "cat", default)]
    pub categorical: Vec<String>,
    #[serde(alias = "num", default)]
    pub numeric: Vec<String>,
}

impl ColumnRoles {
    pub fn columns(&self, role: ColumnRole) -> &[String] {
        match role {
            ColumnRole::Identifier => &self.identifier,
            ColumnRole::Categorical => &self.categorical,
            ColumnRole::Numeric => &self.numeric,
        }
    }

    /// All routed columns with their role, in output order
    pub fn iter(&self) -> impl Iterator<Item = (ColumnRole, &str)> + '_ {
        ColumnRole::ALL
            .into_iter()
            .flat_map(move |role| self.columns(role).iter().map(move |c| (role, c.as_str())))
    }

    pub fn role_of(&self, column: &str) -> Option<ColumnRole> {
        self.iter()
            .find(|(_, name)| *name == column)
            .map(|(role, _)| role)
    }
}

/// Full pipeline routing: imputer roles, one-hot columns and standardized columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    pub imputer: ColumnRoles,
    #[serde(default)]
    pub one_hot: Vec<String>,
    #[serde(default)]
    pub standard: Vec<String>,
}

fn names(list: &str) -> Vec<String> {
    list.split_whitespace().map(str::to_string).collect()
}

impl PreprocessConfig {
    /// Routing for the reshaped Spaceship Titanic passenger table.
    ///
    /// `FirstName`/`LastName` and the `Transported` label are left out of
    /// the imputer roles and are therefore dropped.
    pub fn spaceship() -> Self {
        Self {
            imputer: ColumnRoles {
                identifier: names("GroupId IdInGroup"),
                categorical: names(
                    "HomePlanet CryoSleep CabinDeck CabinNum CabinSide Destination VIP",
                ),
                numeric: names("Age RoomService FoodCourt ShoppingMall Spa VRDeck"),
            },
            one_hot: names("HomePlanet CabinDeck CabinSide Destination"),
            standard: names("GroupId CabinNum Age RoomService FoodCourt ShoppingMall Spa VRDeck"),
        }
    }

    /// Load a routing configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Check the routing against the input schema.
    ///
    /// - every imputer column exists in `input_columns`
    /// - no column is routed twice
    /// - one-hot columns are imputer outputs
    /// - standardized columns are imputer outputs that are not one-hot encoded
    pub fn validate<S: AsRef<str>>(&self, input_columns: &[S]) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for (_, column) in self.imputer.iter() {
            if !input_columns.iter().any(|c| c.as_ref() == column) {
                return Err(PreprocessError::missing_column(column, input_columns).into());
            }
            if !seen.insert(column) {
                return Err(PreprocessError::DuplicateColumn {
                    column: column.to_string(),
                }
                .into());
            }
        }

        let mut encoded: HashSet<&str> = HashSet::new();
        for column in &self.one_hot {
            if !seen.contains(column.as_str()) {
                return Err(PreprocessError::UnroutedColumn {
                    stage: "Encoder",
                    column: column.clone(),
                }
                .into());
            }
            if !encoded.insert(column.as_str()) {
                return Err(PreprocessError::DuplicateColumn {
                    column: column.clone(),
                }
                .into());
            }
        }

        let mut scaled: HashSet<&str> = HashSet::new();
        for column in &self.standard {
            if !seen.contains(column.as_str()) || encoded.contains(column.as_str()) {
                return Err(PreprocessError::UnroutedColumn {
                    stage: "Scaler",
                    column: column.clone(),
                }
                .into());
            }
            if !scaled.insert(column.as_str()) {
                return Err(PreprocessError::DuplicateColumn {
                    column: column.clone(),
                }
                .into());
            }
        }

        Ok(())
    }
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self::spaceship()
    }
}
