//! Column reshaping: split compound passenger fields into typed sub-fields
//!
//! `Cabin`, `Name` and `PassengerId` each pack several values into one
//! delimited string. Reshaping replaces each of them, in place, with its
//! named sub-fields and casts the numeric sub-fields and the boolean flag
//! columns to `Int32`.

use anyhow::{Context, Result};
use polars::prelude::*;

use super::error::PreprocessError;
use super::stage::frame_columns;

/// Type of a sub-field produced by splitting a compound column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubFieldKind {
    Text,
    Int32,
}

/// A delimited column and the sub-fields it splits into, in positional order
#[derive(Debug, Clone, Copy)]
pub struct CompoundField {
    pub source: &'static str,
    pub separator: char,
    pub parts: &'static [(&'static str, SubFieldKind)],
}

impl CompoundField {
    pub fn arity(&self) -> usize {
        self.parts.len()
    }

    /// Names of the sub-fields this compound column expands into
    pub fn part_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parts.iter().map(|(name, _)| *name)
    }
}

/// The three compound fields of the passenger record set.
pub const COMPOUND_FIELDS: [CompoundField; 3] = [
    CompoundField {
        source: "Cabin",
        separator: '/',
        parts: &[
            ("CabinDeck", SubFieldKind::Text),
            ("CabinNum", SubFieldKind::Int32),
            ("CabinSide", SubFieldKind::Text),
        ],
    },
    CompoundField {
        source: "Name",
        separator: ' ',
        parts: &[
            ("FirstName", SubFieldKind::Text),
            ("LastName", SubFieldKind::Text),
        ],
    },
    CompoundField {
        source: "PassengerId",
        separator: '_',
        parts: &[
            ("GroupId", SubFieldKind::Int32),
            ("IdInGroup", SubFieldKind::Int32),
        ],
    },
];

/// Boolean-like columns cast to `Int32` (1 = true, 0 = false).
pub const FLAG_COLUMNS: [&str; 2] = ["CryoSleep", "VIP"];

/// Split `value` positionally into exactly `arity` parts.
///
/// The last part keeps any remaining separators. Missing or empty parts are
/// `None`.
pub fn split_fixed(value: &str, separator: char, arity: usize) -> Vec<Option<&str>> {
    let mut parts: Vec<Option<&str>> = value
        .splitn(arity, separator)
        .map(|part| if part.is_empty() { None } else { Some(part) })
        .collect();
    parts.resize(arity, None);
    parts
}

/// Returns true when none of the compound columns remain and all of their
/// sub-fields are present.
pub fn is_reshaped(df: &DataFrame) -> bool {
    let names = frame_columns(df);
    COMPOUND_FIELDS.iter().all(|field| {
        !names.iter().any(|n| n == field.source)
            && field.part_names().all(|part| names.iter().any(|n| n == part))
    })
}

/// Reshape a passenger record set.
///
/// Every compound column is replaced by its sub-fields at the same position;
/// `CryoSleep` and `VIP` are cast to `Int32`. All other columns are carried
/// over untouched. Malformed values never fail: a missing separator or a
/// non-numeric integer part becomes null so imputation can fill it later.
///
/// Calling this on an already reshaped frame fails with
/// [`PreprocessError::MissingColumn`].
pub fn reshape_records(df: &DataFrame) -> Result<DataFrame> {
    let names = frame_columns(df);
    for required in COMPOUND_FIELDS
        .iter()
        .map(|f| f.source)
        .chain(FLAG_COLUMNS.iter().copied())
    {
        if !names.iter().any(|n| n == required) {
            return Err(PreprocessError::missing_column(required, &names).into());
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(df.width() + 4);

    for column in df.get_columns() {
        let name = column.name().as_str();

        if let Some(field) = COMPOUND_FIELDS.iter().find(|f| f.source == name) {
            columns.extend(split_compound(column, field)?);
        } else if FLAG_COLUMNS.iter().any(|flag| *flag == name) {
            columns.push(flag_to_int32(column)?);
        } else {
            columns.push(column.clone());
        }
    }

    DataFrame::new(columns).context("Failed to assemble reshaped record set")
}

fn split_compound(column: &Column, field: &CompoundField) -> Result<Vec<Column>> {
    let text = column
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' cannot be read as text", field.source))?;
    let ca = text.str()?;

    let arity = field.arity();
    let mut parts: Vec<Vec<Option<&str>>> = vec![Vec::with_capacity(ca.len()); arity];

    for value in ca.into_iter() {
        match value {
            Some(v) => {
                for (slot, part) in parts.iter_mut().zip(split_fixed(v, field.separator, arity)) {
                    slot.push(part);
                }
            }
            None => parts.iter_mut().for_each(|slot| slot.push(None)),
        }
    }

    let columns = field
        .parts
        .iter()
        .zip(parts)
        .map(|((name, kind), values)| match kind {
            SubFieldKind::Text => Column::new((*name).into(), values),
            SubFieldKind::Int32 => {
                let ints: Vec<Option<i32>> = values
                    .into_iter()
                    .map(|v| v.and_then(|s| s.trim().parse::<i32>().ok()))
                    .collect();
                Column::new((*name).into(), ints)
            }
        })
        .collect();

    Ok(columns)
}

/// Cast a boolean-like column to `Int32`.
///
/// Booleans and numbers are cast directly; text accepts `true`/`false`
/// (any case) and `1`/`0`, anything else becomes null.
fn flag_to_int32(column: &Column) -> Result<Column> {
    match column.dtype() {
        DataType::String => {
            let values: Vec<Option<i32>> = column
                .str()?
                .into_iter()
                .map(|v| {
                    v.and_then(|s| match s.trim().to_lowercase().as_str() {
                        "true" | "1" => Some(1),
                        "false" | "0" => Some(0),
                        _ => None,
                    })
                })
                .collect();
            Ok(Column::new(column.name().clone(), values))
        }
        _ => column
            .cast(&DataType::Int32)
            .with_context(|| format!("Column '{}' cannot be cast to Int32", column.name())),
    }
}
