//! Query construction — turns request parameters into an equality
//! conjunction over record fields.
//!
//! Each recognised parameter is a [`FilterField`]. A parameter that is absent
//! or empty contributes no clause at all; the remaining clauses are ANDed. An
//! empty [`Query`] matches every record.

use serde_json::Value;

use crate::error::QueryError;
use crate::types::Record;

// ---------------------------------------------------------------------------
// FilterField
// ---------------------------------------------------------------------------

/// A filter parameter the read endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    EndYear,
    Topic,
    Sector,
    Region,
    Pest,
    Source,
    Swot,
    Country,
    City,
}

impl FilterField {
    /// Every field, in the order clauses are emitted.
    pub const ALL: [FilterField; 9] = [
        FilterField::EndYear,
        FilterField::Topic,
        FilterField::Sector,
        FilterField::Region,
        FilterField::Pest,
        FilterField::Source,
        FilterField::Swot,
        FilterField::Country,
        FilterField::City,
    ];

    /// Name of the query-string parameter.
    pub fn param(self) -> &'static str {
        match self {
            FilterField::EndYear => "end_year",
            FilterField::Topic => "topic",
            FilterField::Sector => "sector",
            FilterField::Region => "region",
            FilterField::Pest => "pest",
            FilterField::Source => "source",
            FilterField::Swot => "swot",
            FilterField::Country => "country",
            FilterField::City => "city",
        }
    }

    /// Name of the record field the parameter is matched against.
    pub fn field(self) -> &'static str {
        match self {
            FilterField::Pest => "pestle",
            other => other.param(),
        }
    }

    pub fn from_param(name: &str) -> Option<FilterField> {
        FilterField::ALL.into_iter().find(|f| f.param() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.param())
    }
}

// ---------------------------------------------------------------------------
// FilterParams
// ---------------------------------------------------------------------------

/// Raw, unvalidated filter values keyed by [`FilterField`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    values: [Option<String>; 9],
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect recognised parameters from query-string pairs. Unknown keys are
    /// ignored; for a repeated key the first occurrence wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            if let Some(field) = FilterField::from_param(key.as_ref()) {
                let slot = &mut params.values[field.index()];
                if slot.is_none() {
                    *slot = Some(value.into());
                }
            }
        }
        params
    }

    /// Builder-style setter, mostly for tests.
    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.values[field.index()] = Some(value.into());
        self
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    /// Validate and convert into a [`Query`].
    pub fn to_query(&self) -> Result<Query, QueryError> {
        let mut clauses = Vec::new();
        for field in FilterField::ALL {
            let Some(raw) = self.get(field).filter(|v| !v.is_empty()) else {
                continue;
            };
            let expected = match field {
                FilterField::EndYear => Expected::Integer(parse_year(raw)?),
                _ => Expected::Text(raw.to_string()),
            };
            clauses.push(Clause {
                field: field.field(),
                expected,
            });
        }
        Ok(Query { clauses })
    }
}

fn parse_year(raw: &str) -> Result<i64, QueryError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| QueryError::InvalidEndYear {
            value: raw.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// The value a clause compares against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// Exact string match.
    Text(String),
    /// Integer match. Stored numbers equal to the integer qualify, as do
    /// stored strings holding its canonical decimal form (`"2020"`, not
    /// `" 2020"` or `"02020"`).
    Integer(i64),
}

impl Expected {
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Expected::Text(want), Value::String(got)) => want == got,
            (Expected::Integer(want), Value::Number(got)) => match got.as_i64() {
                Some(n) => n == *want,
                None => got.as_f64() == Some(*want as f64),
            },
            (Expected::Integer(want), Value::String(got)) => *got == want.to_string(),
            _ => false,
        }
    }
}

/// A single `field == value` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: &'static str,
    pub expected: Expected,
}

impl Clause {
    pub fn matches(&self, record: &Record) -> bool {
        record
            .get(self.field)
            .is_some_and(|value| self.expected.matches(value))
    }
}

/// Conjunction of [`Clause`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    clauses: Vec<Clause>,
}

impl Query {
    /// The query that matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.clauses.iter().all(|c| c.matches(record))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
