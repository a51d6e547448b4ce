use std::collections::BTreeMap;
use std::fmt::Write;

use rusqlite::types::ToSqlOutput;
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

/// A value bound into an equality term. Untagged on the wire so
/// `{"where": {"propertyId": 3, "city": "Oceanside"}}` parses directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl ToSql for FilterValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            FilterValue::Integer(v) => ToSqlOutput::from(*v),
            FilterValue::Real(v) => ToSqlOutput::from(*v),
            FilterValue::Text(v) => ToSqlOutput::from(v.as_str()),
        })
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Integer(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Real(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

/// Sort direction, applied to the whole `order.by` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl Direction {
    fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub by: Vec<String>,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    pub position: u64,
    pub count: u64,
}

/// Structured description of optional WHERE equality terms, an ORDER BY
/// clause and a LIMIT window. This is the only way callers restrict
/// queries; column names are structural identifiers chosen by the caller,
/// values are always bound as parameters.
///
/// Wire shape (all fields optional):
/// `{"where": {col: value}, "order": {"by": [col], "direction": "ASC"},
///   "limit": {"position": 0, "count": 10}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    #[serde(rename = "where", skip_serializing_if = "BTreeMap::is_empty")]
    pub where_: BTreeMap<String, FilterValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
}

impl FilterSpec {
    pub fn new() -> Self {
        FilterSpec::default()
    }

    pub fn where_eq(mut self, column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.where_.insert(column.into(), value.into());
        self
    }

    pub fn order_by<I, S>(mut self, columns: I, direction: Direction) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = Some(Order {
            by: columns.into_iter().map(Into::into).collect(),
            direction,
        });
        self
    }

    pub fn limit(mut self, position: u64, count: u64) -> Self {
        self.limit = Some(Limit { position, count });
        self
    }
}

/// Translated filter: SQL text to append after the FROM clause, plus the
/// named parameters it references.
#[derive(Debug, Clone)]
pub struct SqlFilter {
    pub clause: String,
    pub params: Vec<(String, FilterValue)>,
}

impl SqlFilter {
    /// Borrowed view suitable for rusqlite's named-parameter binding.
    pub fn bindings(&self) -> Vec<(&str, &dyn ToSql)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect()
    }
}

/// Translates a filter into clause text and bound parameters, in strict
/// order: a `WHERE 1=1` anchor with one `AND col = :col` term per entry
/// (present only when `where` is non-empty), then `ORDER BY`, then `LIMIT
/// position, count`. `qualifier` prefixes the WHERE column names with a
/// table name so joined queries stay unambiguous.
pub fn translate(filter: Option<&FilterSpec>, qualifier: Option<&str>) -> SqlFilter {
    let mut clause = String::new();
    let mut params = Vec::new();

    let Some(filter) = filter else {
        return SqlFilter { clause, params };
    };

    if !filter.where_.is_empty() {
        clause.push_str(" WHERE 1=1");
        for (column, value) in &filter.where_ {
            match qualifier {
                Some(table) => {
                    let _ = write!(clause, " AND {table}.{column} = :{column}");
                }
                None => {
                    let _ = write!(clause, " AND {column} = :{column}");
                }
            }
            params.push((format!(":{column}"), value.clone()));
        }
    }

    if let Some(order) = &filter.order {
        if !order.by.is_empty() {
            let _ = write!(
                clause,
                " ORDER BY {} {}",
                order.by.join(", "),
                order.direction.as_sql()
            );
        }
    }

    if let Some(limit) = &filter.limit {
        let _ = write!(clause, " LIMIT {}, {}", limit.position, limit.count);
    }

    SqlFilter { clause, params }
}
