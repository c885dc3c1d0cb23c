//! Query building blocks: comparison operators, filter clauses, sorting and paging
//!
//! Filters are an explicit list of optional clauses joined with AND. They render
//! to a parameterized WHERE fragment; values are never spliced into SQL text.
//! Sort columns come from a closed enum, so request strings never reach SQL.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::Value;
use serde::Serialize;

use crate::error::{InventoryError, Result};

/// Comparison applied to cotton percentage when summing amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    GreaterThan,
    LessThan,
    Equal,
}

impl Operator {
    pub fn sql_symbol(self) -> &'static str {
        match self {
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::Equal => "=",
        }
    }
}

impl FromStr for Operator {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "greaterThan" | "moreThan" => Ok(Operator::GreaterThan),
            "lessThan" => Ok(Operator::LessThan),
            "equal" => Ok(Operator::Equal),
            other => Err(InventoryError::InvalidArgument(format!(
                "Invalid comparison operator: {}",
                other
            ))),
        }
    }
}

/// One conjunct of a filter
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    CottonBetween(f64, f64),
    CottonAtLeast(f64),
    CottonAtMost(f64),
    ColorEquals(String),
}

impl FilterClause {
    fn render(&self, sql: &mut Vec<String>, params: &mut Vec<Value>) {
        match self {
            FilterClause::CottonBetween(min, max) => {
                sql.push("cotton_percentage BETWEEN ? AND ?".to_string());
                params.push(Value::Real(*min));
                params.push(Value::Real(*max));
            }
            FilterClause::CottonAtLeast(min) => {
                sql.push("cotton_percentage >= ?".to_string());
                params.push(Value::Real(*min));
            }
            FilterClause::CottonAtMost(max) => {
                sql.push("cotton_percentage <= ?".to_string());
                params.push(Value::Real(*max));
            }
            FilterClause::ColorEquals(color) => {
                sql.push("color = ?".to_string());
                params.push(Value::Text(color.clone()));
            }
        }
    }
}

/// Optional constraints for the filtered listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SockFilter {
    pub min_cotton: Option<f64>,
    pub max_cotton: Option<f64>,
    pub color: Option<String>,
}

impl SockFilter {
    /// Clauses this filter contributes; empty means "match everything"
    pub fn clauses(&self) -> Vec<FilterClause> {
        let mut clauses = Vec::new();

        match (self.min_cotton, self.max_cotton) {
            (Some(min), Some(max)) => clauses.push(FilterClause::CottonBetween(min, max)),
            (Some(min), None) => clauses.push(FilterClause::CottonAtLeast(min)),
            (None, Some(max)) => clauses.push(FilterClause::CottonAtMost(max)),
            (None, None) => {}
        }

        if let Some(color) = self.color.as_deref().filter(|c| !c.is_empty()) {
            clauses.push(FilterClause::ColorEquals(color.to_string()));
        }

        clauses
    }

    /// Renders the WHERE fragment (including the keyword) and its parameters
    pub fn where_clause(&self) -> (String, Vec<Value>) {
        let mut sql = Vec::new();
        let mut params = Vec::new();
        for clause in self.clauses() {
            clause.render(&mut sql, &mut params);
        }

        if sql.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", sql.join(" AND ")), params)
        }
    }
}

/// Sortable columns of the socks table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Color,
    CottonPercentage,
    Amount,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Color => "color",
            SortField::CottonPercentage => "cotton_percentage",
            SortField::Amount => "amount",
        }
    }
}

impl FromStr for SortField {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "id" => Ok(SortField::Id),
            "color" => Ok(SortField::Color),
            "cottonPercentage" | "cotton_percentage" => Ok(SortField::CottonPercentage),
            "amount" => Ok(SortField::Amount),
            other => Err(InventoryError::InvalidArgument(format!(
                "Unknown sort field: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(InventoryError::InvalidArgument(format!(
                "Invalid sort direction: {} (expected asc or desc)",
                s
            )))
        }
    }
}

/// Zero-based page request with ordering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort_field: SortField,
    direction: SortDirection,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, sort_field: SortField, direction: SortDirection) -> Result<Self> {
        if size == 0 {
            return Err(InventoryError::InvalidArgument(
                "Page size must not be less than one".to_string(),
            ));
        }
        Ok(Self {
            page,
            size,
            sort_field,
            direction,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Always at least one
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// ORDER BY/LIMIT/OFFSET tail; id breaks ties so pages stay stable
    pub fn order_and_limit(&self) -> String {
        let mut sql = format!(
            " ORDER BY {} {}",
            self.sort_field.column(),
            self.direction.keyword()
        );
        if self.sort_field != SortField::Id {
            sql.push_str(", id ASC");
        }
        sql.push_str(" LIMIT ? OFFSET ?");
        sql
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort_field: SortField::CottonPercentage,
            direction: SortDirection::Asc,
        }
    }
}

/// One page of results plus totals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size());
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages: total_elements.div_ceil(size),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::GreaterThan => "greaterThan",
            Operator::LessThan => "lessThan",
            Operator::Equal => "equal",
        };
        f.write_str(name)
    }
}
