//! Window and ordering parameters for the list operation.
//!
//! The query string speaks in wire field names: an order expression is
//! `<field>` optionally followed by `ASC` or `DESC` (case-insensitive,
//! ascending when omitted). Anything outside the sortable-field whitelist is
//! rejected instead of guessed at.

pub const DEFAULT_LIMIT: u16 = 10;
/// Hard ceiling for a single window; larger requests are capped, not failed.
pub const MAX_LIMIT: u16 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    DueDate,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    const NAMES: [(&'static str, SortField); 5] = [
        ("dueDate", SortField::DueDate),
        ("description", SortField::Description),
        ("status", SortField::Status),
        ("createdAt", SortField::CreatedAt),
        ("updatedAt", SortField::UpdatedAt),
    ];

    fn parse(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(wire, _)| wire.eq_ignore_ascii_case(name))
            .map(|(_, field)| *field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self { field: SortField::DueDate, direction: SortDirection::Ascending }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported order expression `{expression}`")]
pub struct OrderParseError {
    expression: String,
}

/// Fully resolved list parameters: defaults applied, limit capped, order
/// expression parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub offset: u32,
    pub limit: u16,
    pub order: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self { offset: 0, limit: DEFAULT_LIMIT, order: SortOrder::default() }
    }
}

impl ListQuery {
    pub fn new(
        offset: Option<u32>,
        limit: Option<u16>,
        order: Option<&str>,
    ) -> Result<Self, OrderParseError> {
        let order = match order {
            Some(expression) => parse_order(expression)?,
            None => SortOrder::default(),
        };
        Ok(Self {
            offset: offset.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
            order,
        })
    }
}

fn parse_order(expression: &str) -> Result<SortOrder, OrderParseError> {
    let reject = || OrderParseError { expression: expression.to_string() };
    let mut tokens = expression.split_whitespace();
    let field = tokens.next().and_then(SortField::parse).ok_or_else(reject)?;
    let direction = match tokens.next() {
        None => SortDirection::Ascending,
        Some(suffix) if suffix.eq_ignore_ascii_case("ASC") => SortDirection::Ascending,
        Some(suffix) if suffix.eq_ignore_ascii_case("DESC") => SortDirection::Descending,
        Some(_) => return Err(reject()),
    };
    if tokens.next().is_some() {
        return Err(reject());
    }
    Ok(SortOrder { field, direction })
}
