use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing model enums from user input
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unknown category: {0} (expected todo, active, done or cancelled)")]
    Category(String),
    #[error("unknown color: {0}")]
    Color(String),
}

/// One of the four fixed workflow buckets every status belongs to.
///
/// `Done` and `Cancelled` are singleton categories: a collection may hold at
/// most one status in each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Todo,
    Active,
    Done,
    Cancelled,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 4] = [
        Category::Todo,
        Category::Active,
        Category::Done,
        Category::Cancelled,
    ];

    /// Singleton categories allow at most one status at a time
    pub fn is_singleton(self) -> bool {
        matches!(self, Category::Done | Category::Cancelled)
    }

    /// Statuses in these categories count as completed work
    pub fn is_completed(self) -> bool {
        matches!(self, Category::Done | Category::Cancelled)
    }

    /// The default category for newly created tasks
    pub fn is_default(self) -> bool {
        self == Category::Todo
    }

    /// Successor in the tap-to-cycle order: todo → active → done → cancelled → todo
    pub fn successor(self) -> Category {
        match self {
            Category::Todo => Category::Active,
            Category::Active => Category::Done,
            Category::Done => Category::Cancelled,
            Category::Cancelled => Category::Todo,
        }
    }

    /// Human label, capitalized for messages and headers
    pub fn label(self) -> &'static str {
        match self {
            Category::Todo => "Todo",
            Category::Active => "Active",
            Category::Done => "Done",
            Category::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Todo => write!(f, "todo"),
            Category::Active => write!(f, "active"),
            Category::Done => write!(f, "done"),
            Category::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(Category::Todo),
            "active" => Ok(Category::Active),
            "done" => Ok(Category::Done),
            "cancelled" | "canceled" => Ok(Category::Cancelled),
            _ => Err(ParseError::Category(s.to_string())),
        }
    }
}

pub const VALID_CATEGORIES: &[&str] = &["todo", "active", "done", "cancelled"];

/// The fixed color swatch. Status colors are picked from this set, never
/// arbitrary hex values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Swatch {
    Gray,
    Blue,
    Green,
    Red,
    Amber,
    Purple,
    Teal,
    Pink,
    Yellow,
}

impl Swatch {
    /// All swatch entries in picker order
    pub const ALL: [Swatch; 9] = [
        Swatch::Gray,
        Swatch::Blue,
        Swatch::Green,
        Swatch::Red,
        Swatch::Amber,
        Swatch::Purple,
        Swatch::Teal,
        Swatch::Pink,
        Swatch::Yellow,
    ];

    /// The hex value rendered for this swatch entry
    pub fn hex(self) -> &'static str {
        match self {
            Swatch::Gray => "#6B7280",
            Swatch::Blue => "#3B82F6",
            Swatch::Green => "#22C55E",
            Swatch::Red => "#EF4444",
            Swatch::Amber => "#F59E0B",
            Swatch::Purple => "#A855F7",
            Swatch::Teal => "#14B8A6",
            Swatch::Pink => "#EC4899",
            Swatch::Yellow => "#EAB308",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Swatch::Gray => "gray",
            Swatch::Blue => "blue",
            Swatch::Green => "green",
            Swatch::Red => "red",
            Swatch::Amber => "amber",
            Swatch::Purple => "purple",
            Swatch::Teal => "teal",
            Swatch::Pink => "pink",
            Swatch::Yellow => "yellow",
        }
    }

    /// Default swatch entry for a status created in the given category
    pub fn default_for(category: Category) -> Swatch {
        match category {
            Category::Todo => Swatch::Gray,
            Category::Active => Swatch::Blue,
            Category::Done => Swatch::Green,
            Category::Cancelled => Swatch::Red,
        }
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Swatch {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        for swatch in Swatch::ALL {
            if lower == swatch.name() || lower.eq_ignore_ascii_case(swatch.hex()) {
                return Ok(swatch);
            }
        }
        Err(ParseError::Color(s.to_string()))
    }
}

/// A single workflow status.
///
/// `position` is an ordinal within the status's category, recomputed to a
/// dense 0-based sequence on every commit. `is_new` is transient: true until
/// the record has been persisted once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub id: String,
    pub name: String,
    pub color: Swatch,
    pub category: Category,
    pub position: usize,
    #[serde(skip)]
    pub is_new: bool,
}

impl StatusRecord {
    pub fn new(id: String, name: String, color: Swatch, category: Category) -> Self {
        StatusRecord {
            id,
            name,
            color,
            category,
            position: 0,
            is_new: true,
        }
    }

    /// Derived: true iff the status lives in the default (todo) category
    pub fn is_default(&self) -> bool {
        self.category.is_default()
    }

    /// Derived: true iff the status counts as completed (done or cancelled)
    pub fn is_completed(&self) -> bool {
        self.category.is_completed()
    }
}
