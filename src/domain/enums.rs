use serde::{Deserialize, Serialize};

/// Weekday label used for display grouping, ordered Saturday-first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sat,
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Weekday {
    /// Fixed grid order (weeks run Saturday..Friday)
    pub const ORDER: [Weekday; 7] = [
        Weekday::Sat,
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    /// Parse the lowercase short label, e.g. "mon"
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "sat" => Some(Self::Sat),
            "sun" => Some(Self::Sun),
            "mon" => Some(Self::Mon),
            "tue" => Some(Self::Tue),
            "wed" => Some(Self::Wed),
            "thu" => Some(Self::Thu),
            "fri" => Some(Self::Fri),
            _ => None,
        }
    }

    /// Lowercase short label, e.g. "mon"
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Sat => "sat",
            Self::Sun => "sun",
            Self::Mon => "mon",
            Self::Tue => "tue",
            Self::Wed => "wed",
            Self::Thu => "thu",
            Self::Fri => "fri",
        }
    }

    /// Capitalized short name for headers, e.g. "Mon"
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Sat => "Sat",
            Self::Sun => "Sun",
            Self::Mon => "Mon",
            Self::Tue => "Tue",
            Self::Wed => "Wed",
            Self::Thu => "Thu",
            Self::Fri => "Fri",
        }
    }

    /// Full name, e.g. "Monday"
    pub fn full_name(&self) -> &'static str {
        match self {
            Self::Sat => "Saturday",
            Self::Sun => "Sunday",
            Self::Mon => "Monday",
            Self::Tue => "Tuesday",
            Self::Wed => "Wednesday",
            Self::Thu => "Thursday",
            Self::Fri => "Friday",
        }
    }

    /// Position within the Saturday-first grid order
    pub fn index(&self) -> usize {
        match self {
            Self::Sat => 0,
            Self::Sun => 1,
            Self::Mon => 2,
            Self::Tue => 3,
            Self::Wed => 4,
            Self::Thu => 5,
            Self::Fri => 6,
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    /// Add/edit form open (task, event, or template)
    Form,
    /// Confirm clearing every task on the cursor day
    ConfirmClearDay,
    /// Confirm clearing all tasks
    ConfirmClearAll,
    /// Shown when midnight has passed, forces restart
    DayChanged,
}

/// Which pane owns the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Grid,
    Templates,
    Events,
}

impl Focus {
    /// Cycle Grid -> Templates -> Events -> Grid
    pub fn next(&self) -> Self {
        match self {
            Self::Grid => Self::Templates,
            Self::Templates => Self::Events,
            Self::Events => Self::Grid,
        }
    }
}
