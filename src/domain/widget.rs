// Widget domain models - planner output and resolved render data
use crate::domain::stats::BreakdownEntry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed palette applied by index to multi-slice visuals.
pub const PALETTE: &[&str] = &[
    "rgba(47, 127, 107, 0.75)",
    "rgba(199, 143, 44, 0.7)",
    "rgba(31, 46, 41, 0.6)",
    "rgba(89, 182, 154, 0.7)",
    "rgba(110, 90, 60, 0.6)",
    "rgba(60, 151, 129, 0.7)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Bar,
    Donut,
    List,
    Stat,
}

/// Statistical dimension a widget is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatSource {
    ByCity,
    ByType,
    ByOffice,
    BySentiment,
    ByLanguage,
    VipShare,
    AvgPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// One renderable unit as planned by the intent planner. Never mutated
/// after creation; resolution against a stats snapshot happens separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSpec {
    pub kind: WidgetKind,
    pub source: StatSource,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
}

impl WidgetSpec {
    pub fn new(kind: WidgetKind, source: StatSource, title: impl Into<String>) -> Self {
        Self {
            kind,
            source,
            title: title.into(),
            top_n: None,
            orientation: None,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub label: String,
    pub value: u64,
}

impl From<&BreakdownEntry> for ListItem {
    fn from(entry: &BreakdownEntry) -> Self {
        Self {
            label: entry.label.clone(),
            value: entry.count,
        }
    }
}

/// Resolved widget payload, one variant per widget kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WidgetData {
    Bar {
        labels: Vec<String>,
        values: Vec<u64>,
        colors: Vec<String>,
        horizontal: bool,
    },
    Donut {
        labels: Vec<String>,
        values: Vec<u64>,
        colors: Vec<String>,
    },
    List {
        items: Vec<ListItem>,
    },
    Stat {
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        helper: Option<String>,
    },
}

/// A widget bound to data, ready for the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetView {
    pub id: Uuid,
    pub source: StatSource,
    pub title: String,
    #[serde(flatten)]
    pub data: WidgetData,
}

impl WidgetView {
    pub fn new(source: StatSource, title: impl Into<String>, data: WidgetData) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            title: title.into(),
            data,
        }
    }
}
