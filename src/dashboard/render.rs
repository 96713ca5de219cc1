//! Pure rendering of the dashboard state into a [`View`] tree. The tree is what
//! the frontend shows; `Display` lays it out for a terminal and `Serialize`
//! hands it to anything else.

use super::{
    format::pretty_date,
    records::{value_text, Record},
    state::Dashboard,
};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use std::fmt;

pub const TITLE: &str = "user list";
pub const SEARCH_PLACEHOLDER: &str = "enter user id (e.g., 1)";
pub const LOADING_TEXT: &str = "loading";
pub const EMPTY_STATE: &str = "no data match — try \"fetch all\" or search by id";
/// Shown in name, department and job title cells that have no value.
pub const MISSING: &str = "—";
pub const COLUMNS: [&str; 7] = [
    "id",
    "name",
    "department",
    "job title",
    "dob",
    "created",
    "metadata",
];

/// Actions a control can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserAction {
    Search,
    Clear,
    FetchAll,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: &'static str,
    pub action: UserAction,
}

pub const BUTTONS: [Button; 3] = [
    Button {
        label: "search",
        action: UserAction::Search,
    },
    Button {
        label: "clear users",
        action: UserAction::Clear,
    },
    Button {
        label: "fetch all",
        action: UserAction::FetchAll,
    },
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchControls {
    pub query: String,
    pub placeholder: &'static str,
    pub buttons: [Button; 3],
    pub count_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum StatusLine {
    Hidden,
    Loading,
    Error(String),
}

impl StatusLine {
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            StatusLine::Hidden => String::new(),
            StatusLine::Loading => LOADING_TEXT.to_string(),
            StatusLine::Error(error) => format!("error: {error}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: String,
    pub name: String,
    pub department: String,
    pub job_title: String,
    pub date_of_birth: String,
    pub created_at: String,
    pub metadata: String,
}

impl Row {
    fn cells(&self) -> [&str; 7] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.department.as_str(),
            self.job_title.as_str(),
            self.date_of_birth.as_str(),
            self.created_at.as_str(),
            self.metadata.as_str(),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultsArea {
    Empty {
        message: &'static str,
    },
    Table {
        columns: [&'static str; 7],
        rows: Vec<Row>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct View {
    pub title: &'static str,
    pub search: SearchControls,
    pub status: StatusLine,
    pub results: ResultsArea,
    pub footer: String,
}

/// Renders the dashboard state.
#[must_use]
pub fn render(state: &Dashboard) -> View {
    let results = state.results();

    View {
        title: TITLE,
        search: SearchControls {
            query: state.query().to_string(),
            placeholder: SEARCH_PLACEHOLDER,
            buttons: BUTTONS,
            count_label: count_label(results.len()),
        },
        status: status_line(state),
        results: if results.is_empty() && !state.is_loading() {
            ResultsArea::Empty {
                message: EMPTY_STATE,
            }
        } else {
            ResultsArea::Table {
                columns: COLUMNS,
                rows: results.iter().map(row).collect(),
            }
        },
        footer: format!(
            "{} {} ({})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            crate::GIT_COMMIT_HASH
        ),
    }
}

fn count_label(count: usize) -> String {
    if count == 0 {
        String::new()
    } else {
        format!("{count} result(s)")
    }
}

fn status_line(state: &Dashboard) -> StatusLine {
    if state.is_loading() {
        StatusLine::Loading
    } else if state.error().is_empty() {
        StatusLine::Hidden
    } else {
        StatusLine::Error(state.error().to_string())
    }
}

/// Builds one table row. Name joins first and last name, skipping missing
/// parts; the metadata cell lists every field the record carries.
#[must_use]
pub fn row(record: &Record) -> Row {
    let name = ["first_name", "last_name"]
        .iter()
        .map(|key| value_text(record.get(key)))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let metadata = record
        .fields()
        .map(|(key, value)| format!("{key}: {}", value_text(Some(value))))
        .collect::<Vec<_>>()
        .join(" | ");

    Row {
        id: value_text(record.id()),
        name: or_missing(name),
        department: or_missing(value_text(record.get("department"))),
        job_title: or_missing(value_text(record.get("job_title"))),
        date_of_birth: pretty_date(record.get("date_of_birth")),
        created_at: pretty_date(record.get("created_at")),
        metadata,
    }
}

fn or_missing(text: String) -> String {
    if text.is_empty() {
        MISSING.to_string()
    } else {
        text
    }
}

impl fmt::Display for View {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "{}", self.title)?;
        writeln!(formatter, "{}", "=".repeat(self.title.chars().count()))?;

        let input = if self.search.query.is_empty() {
            format!("<{}>", self.search.placeholder)
        } else {
            self.search.query.clone()
        };
        let buttons = self
            .search
            .buttons
            .iter()
            .map(|button| format!("[{}]", button.label))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            formatter,
            "search: {input}  {buttons}  {}",
            self.search.count_label
        )?;
        writeln!(formatter, "{}", self.status.text())?;

        match &self.results {
            ResultsArea::Empty { message } => writeln!(formatter, "{message}")?,
            ResultsArea::Table { columns, rows } => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(columns.to_vec());
                for row in rows {
                    table.add_row(row.cells().to_vec());
                }
                writeln!(formatter, "{table}")?;
            }
        }

        write!(formatter, "{}", self.footer)
    }
}
