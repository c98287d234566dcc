//! Result list of the search pager.

use serde::{Deserialize, Serialize};

/// Pages holding this many hits or more are labelled "100+".
pub const RESULT_COUNT_CAP: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hit {
    pub url: String,
    pub search_name: String,
    #[serde(default)]
    pub show_console: bool,
    #[serde(default)]
    pub best_fragments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Prev,
    Next,
}

/// One page of hits plus the pager's position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultsPage {
    pub hits: Vec<Hit>,
    pub is_first_page: bool,
    pub is_last_page: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultsView {
    pub count_label: String,
    pub rows: Vec<ResultRow>,
    pub prev_visible: bool,
    pub next_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub title: String,
    pub url: String,
    /// Console excerpts, only for hits that ask for them.
    pub fragments: Vec<String>,
}

pub fn render_results(page: &ResultsPage) -> ResultsView {
    let count = if page.hits.len() >= RESULT_COUNT_CAP {
        format!("{}+", page.hits.len())
    } else {
        page.hits.len().to_string()
    };

    let rows = page
        .hits
        .iter()
        .map(|hit| ResultRow {
            title: hit.search_name.clone(),
            url: hit.url.clone(),
            fragments: if hit.show_console {
                hit.best_fragments
                    .iter()
                    .map(|fragment| normalize_line_endings(fragment))
                    .collect()
            } else {
                Vec::new()
            },
        })
        .collect();

    ResultsView {
        count_label: format!("The number of results: {count}"),
        rows,
        prev_visible: !page.is_first_page,
        next_visible: !page.is_last_page,
    }
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
