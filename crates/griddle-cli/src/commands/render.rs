//! Render command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use tracing::debug;

use griddle_core::{
    Headers, JsonRecord, OrderBy, Page, Record, RenderRequest, Row, SearchFields, SearchPolicy,
    TableView,
};
use griddle_mem::MemRepository;

use crate::output;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to a JSON array or JSON-lines data file
    pub file: PathBuf,

    /// Column to display: 'field' or 'Label=field' (repeatable)
    #[arg(short = 'c', long = "column", required = true)]
    pub column: Vec<String>,

    /// Free-text search term
    #[arg(long)]
    pub search: Option<String>,

    /// Field eligible for free-text search (repeatable)
    #[arg(long = "search-by")]
    pub search_by: Vec<String>,

    /// Fail instead of ignoring a search term when no search fields are declared
    #[arg(long)]
    pub strict_search: bool,

    /// Exact-match filter 'field=value' (repeatable, AND-combined)
    #[arg(long = "filter")]
    pub filter: Vec<String>,

    /// Field to order by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort in descending order
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// 1-based page number
    #[arg(long, requires = "page_size")]
    pub page: Option<u32>,

    /// Records per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Print the result payload as compact JSON
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    /// Print the result payload as pretty JSON
    #[arg(long)]
    pub pretty: bool,
}

/// One displayed column: a header label and the record field it reads.
struct Column {
    label: String,
    field: String,
}

fn parse_column(spec: &str) -> Column {
    match spec.split_once('=') {
        Some((label, field)) => Column {
            label: label.trim().to_string(),
            field: field.trim().to_string(),
        },
        None => Column {
            label: spec.trim().to_string(),
            field: spec.trim().to_string(),
        },
    }
}

/// Table view over a loaded JSON data file.
struct FileView {
    repository: MemRepository<JsonRecord>,
    columns: Vec<Column>,
    search_by: SearchFields,
}

impl TableView for FileView {
    type Record = JsonRecord;
    type Repository = MemRepository<JsonRecord>;

    fn repository(&self) -> griddle_core::Result<Self::Repository> {
        Ok(self.repository.clone())
    }

    fn headers(&self) -> Headers {
        Headers::new(self.columns.iter().map(|c| c.label.as_str()))
    }

    fn row(&self, record: &JsonRecord) -> Row {
        Row::new(self.columns.iter().map(|c| {
            record
                .field(&c.field)
                .map(|v| v.into_owned())
                .unwrap_or_default()
        }))
    }

    fn search_by(&self) -> SearchFields {
        self.search_by.clone()
    }
}

fn build_request(args: &RenderArgs) -> Result<RenderRequest> {
    let mut request = RenderRequest::new();

    if let Some(term) = &args.search {
        request = request.with_search(term);
    }
    if args.strict_search {
        request = request.with_search_policy(SearchPolicy::Reject);
    }
    for spec in &args.filter {
        let (field, value) = spec
            .split_once('=')
            .with_context(|| format!("Invalid filter '{spec}', expected 'field=value'"))?;
        request = request.with_filter(field, value);
    }
    if let Some(field) = &args.sort {
        request = request.with_order(if args.desc {
            OrderBy::descending(field)
        } else {
            OrderBy::ascending(field)
        });
    }
    if let Some(size) = args.page_size {
        let page = Page::new(args.page.unwrap_or(1), size).context("Invalid pagination")?;
        request = request.with_page(page);
    }

    Ok(request)
}

pub async fn run(args: RenderArgs) -> Result<()> {
    debug!(file = %args.file.display(), "loading data file");
    let repository = MemRepository::from_json_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let columns: Vec<Column> = args.column.iter().map(|s| parse_column(s)).collect();
    if columns.iter().any(|c| c.label.is_empty() || c.field.is_empty()) {
        bail!("Column specs must be 'field' or 'Label=field'");
    }

    let view = FileView {
        repository,
        columns,
        search_by: SearchFields::new(args.search_by.iter().map(String::as_str)),
    };

    let request = build_request(&args)?;
    let table = view.render(&request).await.context("Render failed")?;

    if args.json {
        output::json(&table)?;
    } else if args.pretty {
        output::json_pretty(&table)?;
    } else if table.rows.is_empty() {
        eprintln!("{}", "No rows.".dimmed());
    } else {
        output::table(&table);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_column_spec_uses_the_field_as_label() {
        let column = parse_column("email");
        assert_eq!(column.label, "email");
        assert_eq!(column.field, "email");
    }

    #[test]
    fn labeled_column_spec_splits_on_equals() {
        let column = parse_column("E-mail=email");
        assert_eq!(column.label, "E-mail");
        assert_eq!(column.field, "email");
    }
}
