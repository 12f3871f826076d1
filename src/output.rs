use std::fmt::Display;

use clap::ValueEnum;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn print<T, F, D>(self, data: &T, render: F) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> D,
        D: Display,
    {
        match self {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
            OutputFormat::Table => println!("{}", render(data)),
        }
        Ok(())
    }

    pub fn print_rows<T, R>(self, data: &T, rows: Vec<R>) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
        R: Tabled,
    {
        self.print(data, |_| rows_table(rows))
    }
}

pub fn rows_table<R: Tabled>(rows: Vec<R>) -> Table {
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table
}

pub fn fields_table<K, V>(fields: Vec<(K, V)>) -> Table
where
    K: Into<String>,
    V: Into<String>,
{
    let mut builder = Builder::default();
    for (key, value) in fields {
        builder.push_record([key.into(), value.into()]);
    }
    let mut table = builder.build();
    table.with(Style::sharp());
    table
}

pub fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_owned()
}

pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => "-".to_owned(),
    }
}
