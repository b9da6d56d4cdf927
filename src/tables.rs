//! Console tables

use std::{io, ops::RangeFrom};

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

/// Render a built table with a bold header and right-aligned numeric columns.
pub(crate) fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric_columns: RangeFrom<usize>,
) -> io::Result<()> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric_columns), Alignment::right());

    writeln!(out, "\n{table}")
}

/// Format a width or position for display.
pub(crate) fn format_width(value: f64) -> String {
    format!("{value:.2}")
}
