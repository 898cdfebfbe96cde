pub mod formatter;
pub mod spreadsheet;

pub use formatter::{
    format_breakdown, format_plain, format_scored_table, format_tsv, should_use_colors,
};
pub use spreadsheet::{
    build_spreadsheet, role_columns, save_csv, shape_row, write_csv, Spreadsheet, SpreadsheetRow,
};
