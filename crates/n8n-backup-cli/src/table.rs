use std::io::IsTerminal;

use comfy_table::{presets::NOTHING, Attribute, Cell, Table};

/// Borderless tables for `list` and `info`. Labels are bold only when
/// stdout is a terminal and `NO_COLOR` is unset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TableStyle {
    bold_labels: bool,
}

impl TableStyle {
    pub(crate) fn for_stdout() -> Self {
        Self::new(
            std::io::stdout().is_terminal(),
            std::env::var_os("NO_COLOR").is_some(),
        )
    }

    fn new(is_tty: bool, no_color: bool) -> Self {
        Self {
            bold_labels: is_tty && !no_color,
        }
    }

    fn label(self, text: &str) -> Cell {
        let cell = Cell::new(text);
        if self.bold_labels {
            cell.add_attribute(Attribute::Bold)
        } else {
            cell
        }
    }

    /// Table with one header row; callers add the data rows.
    pub(crate) fn with_header(self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(NOTHING);
        table.set_header(headers.iter().map(|h| self.label(h)).collect::<Vec<_>>());
        table
    }

    /// Two-column field/value table.
    pub(crate) fn fields(self, rows: &[(&str, String)]) -> Table {
        let mut table = Table::new();
        table.load_preset(NOTHING);
        for (field, value) in rows {
            table.add_row(vec![self.label(field), Cell::new(value)]);
        }
        table
    }
}
