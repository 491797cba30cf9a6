use colored::{Color, Colorize};

use crate::credential::{CredValue, FieldKind, TargetHandle, ValueSet};

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for log::Level {
    fn color(&self) -> Color {
        use log::Level::*;
        match self {
            Error => Color::BrightRed,
            Warn => Color::BrightYellow,
            Info => Color::Cyan,
            Debug => Color::Magenta,
            Trace => Color::Blue,
        }
    }
}

/// One line per field, secrets masked.
pub fn format_values(values: &ValueSet) -> Vec<String> {
    values
        .iter()
        .map(|(field, value)| {
            let shown = match value {
                Some(v) => format_value(*field, v),
                None => "<unset>".dimmed().to_string(),
            };
            format!("  {}: {}", field.as_str().cyan(), shown)
        })
        .collect()
}

fn format_value(field: FieldKind, value: &CredValue) -> String {
    value.masked(field.is_secret())
}

pub fn print_values(handle: &TargetHandle, values: &ValueSet) {
    println!("[{}]", handle.to_string().bold());
    for line in format_values(values) {
        println!("{}", line);
    }
}
