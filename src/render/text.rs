//! Plain-text drawing of the view model, used by the CLI `render` command

use std::fmt;

use super::{Control, FieldView, FormView};

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{field}")?;
        }
        if let Some(label) = &self.submit_button {
            if !self.fields.is_empty() {
                writeln!(f)?;
            }
            writeln!(f, "[ {label} ]")?;
        }
        Ok(())
    }
}

impl fmt::Display for FieldView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.required {
            write!(f, " (Required)")?;
        }
        writeln!(f, " <{}>", self.type_badge)?;

        if let Some(description) = &self.description {
            writeln!(f, "  {description}")?;
        }

        write_control(f, &self.control)?;

        if let Some(error) = &self.error {
            writeln!(f, "  ! {error}")?;
        }
        if let Some(default) = &self.default_hint {
            writeln!(f, "  default: {default}")?;
        }
        Ok(())
    }
}

fn write_control(f: &mut fmt::Formatter<'_>, control: &Control) -> fmt::Result {
    match control {
        Control::Select { options, selected } => {
            for option in options {
                let mark = if option == selected { "(*)" } else { "( )" };
                writeln!(f, "  {mark} {option}")?;
            }
        }
        Control::TextArea { value } => {
            if value.is_empty() {
                writeln!(f, "  |")?;
            }
            for line in value.lines() {
                writeln!(f, "  | {line}")?;
            }
        }
        Control::TextInput { input_type, value } => {
            writeln!(f, "  [{}] {value}", input_type.as_str())?;
        }
        Control::NumberInput {
            value,
            step,
            min,
            max,
        } => {
            let shown = value.map(|v| v.to_string()).unwrap_or_default();
            write!(f, "  [number step={}", step.as_str())?;
            if let Some(min) = min {
                write!(f, " min={min}")?;
            }
            if let Some(max) = max {
                write!(f, " max={max}")?;
            }
            writeln!(f, "] {shown}")?;
        }
        Control::Checkbox { checked, echo } => {
            let mark = if *checked { "[x]" } else { "[ ]" };
            writeln!(f, "  {mark} {echo}")?;
        }
        Control::ArrayList { items, item_type } => {
            for (i, item) in items.iter().enumerate() {
                writeln!(f, "  {i}. [{item_type}] {item}  (remove)")?;
            }
            writeln!(f, "  (+ add item)")?;
        }
        Control::ObjectPlaceholder { message } => {
            writeln!(f, "  {{ {message} }}")?;
        }
    }
    Ok(())
}
