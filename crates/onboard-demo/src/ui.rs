#![forbid(unsafe_code)]

//! Inline rendering of the form: one line per field, the gated submit
//! control, a status line, and the raw response dump.

use std::io::{self, Write};

use crossterm::cursor::{MoveTo, MoveToNextLine};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use onboard::{FieldDef, FieldKind, FieldValue, SubmitPhase};

use crate::app::App;

pub fn draw(app: &App, out: &mut impl Write) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        Print("New user onboarding"),
        SetAttribute(Attribute::Reset),
        MoveToNextLine(2)
    )?;

    let controller = app.session().controller();
    for (index, def) in controller.schema().fields().iter().enumerate() {
        draw_field(out, app, def, index == app.focus())?;
    }

    queue!(out, MoveToNextLine(1))?;
    draw_submit_control(out, app)?;
    queue!(out, MoveToNextLine(2))?;

    if app.session().phase() == SubmitPhase::Sending {
        queue!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print("Sending…"),
            ResetColor,
            MoveToNextLine(1)
        )?;
    }

    queue!(
        out,
        SetForegroundColor(Color::DarkGrey),
        Print(app.status()),
        ResetColor,
        MoveToNextLine(2)
    )?;

    if let Some(record) = app.session().record() {
        queue!(
            out,
            SetAttribute(Attribute::Bold),
            Print("Response"),
            SetAttribute(Attribute::Reset),
            MoveToNextLine(1)
        )?;
        let dump = serde_json::to_string_pretty(record).unwrap_or_default();
        for line in dump.lines() {
            queue!(
                out,
                SetForegroundColor(Color::DarkGrey),
                Print(line),
                ResetColor,
                MoveToNextLine(1)
            )?;
        }
    }

    out.flush()
}

fn draw_field(out: &mut impl Write, app: &App, def: &FieldDef, focused: bool) -> io::Result<()> {
    let marker = if focused { "› " } else { "  " };
    queue!(out, Print(marker))?;

    let controller = app.session().controller();
    let value = controller.value(def.name());

    if def.kind() == FieldKind::Checkbox {
        let checked = value.and_then(FieldValue::as_flag).unwrap_or(false);
        let indicator = if checked { "[x]" } else { "[ ]" };
        queue!(out, Print(indicator), Print(" "), Print(def.display_label()))?;
    } else {
        let text = value.and_then(FieldValue::as_text).unwrap_or("");
        queue!(out, Print(format!("{:<8}: ", def.display_label())))?;
        if text.is_empty() {
            let ghost = match def.kind() {
                FieldKind::Select | FieldKind::RadioGroup => "(not set)",
                _ => def.placeholder_text().unwrap_or(""),
            };
            queue!(out, SetForegroundColor(Color::DarkGrey), Print(ghost), ResetColor)?;
        } else if def.kind() == FieldKind::Password {
            queue!(out, Print("*".repeat(text.chars().count())))?;
        } else if focused && matches!(def.kind(), FieldKind::Select | FieldKind::RadioGroup) {
            queue!(out, Print(format!("< {text} >")))?;
        } else {
            queue!(out, Print(text))?;
        }
    }

    let error = controller.error(def.name());
    if !error.is_empty() {
        queue!(
            out,
            SetForegroundColor(Color::Red),
            Print(format!("  ← {error}")),
            ResetColor
        )?;
    }

    queue!(out, MoveToNextLine(1))
}

fn draw_submit_control(out: &mut impl Write, app: &App) -> io::Result<()> {
    let focused = app.focus() == app.session().controller().schema().len();
    let enabled = app.session().controller().submit_enabled();
    let marker = if focused { "› " } else { "  " };

    queue!(out, Print(marker))?;
    if enabled {
        queue!(
            out,
            SetForegroundColor(Color::Green),
            Print("[ Submit! ]"),
            ResetColor
        )
    } else {
        queue!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print("[ Submit! ] (complete the form to enable)"),
            ResetColor
        )
    }
}
