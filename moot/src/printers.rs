/*!
Plain-text help rendering for the runtime [`Parser`]. Deliberately minimal:
a description, a synopsis line, and the options and commands of one scope.
*/

use std::fmt::{self, Write as _};

use indent_write::fmt::IndentWriter;
use lazy_format::lazy_format;
use textwrap::fill;

use crate::parser::Parser;
use crate::registry::{Action, Registration};

const WIDTH: usize = 76;

pub(crate) fn render_help(parser: &Parser) -> String {
    let mut out = String::new();
    // Writing into a String can't fail; discard the fmt plumbing result.
    let _ = write_help(&mut out, parser);
    out
}

fn write_help(out: &mut String, parser: &Parser) -> fmt::Result {
    if let Some(description) = parser.description() {
        writeln!(out, "{}", fill(description, WIDTH))?;
        writeln!(out)?;
    }

    writeln!(out, "Usage:")?;
    {
        let mut line = IndentWriter::new("  ", &mut *out);
        write!(line, "{}", parser.program())?;
        if !parser.registrations().is_empty() {
            write!(line, " [options]")?;
        }
        if !parser.commands().is_empty() {
            write!(line, " <command> [...]")?;
        }
        writeln!(line)?;
    }

    if !parser.registrations().is_empty() {
        writeln!(out)?;
        writeln!(out, "Options:")?;

        for registration in parser.registrations() {
            write_option(out, registration)?;
        }
    }

    if !parser.commands().is_empty() {
        writeln!(out)?;
        writeln!(out, "Commands:")?;

        for (name, command) in parser.commands() {
            let mut line = IndentWriter::new("  ", &mut *out);
            match command.description() {
                Some(help) => writeln!(line, "{name}: {help}")?,
                None => writeln!(line, "{name}")?,
            }
        }
    }

    Ok(())
}

fn write_option(out: &mut String, registration: &Registration) -> fmt::Result {
    let spelling = registration
        .flag
        .strip_prefix("--")
        .unwrap_or(&registration.flag);

    let tag = lazy_format!(match ((&registration.action, registration.metavar.as_deref())) {
        (Action::BoolSwitch, _) => ("--{spelling} | --no-{spelling}", spelling = spelling),
        (Action::StoreMany, Some(metavar)) => (
            "{flag} <{metavar}> [{metavar} ...]",
            flag = registration.flag,
            metavar = metavar,
        ),
        (Action::Store, Some(metavar)) => (
            "{flag} <{metavar}>",
            flag = registration.flag,
            metavar = metavar,
        ),
        (_, _) => ("{flag}", flag = registration.flag),
    });

    writeln!(out, "  {tag}")?;

    if let Some(help) = &registration.help {
        let mut body = IndentWriter::new("      ", &mut *out);
        writeln!(body, "{}", fill(help, WIDTH - 6))?;
    }

    Ok(())
}
