//! Command: list the registered routines.
use std::fmt::Write as _;

use crate::routines::all_routines;

/// Render one line per registered routine, defaults marked with `*`.
#[must_use]
pub fn render() -> String {
    let routines = all_routines();
    let width = routines.iter().map(|r| r.name().len()).max().unwrap_or(0);
    let mut out = String::new();
    for routine in &routines {
        let marker = if routine.is_default() { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:<width$}  {}",
            routine.name(),
            routine.description()
        );
    }
    out
}

/// Print the routine list to stdout.
pub fn run() {
    print!("{}", render());
}
