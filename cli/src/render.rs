use std::io::{self, Write};

use sapper_core::{BoardSnapshot, CellView, GameReport, Outcome, Phase};

pub fn glyph(view: CellView) -> char {
    match view {
        CellView::Closed => '.',
        CellView::Flagged => 'F',
        CellView::Open(0) => ' ',
        CellView::Open(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        CellView::Detonated => '@',
        CellView::CorrectFlag => '+',
        CellView::WrongFlag => 'x',
        CellView::ExposedMine => '*',
    }
}

/// Grid with 1-indexed row and column headers.
pub fn board(out: &mut impl Write, snapshot: &BoardSnapshot) -> io::Result<()> {
    write!(out, "   ")?;
    for col in 1..=snapshot.columns {
        write!(out, "{col:>3}")?;
    }
    writeln!(out)?;

    for row in 1..=snapshot.rows {
        write!(out, "{row:>3}")?;
        for col in 1..=snapshot.columns {
            write!(out, "{:>3}", glyph(snapshot.cell((row, col))))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Pending => "ready",
        Phase::Active => "playing",
        Phase::Won => "won",
        Phase::Lost => "lost",
    }
}

/// Prompt line, redrawn in place on every timer tick.
pub fn status(out: &mut impl Write, snapshot: &BoardSnapshot, elapsed_secs: u64) -> io::Result<()> {
    write!(
        out,
        "\r[{}] time: {}  flags: {}  ({}) > ",
        snapshot.difficulty,
        elapsed_secs,
        snapshot.remaining_flags,
        phase_label(snapshot.phase)
    )?;
    out.flush()
}

pub fn report(out: &mut impl Write, report: &GameReport) -> io::Result<()> {
    let headline = match report.result.outcome {
        Outcome::Win => "You won!",
        Outcome::Lose => "Boom, you lost.",
    };
    let best = match report.best_time {
        Some(best) => format!("{best:.0}"),
        None => "-".to_owned(),
    };
    writeln!(out, "{headline}")?;
    writeln!(
        out,
        "Your time: {:.0}  Best time: {}{}",
        report.result.elapsed_secs,
        best,
        if report.new_best { " (new record)" } else { "" }
    )?;
    writeln!(out, "Type `n` to play again.")
}
