// Text report of an election, for the terminal.

use std::fmt::Write;

use ranked_pairs::ElectionResult;

pub const NO_WINNER: &str = "No clear winner (tie or cycle in preferences)";

pub fn text_report(candidates: &[String], result: &ElectionResult) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, candidates, result);
    out
}

fn write_report(out: &mut String, candidates: &[String], result: &ElectionResult) -> std::fmt::Result {
    let width = candidates
        .iter()
        .map(|c| c.chars().count())
        .chain(result.preferences.rows().iter().flatten().map(|c| c.to_string().len()))
        .max()
        .unwrap_or(1);

    writeln!(out, "Preferences matrix (rows preferred over columns)")?;
    write!(out, "{:width$}", "", width = width)?;
    for name in candidates.iter() {
        write!(out, "  {:>width$}", name, width = width)?;
    }
    writeln!(out)?;
    for (i, row) in result.preferences.rows().iter().enumerate() {
        write!(out, "{:width$}", candidates[i], width = width)?;
        for (j, count) in row.iter().enumerate() {
            if i == j {
                write!(out, "  {:>width$}", "-", width = width)?;
            } else {
                write!(out, "  {:>width$}", count, width = width)?;
            }
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "Sorted pairs (winner -> loser, strength)")?;
    if result.lock_steps.is_empty() {
        writeln!(out, "  No non-tied pairs.")?;
    }
    for step in result.lock_steps.iter() {
        write!(
            out,
            "  {} -> {} (+{})",
            candidates[step.pair.winner], candidates[step.pair.loser], step.pair.strength
        )?;
        if !step.locked {
            write!(out, " skipped, would create a cycle")?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "Locked graph edges")?;
    let edges = result.locked.edges();
    if edges.is_empty() {
        writeln!(out, "  No edges locked (all pairs rejected or tied).")?;
    }
    for (from, to) in edges.iter() {
        writeln!(out, "  {} -> {}", candidates[*from], candidates[*to])?;
    }

    writeln!(out)?;
    match result.winner {
        Some(cid) => writeln!(out, "Winner: {}", candidates[cid]),
        None => writeln!(out, "Winner: {}", NO_WINNER),
    }
}
