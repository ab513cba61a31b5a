//! In-memory WCNF / DIMACS ingestion.
//!
//! Accepts the text of a `p wcnf` or `p cnf` instance and produces a
//! validated [`ClauseSet`]. Reading the text from disk is left to the caller.
//!
//! ```text
//! c comment
//! p wcnf 3 2
//! 1 1 -2 0
//! 4 -1 3 0
//! ```
//!
//! In `wcnf` instances every clause line starts with its weight; in `cnf`
//! instances clause lines hold literals only and every weight is `1.0`.
//! An optional fifth header field (the hard-clause `top` weight) is
//! accepted and ignored.

use super::types::{Clause, ClauseSet, Literal};
use crate::error::{MaxSatError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Cnf,
    Wcnf,
}

struct Header {
    format: Format,
    num_variables: usize,
    num_clauses: usize,
}

fn malformed(line: usize, reason: impl Into<String>) -> MaxSatError {
    MaxSatError::MalformedClause {
        position: line,
        reason: reason.into(),
    }
}

fn parse_header(line_no: usize, line: &str) -> Result<Header> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(malformed(line_no, "header needs `p <format> <vars> <clauses>`"));
    }
    let format = match parts[1] {
        "cnf" => Format::Cnf,
        "wcnf" => Format::Wcnf,
        other => return Err(malformed(line_no, format!("unknown format `{other}`"))),
    };
    let num_variables = parts[2]
        .parse()
        .map_err(|_| malformed(line_no, format!("invalid variable count `{}`", parts[2])))?;
    let num_clauses = parts[3]
        .parse()
        .map_err(|_| malformed(line_no, format!("invalid clause count `{}`", parts[3])))?;
    Ok(Header {
        format,
        num_variables,
        num_clauses,
    })
}

fn parse_clause(line_no: usize, line: &str, format: Format) -> Result<Clause> {
    let mut tokens = line.split_whitespace();

    let weight = match format {
        Format::Cnf => 1.0,
        Format::Wcnf => {
            let token = tokens
                .next()
                .ok_or_else(|| malformed(line_no, "missing clause weight"))?;
            token
                .parse::<f64>()
                .map_err(|_| malformed(line_no, format!("invalid weight `{token}`")))?
        }
    };

    let mut literals: Vec<Literal> = Vec::new();
    let mut terminated = false;
    for token in tokens {
        if terminated {
            return Err(malformed(line_no, "tokens after the terminating 0"));
        }
        let literal: Literal = token
            .parse()
            .map_err(|_| malformed(line_no, format!("invalid literal `{token}`")))?;
        if literal == 0 {
            terminated = true;
        } else {
            literals.push(literal);
        }
    }

    if !terminated {
        return Err(malformed(line_no, "clause is not terminated by 0"));
    }
    if literals.is_empty() {
        return Err(malformed(line_no, "clause has no literals"));
    }
    Ok(Clause::weighted(literals, weight))
}

/// Parses WCNF (or plain CNF) text into a [`ClauseSet`].
///
/// `weighted` selects whether the resulting set reports clause weights;
/// weights are parsed either way.
///
/// # Errors
/// [`MaxSatError::MalformedClause`] for a missing or invalid header, a
/// clause line before the header, an unterminated or empty clause, an
/// unparsable token, or a clause count that disagrees with the header;
/// [`MaxSatError::LiteralOutOfRange`] for literals beyond the declared
/// variable count.
pub fn parse_wcnf(text: &str, weighted: bool) -> Result<ClauseSet> {
    let mut header: Option<Header> = None;
    let mut clauses = Vec::new();
    let mut last_line = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        // Some benchmark archives close the clause list with a `%` line.
        if line.starts_with('%') {
            break;
        }
        if line.starts_with('p') {
            if header.is_some() {
                return Err(malformed(line_no, "duplicate header"));
            }
            header = Some(parse_header(line_no, line)?);
            continue;
        }

        let format = header
            .as_ref()
            .map(|h| h.format)
            .ok_or_else(|| malformed(line_no, "clause before the `p` header"))?;
        clauses.push(parse_clause(line_no, line, format)?);
    }

    let header = header.ok_or_else(|| malformed(last_line.max(1), "missing `p` header"))?;
    if clauses.len() != header.num_clauses {
        return Err(malformed(
            last_line.max(1),
            format!(
                "header declares {} clauses but {} were found",
                header.num_clauses,
                clauses.len()
            ),
        ));
    }

    ClauseSet::with_weights(header.num_variables, clauses, weighted)
}
