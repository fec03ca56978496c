//! Text encoding
//!
//! ```text
//! <universe_size>
//! <num_lists>
//! <term> <doc_id> <doc_id> ...
//! ```

use std::io::{BufRead, Write};

use derivative::Derivative;
use log::{debug, info};

use crate::{
    base::TermId,
    error::{Error, Result},
    index::InvertedIndex,
};

pub fn write_text<W: Write>(index: &InvertedIndex, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", index.universe_size())?;
    writeln!(writer, "{}", index.num_lists())?;
    for (term, list) in index.iter() {
        writeln!(writer, "{} {}", term, list)?;
    }
    writer.flush()?;
    Ok(())
}

fn malformed(line: usize, reason: impl Into<String>) -> Error {
    Error::MalformedArtifact {
        line,
        reason: reason.into(),
    }
}

fn parse_number<T: std::str::FromStr>(token: &str, line: usize, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| malformed(line, format!("invalid {} {:?}", what, token)))
}

fn read_header_line<R: BufRead>(
    lines: &mut std::io::Lines<R>,
    line: usize,
    what: &str,
) -> Result<u32> {
    match lines.next() {
        Some(text) => parse_number(text?.trim(), line, what),
        None => Err(malformed(line, format!("missing {}", what))),
    }
}

#[derive(Derivative, Clone, Debug)]
#[derivative(Default)]
pub struct TextOptions {
    /// Sort the document IDs of each line before checking them
    #[derivative(Default(value = "false"))]
    pub sort: bool,
}

/// Decodes a text artifact
///
/// The term may be followed by a colon (`<term>: <doc_id> ...`).
pub fn read_text<R: BufRead>(reader: R) -> Result<InvertedIndex> {
    read_text_with(reader, &TextOptions::default())
}

/// Decodes a text artifact with the given options
pub fn read_text_with<R: BufRead>(reader: R, options: &TextOptions) -> Result<InvertedIndex> {
    let mut lines = reader.lines();

    let universe_size: TermId = read_header_line(&mut lines, 1, "universe size")?;
    let num_lists = read_header_line(&mut lines, 2, "number of lists")?;
    info!("universe size: {}, num lists: {}", universe_size, num_lists);

    let mut index = InvertedIndex::new(universe_size);
    let mut blank_lines = 0;
    for (ix, text) in lines.enumerate() {
        let line = ix + 3;
        let text = text?;
        let mut tokens = text.split_whitespace();

        let term_token = match tokens.next() {
            Some(token) => token,
            None => {
                blank_lines += 1;
                continue;
            }
        };
        if blank_lines > 0 {
            return Err(malformed(line - 1, "blank line between posting lists"));
        }
        if index.num_lists() == num_lists as usize {
            return Err(malformed(
                line,
                format!("more posting lists than the {} announced", num_lists),
            ));
        }

        let term_token = term_token.strip_suffix(':').unwrap_or(term_token);
        let term: TermId = parse_number(term_token, line, "term")?;
        let mut docs = tokens
            .map(|token| parse_number(token, line, "document ID"))
            .collect::<Result<Vec<_>>>()?;
        if options.sort && !docs.windows(2).all(|w| w[0] <= w[1]) {
            debug!("sorting the posting list of term {}", term);
            docs.sort_unstable();
        }

        index
            .insert(term, docs)
            .map_err(|violation| malformed(line, violation.to_string()))?;
    }

    if index.num_lists() != num_lists as usize {
        return Err(malformed(
            index.num_lists() + 3 + blank_lines,
            format!(
                "{} posting lists announced, {} found",
                num_lists,
                index.num_lists()
            ),
        ));
    }
    Ok(index)
}
