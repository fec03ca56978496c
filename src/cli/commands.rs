//! Command implementations.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::info;

use crate::{
    builder::{build_from_reader, BuilderOptions},
    cli::args::*,
    documents::{reconstruct_documents, write_documents},
    error::Result,
    remap::remap_lines,
    select::TopKSelector,
    serialize::{read_binary, read_text_with, write_binary, write_text, TextOptions},
    stats::compute_statistics,
    utils::{
        buffer::open_buffer,
        cursor::{IndexCursor, ReaderCursor},
    },
};

/// Execute a CLI command.
pub fn execute_command(args: &PostingIndexArgs) -> Result<()> {
    match &args.command {
        Command::Build(build_args) => build(build_args, args),
        Command::TopK(top_k_args) => top_k(top_k_args, args),
        Command::Serialize(serialize_args) => serialize(serialize_args),
        Command::Dump(dump_args) => dump(dump_args),
        Command::Documents(documents_args) => documents(documents_args, args),
        Command::Stats(stats_args) => stats(stats_args, args),
        Command::Remap(remap_args) => remap(remap_args),
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if is_stdin(path) {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Runs `f` over a cursor on a binary artifact
///
/// Files are memory mapped unless `stream` is set; stdin is always streamed.
fn with_cursor<T>(
    path: &Path,
    stream: bool,
    f: impl FnOnce(&mut dyn IndexCursor) -> Result<T>,
) -> Result<T> {
    if stream || is_stdin(path) {
        let reader: Box<dyn Read> = if is_stdin(path) {
            Box::new(io::stdin().lock())
        } else {
            Box::new(BufReader::new(File::open(path)?))
        };
        f(&mut ReaderCursor::new(reader))
    } else {
        let buffer = open_buffer(path, false)?;
        f(&mut buffer.cursor())
    }
}

fn build(args: &BuildArgs, cli_args: &PostingIndexArgs) -> Result<()> {
    info!("input file: {}", args.input.display());
    let options = BuilderOptions {
        universe_size: args.universe_size,
        progress: cli_args.progress,
        ..Default::default()
    };
    let index = build_from_reader(open_input(&args.input)?, &options)?;

    let mut output = open_output(args.output.as_deref())?;
    match args.format {
        IndexFormat::Text => write_text(&index, &mut output),
        IndexFormat::Binary => write_binary(&index, &mut output).map(|_| ()),
    }
}

fn top_k(args: &TopKArgs, cli_args: &PostingIndexArgs) -> Result<()> {
    let selector = TopKSelector::new(args.k)?.with_progress(cli_args.progress);
    let selection = with_cursor(&args.index, args.stream, |cursor| selector.select(cursor))?;

    let mut output = open_output(None)?;
    for list in selection.lists.iter() {
        writeln!(output, "{}", list)?;
    }
    output.flush()?;
    Ok(())
}

fn serialize(args: &SerializeArgs) -> Result<()> {
    info!("input file: {}", args.input.display());
    info!("output file: {}", args.output.display());
    let options = TextOptions { sort: args.sort };
    let index = read_text_with(open_input(&args.input)?, &options)?;
    write_binary(&index, &mut open_output(Some(args.output.as_path()))?)?;
    Ok(())
}

fn dump(args: &DumpArgs) -> Result<()> {
    let index = with_cursor(&args.index, false, |cursor| read_binary(cursor))?;
    write_text(&index, &mut open_output(None)?)
}

fn documents(args: &DocumentsArgs, cli_args: &PostingIndexArgs) -> Result<()> {
    let documents = with_cursor(&args.index, false, |cursor| {
        reconstruct_documents(cursor, args.num_documents, cli_args.progress)
    })?;
    write_documents(&documents, args.with_ids, &mut open_output(None)?)
}

fn stats(args: &StatsArgs, cli_args: &PostingIndexArgs) -> Result<()> {
    let stats = with_cursor(&args.index, false, |cursor| {
        compute_statistics(cursor, cli_args.progress)
    })?;

    let mut output = open_output(None)?;
    serde_json::to_writer_pretty(&mut output, &stats).map_err(io::Error::from)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn remap(args: &RemapArgs) -> Result<()> {
    remap_lines(open_input(&args.input)?, &mut open_output(None)?)?;
    Ok(())
}
