pub mod cli;
pub mod profile;
pub mod scan;

use cli::Args;
use profile::Profiler;
use scan::Scanner;

use sruby_names::{Name, NameRef, NameTable, UniqueNameKind};

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;

use std::{fmt, io::Write};

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// What a run did to the name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Identifier tokens found in the source.
    pub tokens: usize,
    /// Distinct names among those tokens.
    pub distinct: usize,
    /// Unique names synthesized by `--desugar`.
    pub synthesized: usize,
    /// Entries in the table, well-known names included.
    pub names: usize,
    /// `hash_names` of the token sequence.
    pub hash: u32,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tokens:      {}", self.tokens)?;
        writeln!(f, "distinct:    {}", self.distinct)?;
        writeln!(f, "synthesized: {}", self.synthesized)?;
        writeln!(f, "table size:  {}", self.names)?;
        write!(f, "hash:        {:#010x}", self.hash)
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Interns every token, in order.
pub fn intern_tokens(table: &mut NameTable, tokens: &[&str]) -> Vec<NameRef> {
    tokens.iter().map(|token| table.intern(token)).collect()
}

/// Synthesizes one [`UniqueNameKind::Desugar`] name per distinct entry of
/// `names`, in order of first appearance.
pub fn desugar(table: &mut NameTable, names: &[NameRef]) -> Vec<NameRef> {
    let mut seen = FxHashSet::default();
    seen.reserve(names.len());
    names
        .iter()
        .filter(|name| seen.insert(**name))
        .map(|&name| table.intern_unique(name, UniqueNameKind::Desugar))
        .collect()
}

/// Writes one line per table entry.
pub fn dump_table<W: Write>(table: &NameTable, writer: &mut W) -> std::io::Result<()> {
    for (name, entry) in table.iter() {
        match entry {
            Name::Raw(_) => writeln!(writer, "{:>6}  raw     {}", name.id(), name.show(table))?,
            Name::Unique(unique) => writeln!(
                writer,
                "{:>6}  unique  {}  <- {}",
                name.id(),
                name.show(table),
                unique.original
            )?,
        }
    }
    Ok(())
}

/// Runs every stage selected by `args` and writes the report to `out`.
pub fn run<W: Write>(args: &Args, profiler: &mut Profiler, out: &mut W) -> Result<Summary> {
    let src = profiler
        .time("Read", || std::fs::read_to_string(&args.path))
        .with_context(|| format!("Failed to read {}", args.path.display()))?;

    let tokens = profiler.time("Scan", || Scanner::new(&src).scan());
    log::info!("scanned {} tokens from {}", tokens.len(), args.path.display());

    let mut table = NameTable::with_capacity(args.capacity);
    let names = profiler.time("Intern", || intern_tokens(&mut table, &tokens));
    let distinct = names.iter().collect::<FxHashSet<_>>().len();

    let synthesized = match args.desugar {
        false => 0,
        true => profiler.time("Desugar", || desugar(&mut table, &names)).len(),
    };

    let hash = profiler.time("Hash", || table.hash_names(&names));
    let summary = Summary {
        tokens: tokens.len(),
        distinct,
        synthesized,
        names: table.len(),
        hash,
    };

    if args.verbose {
        dump_table(&table, out).context("Failed to write name table")?;
    }
    writeln!(out, "{summary}").context("Failed to write summary")?;
    Ok(summary)
}
