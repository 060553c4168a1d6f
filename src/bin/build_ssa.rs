use clap::Parser;
use sparse_suffix_array::{SequenceKind, SparseSuffixArray};
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;

/// Build the sparse suffix array of a DNA or protein sequence.
#[derive(Debug, Parser)]
#[command(name = "build_ssa", version)]
struct Args {
    /// Sparseness factor: index only the suffixes starting at multiples
    /// of this stride.
    #[arg(short = 's', long = "sparseness")]
    sparseness: u32,

    /// Treat the input as DNA; the default is protein, which folds
    /// leucine into isoleucine.
    #[arg(short = 'd', long)]
    dna: bool,

    /// Write the bit-packed output format instead of raw 64-bit entries.
    #[arg(short = 'c', long)]
    compressed: bool,

    /// Build the full suffix array and subsample it (reference mode).
    #[arg(short = 'u', long)]
    unoptimized: bool,

    /// Input sequence file, read as raw bytes.
    input: PathBuf,

    /// Output file.
    output: PathBuf,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("build_ssa: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let kind = if args.dna {
        SequenceKind::Dna
    } else {
        SequenceKind::Protein
    };

    let text = std::fs::read(&args.input)?;
    let ssa = if args.unoptimized {
        SparseSuffixArray::build_unoptimized(&text[..], args.sparseness, kind)?
    } else {
        SparseSuffixArray::build(&text[..], args.sparseness, kind)?
    };

    let mut out = BufWriter::new(File::create(&args.output)?);
    if args.compressed {
        ssa.dump_packed(&mut out)?;
    } else {
        ssa.dump_raw(&mut out)?;
    }
    out.flush()?;
    Ok(())
}
