//! Rank terms in tagged text by NC-value
//!
//! Reads KyTea-style (`surface/tag/reading`) or MeCab-style
//! (`surface\tfeature`, `EOS`) tagger output and prints the best terms, one
//! per line, or as JSON with their scores.

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use rapid_ncvalue::nlp::tagged::{read_kytea, read_mecab};
use rapid_ncvalue::{ExtractionConfig, StageTimingObserver, TermExtractor};

/// Input format
#[derive(Clone, Debug)]
enum InputFormat {
    Kytea,
    Mecab,
}

impl FromStr for InputFormat {
    type Err = &'static str;

    fn from_str(format: &str) -> Result<Self, Self::Err> {
        match format {
            "kytea" => Ok(Self::Kytea),
            "mecab" => Ok(Self::Mecab),
            _ => Err("Could not parse a format"),
        }
    }
}

#[derive(Parser, Debug)]
#[clap(name = "ncvalue", about = "Extracts terms from tagged text by NC-value")]
struct Args {
    /// Tagged input. Reads stdin when omitted.
    #[clap(short = 'i', long)]
    input: Option<PathBuf>,

    /// Input format. Choices are kytea and mecab.
    #[clap(short = 'f', long, default_value = "kytea")]
    format: InputFormat,

    /// Number of terms to print.
    #[clap(short = 'k', long, default_value = "1000")]
    top_k: usize,

    /// Extraction settings as JSON.
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// Prints the ranked terms with their scores as JSON.
    #[clap(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ExtractionConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ExtractionConfig::default(),
    };
    let extractor = TermExtractor::with_config(config)?;

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(std::io::stdin().lock()),
    };

    eprintln!("Reading the corpus...");
    let corpus = match args.format {
        InputFormat::Kytea => read_kytea(reader)?,
        InputFormat::Mecab => read_mecab(reader)?,
    };
    eprintln!("{} sentences", corpus.len());

    let mut observer = StageTimingObserver::new();
    let result = extractor.run(&corpus, &mut observer);
    for (stage, report) in observer.reports() {
        eprintln!("{stage}: {:?}", report.elapsed());
    }
    eprintln!("{} terms found", result.len());

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    if args.json {
        serde_json::to_writer_pretty(&mut out, result.top_ranked(args.top_k))?;
        out.write_all(b"\n")?;
    } else {
        for term in result.top_k(args.top_k) {
            writeln!(&mut out, "{term}")?;
        }
    }
    out.flush()?;

    Ok(())
}
