//! lickgram: encode pieces into phrase grammar, and decode grammar into new
//! melodies over a piece's chords.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use lickgram::config::{load_config, Config};
use lickgram::grammar::{chord_tones_only, decode_score, encode_measure, Vocabulary};
use lickgram::piece::{load_piece, save_piece, PieceFile};
use lickgram::GrammarError;

#[derive(Parser, Debug)]
#[command(name = "lickgram", version)]
#[command(about = "Phrase grammar for melodies over chords")]
struct Cli {
    /// Config file (default: ~/.lickgram/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for decoding, overriding the config
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one grammar line per measure of a piece
    Encode {
        /// Piece file (YAML)
        piece: PathBuf,
    },
    /// Decode grammar lines against the chords of a piece
    Decode {
        /// Piece whose chords the melody is decoded over
        piece: PathBuf,
        /// Grammar file, one line per measure
        grammar: PathBuf,
        /// Write the decoded piece here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write melody and harmony on one timeline instead of per measure
        #[arg(long)]
        flat: bool,
    },
    /// Print the token vocabulary of a grammar file as YAML
    Vocab {
        /// Grammar file, one line per measure
        grammar: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("lickgram: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GrammarError> {
    let mut config = load_config(cli.config.as_deref());
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    log::debug!("config: {config:?}");

    match cli.command {
        Command::Encode { piece } => encode(&piece, &config),
        Command::Decode {
            piece,
            grammar,
            output,
            flat,
        } => decode(&piece, &grammar, output.as_deref(), flat, &config),
        Command::Vocab { grammar } => vocab(&grammar),
    }
}

/// Lines stay aligned with measures: a measure that cannot be encoded
/// prints as an empty line.
fn encode(piece: &Path, config: &Config) -> Result<(), GrammarError> {
    let measures = load_piece(piece)?.to_measures(config.measure_length())?;
    for (index, measure) in measures.iter().enumerate() {
        let line = encode_measure(&measure.notes, &measure.chords).unwrap_or_else(|err| {
            log::warn!("measure {index}: {err}");
            String::new()
        });
        println!("{line}");
    }
    Ok(())
}

fn read_grammar(path: &Path) -> Result<Vec<String>, GrammarError> {
    let text = std::fs::read_to_string(path)?;
    Ok(text.lines().map(str::to_string).collect())
}

fn decode(
    piece: &Path,
    grammar: &Path,
    output: Option<&Path>,
    flat: bool,
    config: &Config,
) -> Result<(), GrammarError> {
    let harmony = load_piece(piece)?.to_measures(config.measure_length())?;
    let mut grammars = read_grammar(grammar)?;
    if config.chord_tones_only {
        grammars = grammars.iter().map(|g| chord_tones_only(g)).collect();
    }
    if grammars.len() != harmony.len() {
        log::warn!(
            "{} grammar lines for {} measures, decoding {}",
            grammars.len(),
            harmony.len(),
            grammars.len().min(harmony.len())
        );
    }

    let mut rng = config.rng();
    let melody = decode_score(&grammars, &harmony, &mut rng);

    let decoded = if flat {
        PieceFile::flat_from_decoded(melody, &harmony, config.measure_length())
    } else {
        PieceFile::from_decoded(&melody, &harmony)
    };

    match output {
        Some(path) => save_piece(path, &decoded)?,
        None => print!("{}", serde_yaml::to_string(&decoded)?),
    }
    Ok(())
}

fn vocab(grammar: &Path) -> Result<(), GrammarError> {
    let grammars = read_grammar(grammar)?;
    let vocabulary = Vocabulary::build(&grammars);
    log::info!("{} distinct tokens", vocabulary.len());
    print!("{}", serde_yaml::to_string(&vocabulary)?);
    Ok(())
}
