use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use log::LevelFilter;

use colour_search::render::{format_table, swatch_strip, swatch_svg};
use colour_search::{JsonFileLoader, Outcome, PaletteLoader, QueryService, Session, DEFAULT_LIMIT};

const SWATCH_SIZE: u32 = 32;

// Use clap to take command line arguments: a palette document plus the colours to search for
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON palette shaped like {"colors": [{"color": "red", "hex": "#ff0000"}]}
    #[arg(short, long, env = "COLOUR_SEARCH_PALETTE")]
    palette: PathBuf,

    /// Maximum number of matches to show
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Write the last result as an SVG swatch chart
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write the last result as a PNG swatch strip
    #[arg(long)]
    png: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG also applies
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Colours as #rgb, #rrggbb or rgb(r, g, b). Reads one per line from stdin when empty
    colours: Vec<String>,
}

fn main() -> Result<()> {
    // Parse the command line arguments
    let args = Cli::parse();
    init_logging(args.verbose);
    ensure!(args.limit > 0, "--limit must be at least 1");

    let mut session = Session::new(JsonFileLoader::new(&args.palette), QueryService::new(args.limit));
    let loaded = session.load();

    if args.colours.is_empty() {
        if let Err(err) = &loaded {
            eprintln!("{err}");
        }
        print_outcome(&session);
        interactive(&mut session)?;
    } else {
        loaded.with_context(|| format!("Unable to load colours from {}", args.palette.display()))?;
        search_all(&mut session, &args.colours)?;
    }

    export(&session, &args)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn search_all<L: PaletteLoader>(session: &mut Session<L>, colours: &[String]) -> Result<()> {
    let mut invalid = 0;
    for colour in colours {
        println!("== {colour}");
        let searched = session.search(colour).map(|rows| rows.len());
        match searched {
            Ok(_) => print_outcome(session),
            Err(err) => {
                eprintln!("{err}");
                invalid += 1;
            }
        }
    }

    if invalid > 0 {
        bail!("{invalid} of {} colours could not be searched", colours.len());
    }
    Ok(())
}

// Read colours from stdin until EOF; `reload` retries the palette and `quit` stops
fn interactive<L: PaletteLoader>(session: &mut Session<L>) -> Result<()> {
    let stdin = io::stdin();
    prompt()?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "reload" => {
                if let Err(err) = session.load() {
                    eprintln!("{err}");
                }
                print_outcome(session);
            }
            colour => {
                let searched = session.search(colour).map(|rows| rows.len());
                match searched {
                    Ok(_) => print_outcome(session),
                    // Keep showing the previous results
                    Err(err) => println!("{err}"),
                }
            }
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("colour> ");
    io::stdout().flush().context("Failed to flush stdout")
}

fn print_outcome<L: PaletteLoader>(session: &Session<L>) {
    match session.outcome() {
        Outcome::Loading => println!("Loading colours..."),
        Outcome::Rows(rows) => print!("{}", format_table(rows)),
        Outcome::NoMatches => println!("No colour matches your search."),
        Outcome::Unavailable => println!("Unable to load colours! Type `reload` to try again."),
    }
}

fn export<L: PaletteLoader>(session: &Session<L>, args: &Cli) -> Result<()> {
    let rows = session.rows();

    if let Some(path) = &args.svg {
        svg::save(path, &swatch_svg(rows))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if let Some(path) = &args.png {
        let strip = swatch_strip(rows, SWATCH_SIZE).context("No colours to draw")?;
        strip.save(path).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
