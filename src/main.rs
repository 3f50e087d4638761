//! Cube Cover Solver
//!
//! Decides whether a selection of polycube pieces can exactly fill an NxNxN
//! cube and prints the first arrangement found. By default it solves the
//! 3x3x3 Soma cube.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use cubecover::geometry::rotations;
use cubecover::grid::format_solution;
use cubecover::persistence::{self, SavedSolution};
use cubecover::pieces::{self, Piece, CATALOG, SELECTOR_MAPPING, SOMA_DIM};
use cubecover::{Placement, Puzzle, Result};

/// Fills a cube with polycube pieces using dancing links.
#[derive(Parser)]
#[command(name = "cubecover")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a piece selection and save the solution to disk.
    Solve {
        #[command(flatten)]
        selection: Selection,
        /// Directory for solution.txt and solution.bin.
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Print a previously saved solution.
    Show {
        /// Directory containing solution.bin.
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Export the solution as JavaScript for a web renderer.
    ExportJs {
        #[command(flatten)]
        selection: Selection,
    },
    /// List the catalog pieces.
    Catalog,
}

/// Which pieces to use and how large the cube is.
#[derive(Args, Clone, Debug, Default)]
struct Selection {
    /// Edge length of the cube.
    #[arg(short, long, default_value_t = SOMA_DIM)]
    size: usize,
    /// Catalog pieces by name, in order (e.g. A,L,T,Z,S,B,P).
    #[arg(short, long, value_delimiter = ',', conflicts_with = "select")]
    pieces: Vec<String>,
    /// Numbered selectors (1=L 2=Z 3=T 4=S 5=P 6=B); piece A is always added first.
    #[arg(long, value_delimiter = ',')]
    select: Vec<u8>,
}

impl Selection {
    /// Resolves the requested pieces, defaulting to the Soma set.
    fn pieces(&self) -> Result<Vec<Piece>> {
        if !self.pieces.is_empty() {
            pieces::select_by_name(&self.pieces)
        } else if !self.select.is_empty() {
            pieces::select_by_number(&self.select)
        } else {
            Ok(pieces::soma_pieces())
        }
    }

    fn puzzle(&self) -> Result<Puzzle> {
        Puzzle::new(self.pieces()?, self.size)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Solve { selection, out }) => run_solve(&selection, Some(&out)),
        Some(Command::Show { out }) => {
            run_show(&out);
            Ok(())
        }
        Some(Command::ExportJs { selection }) => run_export_js(&selection),
        Some(Command::Catalog) => {
            run_catalog();
            Ok(())
        }
        // default: solve the Soma cube and print it
        None => run_solve(&Selection { size: SOMA_DIM, ..Selection::default() }, None),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Prints a solution followed by its piece legend.
fn print_solution(dim: usize, pieces: &[Piece], placements: &[Placement]) {
    print!("{}", format_solution(dim, placements));
    for placed in placements {
        if let Some(piece) = pieces.get(placed.piece_index) {
            println!("{}: {} {:?}", placed.piece_index + 1, piece.name, placed.coords);
        }
    }
}

/// Solves the selection, prints it, and saves it when `out` is given.
fn run_solve(selection: &Selection, out: Option<&Path>) -> Result<()> {
    let puzzle = selection.puzzle()?;

    let Some(placements) = puzzle.solve()? else {
        println!("No solution found for this combination.");
        return Ok(());
    };

    println!("Solution found:");
    print_solution(puzzle.dim(), puzzle.pieces(), &placements);

    if let Some(dir) = out {
        let saved = SavedSolution {
            dim: puzzle.dim(),
            placements,
        };
        if let Err(e) = persistence::save(dir, puzzle.pieces(), &saved) {
            eprintln!("Failed to save solution: {}", e);
        } else {
            println!("Wrote solution.txt and solution.bin");
        }
    }

    Ok(())
}

/// Loads and prints a saved solution.
fn run_show(dir: &Path) {
    match persistence::load(dir) {
        Some(saved) => {
            println!("Loaded solution for a {0}x{0}x{0} cube", saved.dim);
            print!("{}", format_solution(saved.dim, &saved.placements));
        }
        None => eprintln!("No solution.bin found. Run 'cubecover solve' first."),
    }
}

/// Prints the solution as a JavaScript array.
fn run_export_js(selection: &Selection) -> Result<()> {
    match selection.puzzle()?.solve()? {
        Some(placements) => print!("{}", persistence::format_js(&placements)),
        None => eprintln!("No solution found for this combination."),
    }
    Ok(())
}

/// Lists catalog pieces with their volume, orientation count and selector.
fn run_catalog() {
    println!("{:<6}{:<8}{:<14}selector", "name", "volume", "orientations");
    for def in CATALOG {
        let selector = SELECTOR_MAPPING
            .iter()
            .find(|(_, name)| *name == def.name)
            .map_or_else(|| "fixed".to_string(), |(number, _)| number.to_string());
        println!(
            "{:<6}{:<8}{:<14}{}",
            def.name,
            def.shape.len(),
            rotations(def.shape).len(),
            selector
        );
    }
}
