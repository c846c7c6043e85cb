use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::style::{style, Stylize};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

use eight_puzzle::{search, Algorithm, Board, Outcome, Solution, State};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmOpt {
    Astar,
    Bfs,
    Both,
}

impl AlgorithmOpt {
    fn algorithms(self) -> &'static [Algorithm] {
        match self {
            AlgorithmOpt::Astar => &[Algorithm::AStar],
            AlgorithmOpt::Bfs => &[Algorithm::Bfs],
            AlgorithmOpt::Both => &[Algorithm::AStar, Algorithm::Bfs],
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "eight-puzzle", about = "Solve the 8-puzzle with BFS and A*")]
struct Args {
    /// Initial board as nine digits, 0 for the blank (e.g. 123406758).
    /// Prompted for on stdin when neither this nor --scramble is given
    #[arg(long)]
    initial: Option<Board>,

    /// Goal board as nine digits. Defaults to 123456780, or is prompted for
    /// together with the initial board
    #[arg(long)]
    goal: Option<Board>,

    /// Search algorithm(s) to run
    #[arg(long, value_enum, default_value_t = AlgorithmOpt::Both)]
    algorithm: AlgorithmOpt,

    /// Generate the initial board by sliding the blank this many random steps away from the goal
    #[arg(long, conflicts_with = "initial")]
    scramble: Option<usize>,

    /// Seed for --scramble
    #[arg(long, default_value_t = 0x00C0FFEEu64)]
    seed: u64,

    /// Print the board after every move of the solution
    #[arg(long)]
    steps: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

struct Printer {
    color: bool,
}

impl Printer {
    fn header(&self, text: &str) -> String {
        if self.color {
            style(text).bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn board(&self, board: &Board) -> String {
        let mut out = String::new();
        for row in board.cells() {
            for &val in row {
                let cell = format!(" {} ", val);
                if self.color && val == 0 {
                    out.push_str(&style(&cell).black().on_yellow().to_string());
                } else {
                    out.push_str(&cell);
                }
            }
            out.push('\n');
        }
        out
    }

    fn solution(&self, algorithm: Algorithm, initial: &Board, solution: &Solution, steps: bool) {
        let title = format!(" USING {} ALGORITHM ", algorithm);
        println!("\n{}", self.header(&format!("{:-^72}", title)));

        let path = match &solution.outcome {
            Outcome::Exhausted => {
                println!("No solution found.");
                return;
            }
            Outcome::Solved(path) => path,
        };

        if path.is_empty() {
            println!("No moves needed. The initial state is already the goal state.");
            return;
        }

        println!("SOLUTION: (Relative to the space character)");
        for (counter, (dir, board)) in path.replay(*initial).enumerate() {
            println!("{}. Move {}", counter + 1, dir);
            if steps {
                println!("{}", self.board(&board));
            }
        }

        let stats = &solution.stats;
        println!("{}", self.header("DETAILS:"));
        println!(" - Solution length : {}", stats.solution_length);
        println!(" - Nodes expanded  : {}", stats.nodes_expanded);
        println!(" - Nodes generated : {}", stats.nodes_generated);
    }
}

fn read_board(label: &str) -> Result<Board> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} (nine digits 0-8, 0 is the blank): ", label);
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            bail!("stdin closed before the {} was entered", label);
        };
        let line = line.context("failed to read from stdin")?;

        match line.parse::<Board>() {
            Ok(board) => return Ok(board),
            Err(e) => println!("    ERROR: {}. Try again.", e),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let printer = Printer {
        color: !args.no_color,
    };

    println!("\n{}", printer.header(" 8 Block Puzzle"));

    let (initial, goal) = match (args.initial, args.scramble) {
        (Some(board), _) => (board, args.goal.unwrap_or_default()),
        (None, Some(steps)) => {
            let goal = args.goal.unwrap_or_default();
            let mut rng = StdRng::seed_from_u64(args.seed);
            (goal.scramble(steps, &mut rng), goal)
        }
        (None, None) => {
            let initial = read_board("INITIAL STATE")?;
            let goal = match args.goal {
                Some(goal) => goal,
                None => read_board("GOAL STATE")?,
            };
            (initial, goal)
        }
    };

    println!("{}", printer.header("INITIAL BOARD STATE:"));
    print!("{}", printer.board(&initial));
    println!("{}", printer.header("GOAL BOARD STATE:"));
    print!("{}", printer.board(&goal));

    let (initial_state, goal_state) = (State::new(initial), State::new(goal));
    for &algorithm in args.algorithm.algorithms() {
        let solution = search(&initial_state, &goal_state, algorithm)
            .with_context(|| format!("{} search failed", algorithm))?;
        printer.solution(algorithm, &initial, &solution, args.steps);
    }

    Ok(())
}
