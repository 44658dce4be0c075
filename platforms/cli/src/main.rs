use clap::{ArgAction, Parser, Subcommand};
use log::{info, LevelFilter};
use std::error::Error;
use std::process;
use tapeadd::analyzer::check_all;
use tapeadd::{binary_adder, input_tape, read_result, MachineError, Status, TuringMachine};

/// Generates Turing machine binary adders and runs them.
#[derive(Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Raise the log level (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Add two unsigned integers on a generated adder
    Add {
        /// Operand width in bits
        #[arg(short, long, default_value_t = 8)]
        bits: usize,

        /// First operand
        a: u64,

        /// Second operand
        b: u64,

        /// Print the machine after each step
        #[arg(short = 'd', long)]
        debug: bool,
    },

    /// Print a generated adder definition as JSON
    Emit {
        /// Operand width in bits
        #[arg(short, long, default_value_t = 8)]
        bits: usize,

        /// Pretty-print the JSON document
        #[arg(long)]
        pretty: bool,
    },

    /// Print the size of a generated adder and the analyzer report
    Stats {
        /// Operand width in bits
        #[arg(short, long, default_value_t = 8)]
        bits: usize,
    },
}

const SEPARATOR: &str = "###################################################";

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Command::Add { bits, a, b, debug } => add(bits, a, b, debug),
        Command::Emit { bits, pretty } => emit(bits, pretty),
        Command::Stats { bits } => stats(bits),
    };

    if let Err(error) = result {
        eprintln!("Error: {}", error);
        process::exit(1);
    }
}

/// `RUST_LOG` applies unless `-v` is given.
fn init_logger(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }

    builder.init();
}

fn add(bits: usize, a: u64, b: u64, debug: bool) -> Result<(), Box<dyn Error>> {
    let mut machine = TuringMachine::new(binary_adder(bits)?);
    machine.initialize(input_tape(bits, a, b)?)?;
    info!("Computing {} + {} on a {}-bit adder", a, b, bits);

    if debug {
        println!("{}", machine);
        loop {
            let status = machine.step()?;
            println!("{}", SEPARATOR);
            println!("{}", machine);
            if status.is_final() {
                break;
            }
        }
        println!();
    } else {
        machine.run()?;
    }

    if machine.status() != Status::Accepted {
        return Err(format!(
            "Machine halted with status {} in state {}",
            machine.status(),
            machine.state()
        )
        .into());
    }

    let tape = machine.tape().ok_or("Machine has no tape")?;
    let sum = read_result(tape, bits).ok_or("Result cells do not hold binary digits")?;

    println!(
        "{}",
        summary(bits, a, b, sum, machine.step_count(), machine.status())
    );

    Ok(())
}

/// One-line report of a finished addition.
fn summary(bits: usize, a: u64, b: u64, sum: u64, steps: usize, status: Status) -> String {
    format!(
        "{} + {} = {} ({:0width$b}), {} transitions, {}",
        a,
        b,
        sum,
        sum,
        steps,
        status,
        width = bits + 1
    )
}

fn emit(bits: usize, pretty: bool) -> Result<(), Box<dyn Error>> {
    let document = binary_adder(bits)?.to_document();

    let json = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    println!("{}", json);

    Ok(())
}

fn stats(bits: usize) -> Result<(), Box<dyn Error>> {
    let definition = binary_adder(bits)?;

    println!("Bits:        {}", bits);
    println!("Transitions: {}", definition.len());
    println!("States:      {}", definition.states().len());
    println!("Initial:     {}", definition.initial_state());

    let problems = check_all(&definition);
    if problems.is_empty() {
        println!("Analysis:    ok");
    } else {
        for problem in problems {
            println!("Analysis:    {}", MachineError::from(problem));
        }
    }

    Ok(())
}
