use std::{
    fs::File,
    io::{BufRead, BufReader},
    process::ExitCode,
};

use dfa_eval::prelude::*;

use tracing::{debug, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgAction, ArgMatches, Command};

fn automaton_arg() -> Arg {
    Arg::new("automaton")
        .required(true)
        .help("file containing the automaton description")
}

fn cli() -> clap::Command {
    Command::new("dfa")
    .about("Loads deterministic finite automata and classifies words")
    .subcommand_required(true)
    .arg(
        Arg::new("verbosity")
        .short('v')
        .long("verbosity")
        .global(true)
        .num_args(0..=1)
        .require_equals(true)
        .value_parser(["info", "debug", "trace"])
        .default_missing_value("info")
    )
    .subcommand(
        Command::new("eval")
        .about("classifies the given words, reads one word per line from stdin if none are given")
        .arg(automaton_arg())
        .arg(Arg::new("words").num_args(0..))
        .arg(
            Arg::new("plain")
            .long("plain")
            .action(ArgAction::SetTrue)
            .help("print `word: RESULT` lines instead of a table")
        )
        .arg(
            Arg::new("no-color")
            .long("no-color")
            .action(ArgAction::SetTrue)
            .help("do not color the results")
        )
    )
    .subcommand(
        Command::new("show")
        .about("prints the transition table of the automaton")
        .arg(automaton_arg())
    )
    .subcommand(
        Command::new("dot")
        .about("prints the automaton in the graphviz DOT language")
        .arg(automaton_arg())
    )
    .subcommand(
        Command::new("trace")
        .about("prints the states that a word visits")
        .arg(automaton_arg())
        .arg(Arg::new("word").required(true))
    )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn read_automaton(matches: &ArgMatches) -> Result<Automaton, LoadError> {
    let path = matches
        .get_one::<String>("automaton")
        .map(String::as_str)
        .unwrap_or_default();
    debug!("reading automaton from {path}");
    let start = std::time::Instant::now();
    let aut = load_read(BufReader::new(File::open(path)?))?;
    info!(
        "loading automaton with {} states took {}µs",
        aut.size(),
        start.elapsed().as_micros()
    );
    Ok(aut)
}

fn read_words(matches: &ArgMatches) -> Result<Vec<String>, LoadError> {
    match matches.get_many::<String>("words") {
        Some(words) => Ok(words.cloned().collect()),
        None => {
            debug!("reading words from stdin");
            std::io::stdin()
                .lock()
                .lines()
                .map(|line| line.map(|l| l.trim().to_string()).map_err(LoadError::from))
                .collect()
        }
    }
}

fn run(matches: &ArgMatches) -> Result<(), LoadError> {
    match matches.subcommand() {
        Some(("eval", sub_matches)) => {
            let aut = read_automaton(sub_matches)?;
            let words = read_words(sub_matches)?;
            let evaluation = evaluate(&aut, &words);
            if sub_matches.get_flag("plain") {
                print!("{evaluation}");
            } else {
                println!("{}", evaluation.table(!sub_matches.get_flag("no-color")));
            }
        }
        Some(("show", sub_matches)) => {
            let aut = read_automaton(sub_matches)?;
            println!("{}", aut.transition_table());
        }
        Some(("dot", sub_matches)) => {
            let aut = read_automaton(sub_matches)?;
            println!("{}", aut.dot_representation());
        }
        Some(("trace", sub_matches)) => {
            let aut = read_automaton(sub_matches)?;
            let word = sub_matches
                .get_one::<String>("word")
                .map(String::as_str)
                .unwrap_or_default();
            let run = aut.run(word);
            let positions = run
                .positions()
                .iter()
                .map(|p| aut.position_name(*p))
                .collect::<Vec<_>>();
            println!("{} => {}", positions.join(" -> "), run.classification());
        }
        _ => unreachable!(),
    }
    Ok(())
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
