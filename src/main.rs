use ARTools::Kinetics::stoichiometry_matrix::StoichAnalyzer;
use ARTools::Utils::load_from_file::load_reactions_from_file;
use ARTools::settings::ParserSettings;
use ARTools::StoichError;
use log::error;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::process::ExitCode;

fn run(reactions_file: &str, settings_file: Option<&str>) -> Result<(), StoichError> {
    let settings = match settings_file {
        Some(path) => ParserSettings::from_file(path)?,
        None => ParserSettings::default(),
    };
    let reactions = load_reactions_from_file(reactions_file)?;
    let mut analyzer = StoichAnalyzer::with_reactions(&reactions);
    analyzer.set_settings(settings);
    analyzer.analyse_reactions()?;
    analyzer.pretty_print();
    Ok(())
}

pub fn main() -> ExitCode {
    if let Err(e) = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger not initialized: {}", e);
    }
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("usage: ARTools <reactions-file> [settings.json]");
        return ExitCode::from(2);
    }
    match run(&args[1], args.get(2).map(|s| s.as_str())) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
