//! monoforge's main application entry point.
//! Handles command-line argument parsing and dispatches to the `init` and
//! `add` flows.

use monoforge::{
    cli::{env_skip_native, get_args, Args, Command},
    error::{default_error_handler, Result},
    logger::init_logger,
    orchestrator::{add_package, init_workspace, GeneratorResult},
    prompt::{complete_config, DialoguerPrompter},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose, args.debug);

    let debug = args.debug;
    if let Err(err) = run(args) {
        default_error_handler(err, debug);
    }
}

fn report(result: &GeneratorResult) {
    for package in &result.packages_created {
        println!("Created: '{}'", package);
    }
    for extension in &result.extensions_enabled {
        println!("Extension: '{}'", extension);
    }
    for warning in &result.warnings {
        eprintln!("Warning: {}", warning);
    }
    println!("Generation completed successfully in {}.", result.project_path.display());
    if !result.next_steps.is_empty() {
        println!("\nNext steps:");
        for step in &result.next_steps {
            println!("  {}", step);
        }
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Reads the native-toolchain toggle from the environment once
/// 2. Builds the configuration or request from flags and config files
/// 3. Prompts for missing values when interactive
/// 4. Runs the generation and prints the summary
fn run(args: Args) -> Result<()> {
    let env_skip = env_skip_native();
    let result = match args.command {
        Command::Init(init) => {
            let mut config = init.to_config(env_skip)?;
            let prompt = DialoguerPrompter::new();
            complete_config(&prompt, &mut config)?;
            init_workspace(&config)?
        }
        Command::Add(add) => add_package(&add.to_request(env_skip)?)?,
    };
    report(&result);
    Ok(())
}
