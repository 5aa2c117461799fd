//! handoff command line interface
//!
//! Runs the staged JSON patch pipeline against the working directory.
//! Stage filenames are fixed (`v1.json` … `v4.json`); there is nothing to
//! configure beyond which stages to run.

use anyhow::Context;
use clap::{Arg, Command};
use handoff_pipeline::{FileBoundary, Pipeline, Stage, StageInput};
use tracing::info;

fn cli() -> Command {
    Command::new("handoff")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Staged JSON document patch pipeline")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("run").about("Run every stage in order"))
        .subcommand(
            Command::new("stage")
                .about("Run a single stage")
                .arg(
                    Arg::new("name")
                        .required(true)
                        .help("Stage name (see `handoff list`)"),
                ),
        )
        .subcommand(Command::new("list").about("List registered stages"))
        .subcommand(
            Command::new("show")
                .about("Print a handoff file, or a value inside it")
                .arg(Arg::new("file").required(true).help("JSON file to read"))
                .arg(
                    Arg::new("path")
                        .long("path")
                        .help("Dot-separated path within the document"),
                ),
        )
        .subcommand(
            Command::new("unpack")
                .about("Unpack a crystal by applying its symmetry operators")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .help("Packed crystal JSON file"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .help("Write the result to a file instead of stdout"),
                ),
        )
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let matches = cli().get_matches();
    let dir = std::env::current_dir().context("cannot determine working directory")?;
    let pipeline = Pipeline::built_in();

    match matches.subcommand() {
        Some(("run", _)) => {
            pipeline.run(&dir)?;
            info!("pipeline complete");
        }
        Some(("stage", args)) => {
            let name = args
                .get_one::<String>("name")
                .expect("required by clap")
                .as_str();
            pipeline.run_stage(&dir, name)?;
        }
        Some(("list", _)) => {
            for stage in pipeline.stages() {
                println!("{}", describe(stage));
            }
        }
        Some(("show", args)) => {
            let file = args.get_one::<String>("file").expect("required by clap");
            let (document, _) = FileBoundary::new().read(dir.join(file))?;

            match args.get_one::<String>("path") {
                Some(path) => {
                    let value = document
                        .get_path(path)
                        .with_context(|| format!("no value at path '{path}' in {file}"))?;
                    println!("{}", serde_json::to_string_pretty(value)?);
                }
                None => println!("{}", serde_json::to_string_pretty(document.root())?),
            }
        }
        Some(("unpack", args)) => {
            let file = args.get_one::<String>("file").expect("required by clap");
            let boundary = FileBoundary::new();
            let (packed, _) = boundary.read(dir.join(file))?;
            let unpacked = handoff_unpack::unpack(&packed)?;

            match args.get_one::<String>("output") {
                Some(output) => {
                    boundary.write(dir.join(output), &unpacked)?;
                    info!(%output, "unpacked crystal written");
                }
                None => println!("{}", unpacked.to_json()?),
            }
        }
        _ => unreachable!("subcommand required"),
    }

    Ok(())
}

/// One-line summary of a stage for `handoff list`
fn describe(stage: &Stage) -> String {
    let input = match stage.input() {
        StageInput::Seed => "(built-in seed)".to_string(),
        StageInput::File(name) => name.to_string(),
    };
    let patches: Vec<String> = stage.patches().iter().map(ToString::to_string).collect();
    let patches = if patches.is_empty() {
        "no patches".to_string()
    } else {
        patches.join(", ")
    };
    format!("{:<16} {} -> {}: {}", stage.name(), input, stage.output(), patches)
}
