use clap::{Arg, ArgAction, ArgMatches, Command};
use elpian_core::{CompileOptions, EcmaVersion, ElpianErrorExt, Script, emit_program, generate_ast_from_source, lower_ast_to_ir};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

mod output;

use output::{init_logging, print_error};

fn main() -> ExitCode {
    let cli = Command::new("elpian")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile Elpian scripts into the JSON IR executed by the Elpian VM")
        .subcommand_required(true)
        .arg_required_else_help(true);

    let cli = setup_cli(cli);
    let matches = cli.get_matches();
    dispatch_commands(&matches)
}

/// Sets up the CLI with subcommands and arguments.
fn setup_cli(cli: Command) -> Command {
    cli.subcommand(
        Command::new("build")
            .about("Compile the specified script file to JSON IR")
            .arg(
                Arg::new("file")
                    .help("The script file to compile")
                    .required(true)
                    .index(1),
            )
            .arg(
                Arg::new("output")
                    .help("Write the IR document to FILE instead of stdout")
                    .short('o')
                    .long("output")
                    .value_parser(clap::value_parser!(PathBuf))
                    .value_name("FILE"),
            )
            .arg(
                Arg::new("pretty")
                    .help("Indent the IR document")
                    .long("pretty")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("ecma-version")
                    .help("Language edition to accept: 5, 6..11, 2015..2020 or latest")
                    .long("ecma-version")
                    .value_parser(parse_ecma_version)
                    .value_name("VERSION"),
            )
            .arg(
                Arg::new("dump")
                    .help("Also print an intermediate stage to stderr")
                    .short('d')
                    .long("dump")
                    .value_parser(["ast", "ir"])
                    .value_name("STAGE"),
            )
            .arg(
                Arg::new("verbose")
                    .help("Increase log verbosity (-v info, -vv debug)")
                    .short('v')
                    .long("verbose")
                    .action(ArgAction::Count),
            ),
    )
}

fn parse_ecma_version(value: &str) -> Result<EcmaVersion, String> {
    EcmaVersion::parse(value).ok_or_else(|| format!("unsupported ECMAScript version `{}`", value))
}

/// Dispatches the command based on the parsed arguments.
fn dispatch_commands(matches: &ArgMatches) -> ExitCode {
    match matches.subcommand() {
        Some(("build", sub_m)) => {
            init_logging(sub_m.get_count("verbose"));
            match build(sub_m) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    print_error(&*e);
                    ExitCode::FAILURE
                }
            }
        }
        _ => {
            eprintln!("No valid subcommand was used. Use --help for more information.");
            ExitCode::FAILURE
        }
    }
}

fn build(sub_m: &ArgMatches) -> Result<(), Box<dyn ElpianErrorExt>> {
    let Some(file) = sub_m.get_one::<String>("file") else {
        unreachable!("clap enforces the required file argument");
    };
    let options = CompileOptions {
        ecma_version: sub_m.get_one::<EcmaVersion>("ecma-version").copied().unwrap_or_default(),
        pretty: sub_m.get_flag("pretty"),
    };
    let dump = sub_m.get_one::<String>("dump").map(String::as_str);

    let script = Script::new(PathBuf::from(file))?.with_ecma_version(options.ecma_version);
    tracing::info!("compiling {} (ecmaVersion {})", script.name, options.ecma_version);

    let ast = generate_ast_from_source(&script)?;
    if dump == Some("ast") {
        eprintln!("{:#?}", ast);
    }

    let program = lower_ast_to_ir(&ast)?;
    if dump == Some("ir") {
        emit_program(&program, &mut std::io::stderr().lock(), true)?;
    }

    match sub_m.get_one::<PathBuf>("output") {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                elpian_core::ir::OutputError::new(format!("Failed to create {}: {}", path.display(), e), "elpian.cli.build")
                    .boxed()
            })?;
            let mut writer = BufWriter::new(file);
            emit_program(&program, &mut writer, options.pretty)?;
            tracing::info!("wrote IR to {}", path.display());
        }
        None => {
            emit_program(&program, &mut std::io::stdout().lock(), options.pretty)?;
        }
    }
    Ok(())
}
