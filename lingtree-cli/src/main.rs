// Command-line interface for lingtree
//
// This binary converts languoid classification trees to and from their flat
// lff/dff listings. All the conversion logic lives in the lingtree-lff crate;
// this layer only parses arguments, loads configuration and prints results.
//
// Usage:
//  lingtree <tree>                              - Flatten a tree into lff.txt/dff.txt (default)
//  lingtree export <tree> [--outdir <dir>]      - Same as above (explicit)
//  lingtree import <lff> <dff> [--tree <old>] [--outdir <dir>]
//                                               - Rebuild a tree from listings
//
// Both directions print the number of processed nodes to stdout; import can
// emit the full build report as JSON instead with --json. Skipped entries and
// orphaned old-tree nodes are logged as warnings (RUST_LOG=warn).

use clap::{Arg, ArgAction, Command, ValueHint};
use lingtree_config::{LingtreeConfig, Loader};
use lingtree_lff::{lff2tree, tree2lff, BuildOptions};
use std::path::{Path, PathBuf};

fn build_cli() -> Command {
    Command::new("lingtree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting languoid trees to and from lff listings")
        .long_about(
            "lingtree converts a languoid classification between its two forms:\n\
            a directory tree of info files and the flat lff.txt/dff.txt listings.\n\n\
            Commands:\n  \
            - export: flatten a tree into sorted lff.txt and dff.txt\n  \
            - import: rebuild a tree from listings against an old tree snapshot\n\n\
            Examples:\n  \
            lingtree tree/                          # Flatten into ./lff.txt, ./dff.txt\n  \
            lingtree export tree/ --outdir listings # Same, explicit output directory\n  \
            lingtree import lff.txt dff.txt --tree tree/ --outdir fromlff",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a lingtree.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("export")
                .about("Flatten a tree into lff.txt and dff.txt (default command)")
                .arg(
                    Arg::new("tree")
                        .help("Root of the classification tree")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("outdir")
                        .long("outdir")
                        .help("Directory to write the listings to (defaults to the current directory)")
                        .value_hint(ValueHint::DirPath),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Rebuild a tree from lff/dff listings")
                .long_about(
                    "Rebuild a classification tree from a language listing and its\n\
                    companion dialect listing. The old tree supplies the metadata for\n\
                    every node the listings reference; without --tree, every node must\n\
                    be creatable from the listings alone (see --allow-new-languages).\n\n\
                    The output directory must not already exist.",
                )
                .arg(
                    Arg::new("lff")
                        .help("Language listing (lff.txt)")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("dff")
                        .help("Dialect listing (dff.txt)")
                        .required(true)
                        .index(2)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("tree")
                        .long("tree")
                        .help("Old tree snapshot to carry metadata forward from")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("outdir")
                        .long("outdir")
                        .help("Directory to build the new tree in (must not exist)")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("allow-new-languages")
                        .long("allow-new-languages")
                        .help("Create leaf languages/dialects the old tree does not know")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the full build report as JSON instead of a count")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    env_logger::init();

    // If no subcommand is provided, inject "export": `lingtree tree/` is the
    // historical invocation.
    let args: Vec<String> = std::env::args().collect();
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1
                && !args[1].starts_with('-')
                && args[1] != "export"
                && args[1] != "import"
                && args[1] != "help"
            {
                let mut new_args = vec![args[0].clone(), "export".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("export", sub_matches)) => {
            let tree = sub_matches
                .get_one::<String>("tree")
                .expect("tree is required");
            let outdir = sub_matches
                .get_one::<String>("outdir")
                .map(PathBuf::from)
                .unwrap_or_else(|| config.export.outdir.clone());
            handle_export_command(Path::new(tree), &outdir);
        }
        Some(("import", sub_matches)) => {
            let lff = sub_matches
                .get_one::<String>("lff")
                .expect("lff is required");
            let dff = sub_matches
                .get_one::<String>("dff")
                .expect("dff is required");
            let old_tree = sub_matches.get_one::<String>("tree").map(PathBuf::from);

            let mut options: BuildOptions = (&config.build).into();
            if let Some(outdir) = sub_matches.get_one::<String>("outdir") {
                options.outdir = PathBuf::from(outdir);
            }
            if sub_matches.get_flag("allow-new-languages") {
                options.allow_new_languages = true;
            }
            let json = sub_matches.get_flag("json");
            handle_import_command(
                Path::new(lff),
                Path::new(dff),
                old_tree.as_deref(),
                &options,
                json,
            );
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn load_cli_config(path: Option<&str>) -> LingtreeConfig {
    let mut loader = Loader::new().with_optional_file("lingtree.toml");
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {e}");
        std::process::exit(1);
    })
}

/// Handle the export command: tree -> lff.txt/dff.txt, print the node count.
fn handle_export_command(tree: &Path, outdir: &Path) {
    let count = tree2lff(tree, outdir).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    println!("{count}");
}

/// Handle the import command: listings -> new tree, print count or report.
fn handle_import_command(
    lff: &Path,
    dff: &Path,
    old_tree: Option<&Path>,
    options: &BuildOptions,
    json: bool,
) {
    let report = lff2tree(lff, dff, old_tree, options).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    if json {
        let rendered = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
            eprintln!("Error rendering report: {e}");
            std::process::exit(1);
        });
        println!("{rendered}");
    } else {
        println!("{}", report.placed);
    }
}
