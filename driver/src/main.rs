use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{self, ensure};
use rand::Rng;
use tracing::{info, trace};

use cairo_avl::{keys, viz, Counters, Dict, Tree};

/// Bulk-operation driver for the cairo-avl tree engine.
#[derive(Parser)]
#[clap(name = "driver", version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run union and difference over two key corpora and report the
    /// commitment-work counters.
    Report(ReportArgs),
    /// Write pseudorandom fixture corpora.
    Generate(GenerateArgs),
}

#[derive(Args)]
struct ReportArgs {
    /// File providing the original tree's key corpus.
    tree_file: PathBuf,
    /// File providing the update dict's key corpus.
    dict_file: PathBuf,
    /// Number of bytes packed into one key.
    #[clap(long, default_value_t = 4)]
    group_size: usize,
    /// Render the input and result trees as `<STEM>-*.png` via Graphviz.
    #[clap(long, value_name = "STEM")]
    visualise: Option<String>,
}

#[derive(Args)]
struct GenerateArgs {
    /// Number of 4-byte records in the tree corpus.
    #[clap(long, default_value_t = 10_000)]
    nodes: usize,
    /// Number of 4-byte records in the dict corpus.
    #[clap(long, default_value_t = 100)]
    dict: usize,
    /// Output path for the tree corpus.
    #[clap(long, default_value = "nodes.dat")]
    tree_out: PathBuf,
    /// Output path for the dict corpus.
    #[clap(long, default_value = "dict.dat")]
    dict_out: PathBuf,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::try_init().map_err(|e| eyre::eyre!(e))?;

    match Cli::parse().command {
        Command::Report(args) => report(args),
        Command::Generate(args) => generate(args),
    }
}

fn report(args: ReportArgs) -> eyre::Result<()> {
    let tree_keys = keys::pack_keys(&fs::read(&args.tree_file)?, args.group_size);
    let dict_keys = keys::pack_keys(&fs::read(&args.dict_file)?, args.group_size);
    info!(
        tree_keys = tree_keys.len(),
        dict_keys = dict_keys.len(),
        "corpora packed"
    );

    let tree = Tree::from_keys(tree_keys.clone());
    let dict = Dict::from_keys(dict_keys.clone());

    let start = Instant::now();
    let (merged, merge_ctrs) = tree.union(&dict);
    trace!(duration = ?start.elapsed(), "union finished");

    print_counters("union", &merge_ctrs, merged.new_hash_count());
    let mut ok = true;
    ok &= check("union is balanced", merged.is_balanced());
    ok &= check("union is a valid BST", merged.is_valid_bst());
    ok &= check(
        "union contains every tree key",
        tree_keys.iter().all(|k| merged.contains(k)),
    );
    ok &= check(
        "union contains every dict key",
        dict_keys.iter().all(|k| merged.contains(k)),
    );

    let start = Instant::now();
    let (remaining, remove_ctrs) = tree.difference(&dict);
    trace!(duration = ?start.elapsed(), "difference finished");

    print_counters("difference", &remove_ctrs, remaining.new_hash_count());
    ok &= check("difference is balanced", remaining.is_balanced());
    ok &= check("difference is a valid BST", remaining.is_valid_bst());
    ok &= check(
        "difference dropped every dict key",
        dict_keys.iter().all(|k| !remaining.contains(k)),
    );

    if let Some(stem) = &args.visualise {
        viz::render(&tree, &format!("{}-input", stem))?;
        viz::render(&dict.to_tree(), &format!("{}-dict", stem))?;
        viz::render(&merged, &format!("{}-union", stem))?;
        viz::render(&remaining, &format!("{}-difference", stem))?;
    }

    ensure!(ok, "verifier failure");
    Ok(())
}

fn print_counters(what: &str, ctrs: &Counters, new_hashes: u64) {
    println!("{}:", what);
    println!("  exposed nodes: {}", ctrs.exposed);
    println!("  height probes: {}", ctrs.height_probes);
    println!("  revisited:     {}", ctrs.revisited);
    println!("  new hashes:    {}", new_hashes);
}

fn check(what: &str, ok: bool) -> bool {
    println!("  {} {}", if ok { "ok  " } else { "FAIL" }, what);
    ok
}

fn generate(args: GenerateArgs) -> eyre::Result<()> {
    write_corpus(&args.tree_out, args.nodes)?;
    write_corpus(&args.dict_out, args.dict)?;
    Ok(())
}

/// Write a corpus of 4-byte big-endian pseudorandom records.
fn write_corpus(path: &Path, count: usize) -> eyre::Result<()> {
    let mut rng = rand::thread_rng();
    let mut buf = Vec::with_capacity(count * 4);
    for _ in 0..count {
        buf.extend_from_slice(&rng.gen::<u32>().to_be_bytes());
    }
    fs::write(path, &buf)?;

    info!(path = %path.display(), records = count, "fixture corpus written");

    Ok(())
}
