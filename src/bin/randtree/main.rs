#![warn(missing_docs)]
//! The `randtree` binary is a command line tool, using the `[randtree]` crate.
//! It generates sets of random trees over user provided taxa, and reports
//! statistics on newick files.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use indicatif::ProgressIterator;
use itertools::Itertools;
use randtree::{
    clock_seed,
    output::{default_output_path, write_trees, write_trees_to_file},
    taxa::TaxonSet,
    tree::{Rooting, Topology, TopologyError},
    GenerateError, TreeGenerator,
};
use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// contains the struct representing the command line arguments
/// parsed by [`clap`] and used to execute this binary
pub mod cli;

const STDOUT: &str = "-";

fn print_stats_header(name: bool) {
    let header = "tree\ttips\tinternal\troot_degree\trooting\tbinary\tunique_names";
    if name {
        println!("filename\t{header}")
    } else {
        println!("{header}")
    }
}

fn to_repr<T, E>(res: Result<T, E>) -> String
where
    T: Display,
{
    res.map_or_else(|_| "-".into(), |v| format!("{v}"))
}

fn rooting_repr(rooting: Result<Option<Rooting>, TopologyError>) -> String {
    match rooting {
        Ok(Some(rooting)) => rooting.to_string(),
        _ => "-".into(),
    }
}

fn print_stats(path: &Path, name: bool) -> Result<()> {
    let trees = Topology::from_file(path)
        .with_context(|| format!("Could not read trees from {}", path.display()))?;

    let name = if name {
        format!("{}\t", path.display())
    } else {
        "".into()
    };

    for (i, tree) in trees.iter().enumerate() {
        let row = [
            (i + 1).to_string(),
            tree.n_leaves().to_string(),
            tree.n_internal().to_string(),
            to_repr(tree.root_degree()),
            rooting_repr(tree.rooting()),
            to_repr(tree.is_binary()),
            to_repr(tree.has_unique_tip_names()),
        ];
        println!("{name}{}", row.iter().join("\t"));
    }

    Ok(())
}

fn generate_trees(
    taxa_path: &Path,
    rooting: Rooting,
    ntrees: usize,
    output: Option<PathBuf>,
    seed: Option<u64>,
    progress: bool,
) -> Result<()> {
    let taxa = TaxonSet::from_file(taxa_path)
        .with_context(|| format!("Could not read taxa from {}", taxa_path.display()))?;

    let seed = seed.unwrap_or_else(clock_seed);
    info!(
        seed,
        %rooting,
        n_taxa = taxa.len(),
        n_trees = ntrees,
        "Generating random trees"
    );

    let mut generator = TreeGenerator::from_seed(seed, rooting, taxa)?;

    // Every tree is generated before anything is written
    let trees: Vec<String> = if progress {
        generator
            .by_ref()
            .take(ntrees)
            .progress_count(ntrees as u64)
            .collect::<Result<_, GenerateError>>()?
    } else {
        generator.generate(ntrees)?
    };

    let output = output.unwrap_or_else(|| default_output_path(taxa_path));
    if output == Path::new(STDOUT) {
        write_trees(io::stdout().lock(), &trees)?;
    } else {
        write_trees_to_file(&output, &trees)
            .with_context(|| format!("Could not write trees to {}", output.display()))?;
        info!(path = %output.display(), "Wrote {} trees", trees.len());
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match cli::Args::parse().command {
        cli::Commands::Generate {
            taxa,
            rooting,
            trees,
            output,
            seed,
            progress,
        } => generate_trees(&taxa, rooting, trees as usize, output, seed, progress)?,
        cli::Commands::Stats { trees } => {
            let print_name = trees.len() > 1;
            print_stats_header(print_name);
            for tree in trees {
                print_stats(&tree, print_name)?
            }
        }
        cli::Commands::Completion { shell } => {
            let mut cmd = cli::Args::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}
