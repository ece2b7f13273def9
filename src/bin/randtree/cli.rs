use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use randtree::tree::Rooting;

/// A command line tool to generate random phylogenetic trees over a set of taxa
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    /// The command to execute
    pub command: Commands,
}

/// The available commands in the `randtree` tool
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate random trees with randomly placed taxa
    Generate {
        /// Text file with one taxon label per line
        taxa: PathBuf,

        /// Rooted (r) or unrooted (u) trees
        #[arg(value_enum, short, long, ignore_case = true, default_value_t = Rooting::Unrooted)]
        rooting: Rooting,

        /// Number of trees to generate
        #[arg(
            short = 'n',
            long,
            default_value_t = 100,
            value_parser = clap::value_parser!(u64).range(2..=2000)
        )]
        trees: u64,

        /// Output file, "-" writes to stdout
        /// [default: taxa file name with the .nwk extension]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed of the random number generator [default: taken from the clock]
        #[arg(short, long)]
        seed: Option<u64>,

        /// Show a progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Get statistics about trees in newick files
    ///
    /// For each tree this will return:
    ///  - the number of tips
    ///  - the number of internal nodes
    ///  - the number of children of the root
    ///  - whether the tree is rooted or unrooted
    ///  - whether the tree is binary
    ///  - whether all tips have distinct names
    #[clap(verbatim_doc_comment)]
    Stats {
        /// Newick files with one tree per line
        #[arg(required = true)]
        trees: Vec<PathBuf>,
    },

    /// Generate shell completions for randtree
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
