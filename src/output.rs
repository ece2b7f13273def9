//! Write generated trees, one newick string per line.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

/// Extension of the output newick files
pub const NEWICK_EXTENSION: &str = "nwk";

/// Derives the output path from the path of the taxa file: the file name
/// is cut at its first `.` and given the `.nwk` extension, in the same directory.
/// ```
/// use std::path::{Path, PathBuf};
/// use randtree::output::default_output_path;
///
/// assert_eq!(default_output_path(Path::new("taxa.txt")), PathBuf::from("taxa.nwk"));
/// assert_eq!(default_output_path(Path::new("data/birds.v2.txt")), PathBuf::from("data/birds.nwk"));
/// assert_eq!(default_output_path(Path::new("./mammals")), PathBuf::from("./mammals.nwk"));
/// ```
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let stem = name.split('.').next().unwrap_or_default();

    input.with_file_name(format!("{stem}.{NEWICK_EXTENSION}"))
}

/// Writes trees to a writer, one tree per line
pub fn write_trees<W, S>(writer: W, trees: &[S]) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    let mut writer = BufWriter::new(writer);
    for tree in trees {
        writeln!(writer, "{}", tree.as_ref())?;
    }

    writer.flush()
}

/// Writes trees to a file, creating or truncating it
pub fn write_trees_to_file<S: AsRef<str>>(path: &Path, trees: &[S]) -> io::Result<()> {
    write_trees(File::create(path)?, trees)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tree_per_line() {
        let mut buffer = vec![];
        write_trees(&mut buffer, &["(A,B);", "(B,A);"]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "(A,B);\n(B,A);\n");
    }

    #[test]
    fn no_trees_no_output() {
        let mut buffer = vec![];
        write_trees::<_, String>(&mut buffer, &[]).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn hidden_files_keep_their_directory() {
        assert_eq!(
            default_output_path(Path::new("dir/.taxa")),
            PathBuf::from("dir/.nwk")
        );
    }
}
