//! Discovery of export files from command-line inputs.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

/// Expands the given inputs into a list of XML files.
///
/// Directories are searched recursively. Only existing files with an `.xml`
/// extension (in any case) are kept. Paths that differ only in case are
/// treated as duplicates; the first one seen is kept and input order is
/// otherwise preserved.
#[must_use]
pub fn collect_xml_paths(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for input in inputs {
        let candidates = if input.is_dir() {
            walk_xml_files(input)
        } else if is_xml_file(input) {
            vec![input.clone()]
        } else {
            tracing::debug!("Skipping non-XML input {}", input.display());
            Vec::new()
        };

        for path in candidates {
            if seen.insert(path.to_string_lossy().to_lowercase()) {
                paths.push(path);
            }
        }
    }

    paths
}

/// The default output location: the given file name next to the first input.
#[must_use]
pub fn default_output_path(first_input: &Path, file_name: &str) -> PathBuf {
    first_input
        .parent()
        .map_or_else(|| PathBuf::from(file_name), |dir| dir.join(file_name))
}

fn walk_xml_files(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| has_xml_extension(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect();
    paths.sort();
    paths
}

fn is_xml_file(path: &Path) -> bool {
    has_xml_extension(path) && path.is_file()
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn keeps_only_existing_xml_files() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.xml"), "<a/>").unwrap();
        fs::write(root.join("b.XML"), "<b/>").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();

        let inputs = vec![
            root.join("a.xml"),
            root.join("b.XML"),
            root.join("notes.txt"),
            root.join("missing.xml"),
        ];

        assert_eq!(
            collect_xml_paths(&inputs),
            vec![root.join("a.xml"), root.join("b.XML")]
        );
    }

    #[test]
    fn walks_directories_recursively() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("line1/area2")).unwrap();
        fs::write(root.join("line1/alarms.xml"), "<a/>").unwrap();
        fs::write(root.join("line1/area2/more.xml"), "<a/>").unwrap();
        fs::write(root.join("line1/area2/readme.md"), "").unwrap();
        fs::create_dir_all(root.join("folder.xml")).unwrap();

        let paths = collect_xml_paths(&[root.to_path_buf()]);

        assert_eq!(
            paths,
            vec![
                root.join("line1/alarms.xml"),
                root.join("line1/area2/more.xml"),
            ]
        );
    }

    #[test]
    fn drops_duplicates_ignoring_case() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.xml"), "<a/>").unwrap();

        let inputs = vec![root.join("a.xml"), root.to_path_buf(), root.join("a.xml")];

        assert_eq!(collect_xml_paths(&inputs), vec![root.join("a.xml")]);
    }

    #[test]
    fn default_output_is_next_to_first_input() {
        assert_eq!(
            default_output_path(Path::new("/exports/line1.xml"), "Alarm_Tags.xlsx"),
            PathBuf::from("/exports/Alarm_Tags.xlsx")
        );
        assert_eq!(
            default_output_path(Path::new("line1.xml"), "Alarm_Tags.xlsx"),
            PathBuf::from("Alarm_Tags.xlsx")
        );
    }
}
