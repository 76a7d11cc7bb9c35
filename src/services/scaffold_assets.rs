use include_dir::{Dir, DirEntry, include_dir};

static SCAFFOLD_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/scaffold");

/// Path of the bundled workflow inside the scaffold.
pub const WORKFLOW_PATH: &str = ".github/workflows/carrier_owl.yml";

/// Path of the bundled notifier configuration inside the scaffold.
pub const CONFIG_PATH: &str = "config.yaml";

/// A file shipped in the scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFile {
    /// Path relative to the scaffold root, with `/` separators.
    pub path: String,
    pub content: String,
}

/// Every scaffold file, sorted by path.
pub fn scaffold_files() -> Vec<ScaffoldFile> {
    let mut files = Vec::new();
    collect(&SCAFFOLD_DIR, &mut files);
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

pub fn scaffold_file_content(path: &str) -> Option<String> {
    SCAFFOLD_DIR.get_file(path).and_then(|file| file.contents_utf8()).map(|s| s.to_string())
}

fn collect(dir: &Dir<'_>, files: &mut Vec<ScaffoldFile>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(subdir) => collect(subdir, files),
            DirEntry::File(file) => {
                if let Some(content) = file.contents_utf8() {
                    files.push(ScaffoldFile {
                        path: file.path().to_string_lossy().replace('\\', "/"),
                        content: content.to_string(),
                    });
                }
            }
        }
    }
}
