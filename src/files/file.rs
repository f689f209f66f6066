use std::{ffi::OsStr, path::Path, path::PathBuf};

use log::{debug, trace};
use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use crate::error::Result;

/// Case-sensitive file name suffix filter built from the `--filetypes` list.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    pattern: Option<Regex>,
}

impl ExtensionFilter {
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Result<Self> {
        if extensions.is_empty() {
            return Ok(Self { pattern: None });
        }
        let alternatives: Vec<String> = extensions
            .iter()
            .map(|ext| regex::escape(ext.as_ref()))
            .collect();
        let pattern = Regex::new(&format!(r"(?:{})$", alternatives.join("|")))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub fn matches(&self, file_name: &OsStr) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(&file_name.to_string_lossy()),
            None => false,
        }
    }
}

fn is_file(entry: &DirEntry) -> bool {
    // walkdir reports the link itself unless follow_links is set
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Lazily walks `dir` depth-first and yields every file whose name matches `filter`.
///
/// Each directory is read in full and sorted by name before any of its entries are
/// yielded, so output files written next to a source are not picked up by the same
/// walk. Filesystem errors are yielded as `Err` items.
pub fn files_with_extension<'a>(
    dir: &Path,
    filter: &'a ExtensionFilter,
) -> impl Iterator<Item = Result<PathBuf>> + 'a {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Err(err) => Some(Err(err.into())),
            Ok(entry) if is_file(&entry) && filter.matches(entry.file_name()) => {
                debug!("Found {}", entry.path().display());
                Some(Ok(entry.into_path()))
            }
            Ok(entry) => {
                trace!("Skipping {}", entry.path().display());
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn listing(root: &Path, extensions: &[&str]) -> String {
        let filter = ExtensionFilter::new(extensions).unwrap();
        files_with_extension(root, &filter)
            .map(|path| {
                path.unwrap()
                    .strip_prefix(root)
                    .unwrap()
                    .display()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn matches_suffixes_case_sensitively() {
        let filter = ExtensionFilter::new(&[".jpg", ".png"]).unwrap();
        assert!(filter.matches(OsStr::new("photo.jpg")));
        assert!(filter.matches(OsStr::new("archive.tar.png")));
        assert!(!filter.matches(OsStr::new("photo.JPG")));
        assert!(!filter.matches(OsStr::new("photo.jpg.bak")));
        assert!(!filter.matches(OsStr::new("photoxjpg")));
    }

    #[test]
    fn empty_filter_matches_nothing() {
        let filter = ExtensionFilter::new::<&str>(&[]).unwrap();
        assert!(!filter.matches(OsStr::new("photo.jpg")));
        assert!(!filter.matches(OsStr::new("")));
    }

    #[test]
    fn walks_nested_directories_in_name_order() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.png");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "nested/b.jpg");
        touch(dir.path(), "nested/deeper/c.png");
        touch(dir.path(), "nested/deeper/d.gif");

        insta::assert_snapshot!(listing(dir.path(), &[".jpg", ".png"]), @r"
        a.png
        nested/b.jpg
        nested/deeper/c.png
        ");
    }

    #[test]
    fn custom_filetypes_replace_the_defaults() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.png");
        touch(dir.path(), "b.gif");
        touch(dir.path(), "sub/c.bmp");

        insta::assert_snapshot!(listing(dir.path(), &[".gif", ".bmp"]), @r"
        b.gif
        sub/c.bmp
        ");
    }

    #[test]
    fn directories_named_like_images_are_not_yielded() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "album.png/inner.png");

        assert_eq!(listing(dir.path(), &[".png"]), "album.png/inner.png");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let filter = ExtensionFilter::new(&[".png"]).unwrap();
        let mut walk = files_with_extension(&dir.path().join("missing"), &filter);

        assert!(matches!(walk.next(), Some(Err(crate::error::Error::Walk(_)))));
    }
}
