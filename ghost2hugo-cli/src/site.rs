//! Hugo site skeleton.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::Error;

/// Directories every generated site starts with, relative to its root.
const DIRECTORIES: &[&str] = &[
    "archetypes",
    "content/post",
    "data",
    "layouts/shortcodes",
    "static/images",
    "themes",
];

/// The target Hugo site.
#[derive(Debug, Clone)]
pub(crate) struct Site {
    root: PathBuf,
}

impl Site {
    /// Create the site skeleton under `root`.
    ///
    /// `root` must not exist, or be an empty directory. With `force`, an
    /// existing non-empty directory is reused and files in it may be
    /// overwritten.
    pub(crate) fn create<P: Into<PathBuf>>(root: P, force: bool) -> Result<Self, Error> {
        let root = root.into();
        if root.exists() {
            if !root.is_dir() {
                return Err(Error::NotADirectory(root));
            }
            let mut entries = fs::read_dir(&root).map_err(|e| Error::io(&root, e))?;
            if entries.next().is_some() {
                if !force {
                    return Err(Error::NotEmpty(root));
                }
                tracing::warn!(path = %root.display(), "writing into a non-empty directory");
            }
        }
        for dir in DIRECTORIES {
            let path = root.join(dir);
            fs::create_dir_all(&path).map_err(|e| Error::io(&path, e))?;
        }
        tracing::debug!(path = %root.display(), "created site skeleton");
        Ok(Self { root })
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    /// Where downloaded images go.
    #[cfg_attr(not(feature = "network"), allow(dead_code))]
    pub(crate) fn images_dir(&self) -> PathBuf {
        self.root.join("static").join("images")
    }

    /// Install shortcode templates under `layouts/shortcodes`.
    pub(crate) fn install_shortcodes(&self, templates: &[(&str, &str)]) -> Result<(), Error> {
        let dir = self.root.join("layouts").join("shortcodes");
        for (name, contents) in templates {
            let path = dir.join(name);
            fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;
            tracing::debug!(shortcode = name, "installed shortcode template");
        }
        Ok(())
    }

    /// Write a file relative to the site root, creating parent directories.
    pub(crate) fn write(&self, relative: &Path, contents: &str) -> Result<PathBuf, Error> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_create_new_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("site");
        let site = Site::create(&root, false).unwrap();
        for dir in DIRECTORIES {
            assert!(root.join(dir).is_dir(), "{dir} missing");
        }
        assert_eq!(site.images_dir(), root.join("static/images"));
    }

    #[test]
    fn test_create_in_empty_directory() {
        let tmp = tempfile::tempdir().unwrap();
        Site::create(tmp.path(), false).unwrap();
        assert!(tmp.path().join("content/post").is_dir());
    }

    #[test]
    fn test_refuses_non_empty_directory() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("config.toml"), "").unwrap();
        let err = Site::create(tmp.path(), false).unwrap_err();
        assert!(matches!(err, Error::NotEmpty(_)));
        Site::create(tmp.path(), true).unwrap();
        assert!(tmp.path().join("config.toml").exists());
    }

    #[test]
    fn test_refuses_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("site");
        fs::write(&file, "").unwrap();
        let err = Site::create(&file, true).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
    }

    #[test]
    fn test_install_and_write() {
        let tmp = tempfile::tempdir().unwrap();
        let site = Site::create(tmp.path().join("site"), false).unwrap();
        site.install_shortcodes(&[("gallery.html", "<div></div>")]).unwrap();
        assert_eq!(
            fs::read_to_string(site.root().join("layouts/shortcodes/gallery.html")).unwrap(),
            "<div></div>"
        );
        let path = site.write(Path::new("content/about.md"), "hi").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "hi");
    }
}
