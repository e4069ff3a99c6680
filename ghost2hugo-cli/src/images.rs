//! Image paths, and optionally the images themselves.

use std::{
    collections::HashSet,
    path::Path,
    sync::{Mutex, PoisonError},
};

use mobiledoc_converters_core::{PathNormalizer, StripContentPrefix};

/// Placeholder Ghost 4+ writes in place of the site URL.
pub(crate) const GHOST_URL: &str = "__GHOST_URL__";

/// Rewrites Ghost image references into site-relative paths.
///
/// The `__GHOST_URL__` placeholder and, when known, the blog's own URL are
/// dropped; the `/content` folder prefix is then stripped, so
/// `__GHOST_URL__/content/images/a.jpg` becomes `/images/a.jpg`.
#[derive(Debug, Clone, Default)]
pub(crate) struct GhostPaths {
    site_url: Option<String>,
    content: StripContentPrefix,
}

impl GhostPaths {
    pub(crate) fn new(site_url: Option<&str>) -> Self {
        Self {
            site_url: site_url
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            content: StripContentPrefix::default(),
        }
    }
}

impl PathNormalizer for GhostPaths {
    fn normalize(&self, path: &str) -> String {
        let path = path.strip_prefix(GHOST_URL).unwrap_or(path);
        let path = self
            .site_url
            .as_deref()
            .and_then(|url| path.strip_prefix(url))
            .filter(|rest| rest.starts_with('/'))
            .unwrap_or(path);
        self.content.normalize(path)
    }
}

/// Name a downloaded image is saved under: its own name, with `.jpg` added
/// when it has no usable extension.
#[cfg_attr(not(feature = "network"), allow(dead_code))]
pub(crate) fn local_file_name(name: &str) -> String {
    let has_extension = Path::new(name)
        .extension()
        .is_some_and(|ext| !ext.is_empty() && ext.len() <= 4);
    if has_extension {
        name.to_string()
    } else {
        format!("{name}.jpg")
    }
}

/// File names already handed out in `static/images`.
///
/// Two different images sharing a file name get distinct local names
/// (`a.jpg`, `a-1.jpg`, ...), so concurrent downloads never write the same
/// file.
#[derive(Debug, Default)]
#[cfg_attr(not(feature = "network"), allow(dead_code))]
pub(crate) struct ClaimedNames {
    names: Mutex<HashSet<String>>,
}

#[cfg_attr(not(feature = "network"), allow(dead_code))]
impl ClaimedNames {
    /// Reserve `name`, or the first free numbered variant of it.
    pub(crate) fn claim(&self, name: &str) -> String {
        let mut names = self.names.lock().unwrap_or_else(PoisonError::into_inner);
        let (stem, extension) = match name.rsplit_once('.') {
            Some((stem, extension)) if !stem.is_empty() => (stem, Some(extension)),
            _ => (name, None),
        };
        let mut candidate = name.to_string();
        let mut n = 0_usize;
        while names.contains(&candidate) {
            n += 1;
            candidate = match extension {
                Some(extension) => format!("{stem}-{n}.{extension}"),
                None => format!("{stem}-{n}"),
            };
        }
        names.insert(candidate.clone());
        candidate
    }
}

#[cfg(feature = "network")]
pub(crate) use fetch::ImageFetcher;

#[cfg(feature = "network")]
mod fetch {
    use std::{
        fs::File,
        io,
        path::{Path, PathBuf},
    };

    use ureq::{Agent, tls::TlsConfig};
    use url::Url;

    use super::{ClaimedNames, GHOST_URL, local_file_name};
    use crate::Error;

    /// Downloads post images into `static/images`.
    pub(crate) struct ImageFetcher {
        site_url: Url,
        images_dir: PathBuf,
        agent: Agent,
        claimed: ClaimedNames,
    }

    impl ImageFetcher {
        /// `insecure` disables TLS certificate verification, for blogs still
        /// served with an expired certificate.
        pub(crate) fn new(site_url: &str, images_dir: &Path, insecure: bool) -> Result<Self, Error> {
            let site_url = Url::parse(site_url).map_err(|source| Error::InvalidUrl {
                url: site_url.to_string(),
                source,
            })?;
            let agent: Agent = Agent::config_builder()
                .tls_config(TlsConfig::builder().disable_verification(insecure).build())
                .build()
                .into();
            Ok(Self {
                site_url,
                images_dir: images_dir.to_path_buf(),
                agent,
                claimed: ClaimedNames::default(),
            })
        }

        /// Resolve an image reference against the site URL.
        pub(crate) fn resolve(&self, image: &str) -> Result<Url, Error> {
            let path = image.strip_prefix(GHOST_URL).unwrap_or(image);
            self.site_url.join(path).map_err(|source| Error::InvalidUrl {
                url: image.to_string(),
                source,
            })
        }

        /// Download `image` and return the site path it is served from.
        ///
        /// Every call claims a fresh file name: callers download each distinct
        /// image once.
        #[tracing::instrument(skip(self))]
        pub(crate) fn fetch(&self, image: &str) -> Result<String, Error> {
            let url = self.resolve(image)?;
            let Some(name) = url
                .path_segments()
                .and_then(Iterator::last)
                .filter(|name| !name.is_empty())
            else {
                return Err(Error::NoFileName {
                    url: url.to_string(),
                });
            };
            let name = self.claimed.claim(&local_file_name(name));
            let path = self.images_dir.join(&name);

            let mut response = self
                .agent
                .get(url.as_str())
                .call()
                .map_err(|source| Error::Download {
                    url: url.to_string(),
                    source: Box::new(source),
                })?;
            let mut file = File::create(&path).map_err(|e| Error::io(&path, e))?;
            io::copy(&mut response.body_mut().as_reader(), &mut file)
                .map_err(|e| Error::io(&path, e))?;
            tracing::debug!(?path, %url, "downloaded image");
            Ok(format!("/images/{name}"))
        }
    }

}
