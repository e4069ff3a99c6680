#[cfg(feature = "network")]
use std::collections::{BTreeSet, HashMap};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use clap::{Parser, ValueEnum};
use mobiledoc_converters_core::{PathNormalizer, SharedPathNormalizer};
use mobiledoc_converters_markdown::Processor;
use rayon::prelude::*;

use crate::{
    Error,
    export::Export,
    images::GhostPaths,
    post::{FrontMatterFormat, Post},
    site::Site,
    time::{Location, TimeParser, current_offset},
};

/// How cards without a Markdown equivalent are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Dialect {
    /// Raw HTML figures
    #[default]
    Html,
    /// Calls to `gallery`, `galleryImg` and `bookmark` shortcodes, installed
    /// into the generated site
    Shortcode,
}

/// Convert a Ghost blog export into a new Hugo site
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Ghost export (JSON) to convert
    pub(crate) export: PathBuf,

    /// Path of the Hugo site to create
    #[arg(long, default_value = "newhugosite")]
    pub(crate) hugo: PathBuf,

    /// Write into an existing, non-empty directory
    #[arg(short, long)]
    pub(crate) force: bool,

    /// Timezone of the generated dates: `local`, `utc` or an offset like `+02:00`
    #[arg(long, default_value = "local")]
    pub(crate) location: Location,

    /// Additional timestamp format (strftime syntax), tried before the built-in ones
    #[arg(long)]
    pub(crate) dateformat: Option<String>,

    /// Front matter syntax
    #[arg(long, value_enum, default_value_t = FrontMatterFormat::Toml)]
    pub(crate) front_matter: FrontMatterFormat,

    /// Output for gallery and bookmark cards
    #[arg(long, value_enum, default_value_t = Dialect::Html)]
    pub(crate) dialect: Dialect,

    /// Blog URL. Image references starting with it become site-relative
    #[arg(long)]
    pub(crate) url: Option<String>,

    /// Download post images into `static/images`
    #[cfg(feature = "network")]
    #[arg(long, requires = "url")]
    pub(crate) download_images: bool,

    /// Skip TLS certificate verification when downloading images
    #[cfg(feature = "network")]
    #[arg(long, requires = "download_images")]
    pub(crate) insecure: bool,
}

/// Run the migration. Returns the number of posts written.
#[tracing::instrument(skip_all, fields(export = %args.export.display()))]
pub(crate) fn run(args: &Args) -> Result<usize, Error> {
    let started = Instant::now();
    let export = load(&args.export)?;
    tracing::info!(
        version = export.meta.version.as_deref().unwrap_or("unknown"),
        exported_on = ?export.meta.exported_on,
        posts = export.data.posts.len(),
        "loaded Ghost export"
    );
    if let Some(title) = export.settings().get("title") {
        tracing::info!(title, "migrating blog");
    }
    tracing::info!(
        location = %args.location,
        offset = %current_offset(args.location),
        "dates will be written in this timezone"
    );

    let site = Site::create(&args.hugo, args.force)?;
    let normalizer: SharedPathNormalizer = Arc::new(GhostPaths::new(args.url.as_deref()));
    let processor = match args.dialect {
        Dialect::Html => Processor::new(Arc::clone(&normalizer)),
        Dialect::Shortcode => {
            site.install_shortcodes(mobiledoc_converters_shortcode::TEMPLATES)?;
            mobiledoc_converters_shortcode::processor(&normalizer)
        }
    };

    #[cfg(feature = "network")]
    let fetcher = match (&args.url, args.download_images) {
        (Some(url), true) => Some(crate::images::ImageFetcher::new(
            url,
            &site.images_dir(),
            args.insecure,
        )?),
        _ => None,
    };

    let times = TimeParser::new(args.location, args.dateformat.clone());
    #[cfg_attr(not(feature = "network"), allow(unused_mut))]
    let mut posts: Vec<Post> = export
        .data
        .posts
        .par_iter()
        .map(|raw| Post::from_export(raw, &export, &times))
        .collect();

    #[cfg(feature = "network")]
    if let Some(fetcher) = &fetcher {
        download_images(fetcher, &mut posts);
    }

    let results: Vec<(String, Result<PathBuf, Error>)> = posts
        .into_par_iter()
        .map(|post| {
            let result = write_post(
                &site,
                &post,
                args.front_matter,
                &processor,
                normalizer.as_ref(),
            );
            (post.slug, result)
        })
        .collect();

    let (written, errors): (Vec<_>, Vec<_>) =
        results.into_iter().partition(|(_slug, result)| result.is_ok());

    if !errors.is_empty() {
        for (slug, result) in &errors {
            if let Err(error) = result {
                tracing::error!(%slug, %error, "failed to write post");
            }
        }
        return Err(Error::PostsFailed {
            count: errors.len(),
        });
    }

    tracing::info!(
        posts = written.len(),
        site = %site.root().display(),
        elapsed = ?started.elapsed(),
        "conversion finished"
    );
    Ok(written.len())
}

fn load(path: &Path) -> Result<Export, Error> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    Export::from_reader(BufReader::new(file))
}

fn write_post(
    site: &Site,
    post: &Post,
    format: FrontMatterFormat,
    processor: &Processor,
    normalizer: &dyn PathNormalizer,
) -> Result<PathBuf, Error> {
    let relative = post.relative_path()?;
    let content = post.to_content(format, processor, normalizer)?;
    let path = site.write(&relative, &content)?;
    tracing::debug!(id = ?post.id, path = %path.display(), "wrote post");
    Ok(path)
}

/// Replace cover images with downloaded copies, fetching each distinct image
/// once. Failures keep the original reference.
#[cfg(feature = "network")]
fn download_images(fetcher: &crate::images::ImageFetcher, posts: &mut [Post]) {
    let unique: BTreeSet<&str> = posts.iter().filter_map(|post| post.image.as_deref()).collect();
    let fetched: Vec<(&str, Result<String, Error>)> = unique
        .into_par_iter()
        .map(|image| (image, fetcher.fetch(image)))
        .collect();
    let mut downloaded = HashMap::new();
    for (image, result) in fetched {
        match result {
            Ok(local) => {
                downloaded.insert(image.to_string(), local);
            }
            Err(error) => tracing::warn!(image, %error, "unable to download image"),
        }
    }
    for post in posts {
        if let Some(local) = post.image.as_ref().and_then(|image| downloaded.get(image)) {
            post.image = Some(local.clone());
        }
    }
}
