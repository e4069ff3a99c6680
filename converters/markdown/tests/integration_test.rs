use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use mobiledoc_converters_core::StripContentPrefix;
use mobiledoc_converters_markdown::Processor;

type Error = Box<dyn std::error::Error>;

/// Renders each mobiledoc fixture with the default catalog and compares it
/// with the expected Markdown.
#[rstest::rstest]
#[tracing_test::traced_test]
fn test_fixtures(#[files("tests/fixtures/source/*.json")] path: PathBuf) -> Result<(), Error> {
    let file_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or("Invalid fixture file name")?;
    let expected_path = Path::new("tests")
        .join("fixtures")
        .join("expected")
        .join(file_name)
        .with_extension("md");

    let source = std::fs::read_to_string(&path)?;
    let processor = Processor::new(Arc::new(StripContentPrefix::default()));
    let actual = processor.convert(&source);

    let expected = std::fs::read_to_string(&expected_path)?;
    pretty_assertions::assert_eq!(
        expected,
        actual,
        "Markdown output mismatch for fixture: {file_name}",
    );
    Ok(())
}
