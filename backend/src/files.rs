//! Reading descriptions and writing generated documents for the CLI.

use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::FileResult;
use crate::transform::GeneratedConfig;

/// Where a generated document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// Resolve `-o`: `-` means stdout, a path is used as is, and no flag
    /// means the suggested filename inside `dir`.
    pub fn resolve(output: Option<&Path>, dir: &Path, generated: &GeneratedConfig) -> Self {
        match output {
            Some(p) if p == Path::new("-") => Self::Stdout,
            Some(p) => Self::File(p.to_path_buf()),
            None => Self::File(dir.join(&generated.filename)),
        }
    }
}

/// Read a JSON description file.
pub fn read_description(path: &Path) -> FileResult<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write the document to `target`. Returns the path written, if any.
pub fn write_generated(generated: &GeneratedConfig, target: &OutputTarget) -> FileResult<Option<PathBuf>> {
    match target {
        OutputTarget::Stdout => {
            print!("{}", generated.yaml_content);
            Ok(None)
        }
        OutputTarget::File(path) => {
            fs::write(path, &generated.yaml_content)?;
            Ok(Some(path.clone()))
        }
    }
}

/// Write the validation error report. The CLI sends it to stderr so that
/// stdout only ever carries YAML.
pub fn report_errors<W: Write>(out: &mut W, errors: &[String]) -> io::Result<()> {
    writeln!(out, "\n❌ {} error(s):", errors.len())?;
    for err in errors {
        writeln!(out, "   - {}", err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn generated() -> GeneratedConfig {
        GeneratedConfig {
            yaml_content: "api_taste: []\n".into(),
            filename: "orders.yaml".into(),
        }
    }

    #[test]
    fn test_resolve_target() {
        let dir = Path::new("/tmp/out");
        assert_eq!(OutputTarget::resolve(Some(Path::new("-")), dir, &generated()), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::resolve(None, dir, &generated()),
            OutputTarget::File(PathBuf::from("/tmp/out/orders.yaml"))
        );
        assert_eq!(
            OutputTarget::resolve(Some(Path::new("x.yml")), dir, &generated()),
            OutputTarget::File(PathBuf::from("x.yml"))
        );
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempdir().unwrap();
        let target = OutputTarget::resolve(None, dir.path(), &generated());
        let written = write_generated(&generated(), &target).unwrap().unwrap();
        assert_eq!(fs::read_to_string(written).unwrap(), "api_taste: []\n");
    }

    #[test]
    fn test_report_errors_lists_every_message() {
        let errors = vec![
            "Service name is required".to_string(),
            "API 1: Invalid HTTP method".to_string(),
        ];
        let mut out = Vec::new();
        report_errors(&mut out, &errors).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n❌ 2 error(s):\n   - Service name is required\n   - API 1: Invalid HTTP method\n"
        );
    }

    #[test]
    fn test_read_description_rejects_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(read_description(&path).is_err());
    }
}
