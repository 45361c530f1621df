//! Provenance manifests for generated test files.
//!
//! Each generated file gets a sibling `<filename>.manifest.json` recording a
//! blake3 hash of its contents plus generation metadata. Verification detects
//! manual edits so regeneration stays the only way to change a test.
//!
//! Manifests carry no timestamps; generating the same instruction twice
//! produces byte-identical files and byte-identical manifests.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CodegenError, Result};

/// How a generated file came to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Generating tool name
    pub tool: String,
    /// Tool version
    pub tool_version: String,
    /// Blake3 hash of the instruction text the file was generated from
    pub input_hash: String,
}

impl GenerationMetadata {
    /// Metadata for a generation of this tool from the given instruction.
    #[must_use]
    pub fn for_input(instruction: &str) -> Self {
        Self {
            tool: "escriba".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            input_hash: hash_contents(instruction),
        }
    }
}

/// Manifest stored alongside a generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileManifest {
    /// Version of the manifest format
    pub manifest_version: u32,
    /// Path to the generated file (relative)
    pub output_path: String,
    /// Blake3 hash of the generated file contents
    pub output_hash: String,
    /// Generation metadata
    pub generation: GenerationMetadata,
}

impl FileManifest {
    /// Current manifest format version.
    pub const VERSION: u32 = 1;

    /// Manifest for freshly generated contents.
    #[must_use]
    pub fn new(
        output_path: impl Into<String>,
        contents: &str,
        generation: GenerationMetadata,
    ) -> Self {
        Self {
            manifest_version: Self::VERSION,
            output_path: output_path.into(),
            output_hash: hash_contents(contents),
            generation,
        }
    }

    /// The manifest file path for a generated file.
    #[must_use]
    pub fn manifest_path(generated_path: &Path) -> std::path::PathBuf {
        let mut path = generated_path.to_path_buf();
        let mut filename = generated_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        filename.push_str(".manifest.json");
        path.set_file_name(filename);
        path
    }

    /// Write the manifest next to its generated file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read a manifest from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let manifest: Self = serde_json::from_str(&json)?;
        Ok(manifest)
    }
}

/// Blake3 hash of contents, hex-encoded.
#[must_use]
pub fn hash_contents(contents: &str) -> String {
    blake3::hash(contents.as_bytes()).to_hex().to_string()
}

/// Verify a generated file still matches its manifest.
pub fn verify_file(generated_path: &Path) -> Result<()> {
    let manifest_path = FileManifest::manifest_path(generated_path);
    let manifest =
        FileManifest::read(&manifest_path).map_err(|_| CodegenError::ManifestError {
            path: generated_path.display().to_string(),
            reason: format!("manifest not found at {}", manifest_path.display()),
        })?;

    let contents = std::fs::read_to_string(generated_path)?;
    let actual_hash = hash_contents(&contents);
    if actual_hash != manifest.output_hash {
        return Err(CodegenError::HashMismatch {
            path: generated_path.display().to_string(),
            expected: manifest.output_hash,
            actual: actual_hash,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_generated(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        let manifest = FileManifest::new(
            name,
            contents,
            GenerationMetadata::for_input("login with username Sam"),
        );
        manifest.write(&FileManifest::manifest_path(&path)).unwrap();
        path
    }

    #[test]
    fn verify_accepts_untouched_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_generated(dir.path(), "login.spec.ts", "test code");
        verify_file(&path).unwrap();
    }

    #[test]
    fn verify_detects_single_byte_edit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_generated(dir.path(), "login.spec.ts", "test code");
        fs::write(&path, "test code!").unwrap();
        let err = verify_file(&path).unwrap_err();
        assert!(matches!(err, CodegenError::HashMismatch { .. }));
    }

    #[test]
    fn verify_requires_a_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orphan.spec.ts");
        fs::write(&path, "test code").unwrap();
        let err = verify_file(&path).unwrap_err();
        assert!(matches!(err, CodegenError::ManifestError { .. }));
    }

    #[test]
    fn manifest_path_appends_suffix() {
        let path = FileManifest::manifest_path(Path::new("out/login.spec.ts"));
        assert_eq!(path, Path::new("out/login.spec.ts.manifest.json"));
    }

    #[test]
    fn manifests_are_deterministic() {
        let generation = GenerationMetadata::for_input("login");
        let a = FileManifest::new("a.ts", "code", generation.clone());
        let b = FileManifest::new("a.ts", "code", generation);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
