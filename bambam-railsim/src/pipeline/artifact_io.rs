use super::PipelineError;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

fn is_gzip(filepath: &Path) -> bool {
    filepath
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// reads a JSON artifact, decompressing it when the filename ends in `.gz`.
pub fn read_artifact<T: DeserializeOwned>(filepath: &Path) -> Result<T, PipelineError> {
    let filename = filepath.to_string_lossy().to_string();
    let file = File::open(filepath)
        .map_err(|e| PipelineError::ArtifactReadError(filename.clone(), e.to_string()))?;
    let reader = BufReader::new(file);
    let result = if is_gzip(filepath) {
        serde_json::from_reader(GzDecoder::new(reader))
    } else {
        serde_json::from_reader(reader)
    };
    result.map_err(|e| PipelineError::ArtifactReadError(filename, e.to_string()))
}

/// a JSON artifact serialized in memory, not yet written to its target path.
pub struct EncodedArtifact {
    filepath: PathBuf,
    bytes: Vec<u8>,
}

/// serializes an artifact, compressing it when the filename ends in `.gz`.
pub fn encode_artifact<T: Serialize>(
    value: &T,
    filepath: &Path,
) -> Result<EncodedArtifact, PipelineError> {
    let bytes = if is_gzip(filepath) {
        let mut encoder = GzEncoder::new(vec![], Compression::default());
        serde_json::to_writer(&mut encoder, value)?;
        encoder.finish()?
    } else {
        serde_json::to_vec(value)?
    };
    Ok(EncodedArtifact {
        filepath: filepath.to_path_buf(),
        bytes,
    })
}

/// writes a JSON artifact, compressing it when the filename ends in `.gz`.
/// an existing file is only replaced when `overwrite` is set.
pub fn write_artifact<T: Serialize>(
    value: &T,
    filepath: &Path,
    overwrite: bool,
) -> Result<(), PipelineError> {
    let artifact = encode_artifact(value, filepath)?;
    write_artifacts(&[artifact], overwrite)
}

/// writes a set of artifacts as a unit. every target is checked against the
/// overwrite guard before anything is written. each artifact is staged in a
/// `.partial` sibling file and the staged files are only moved into place
/// once all of them were written; on failure the staged files are removed.
pub fn write_artifacts(
    artifacts: &[EncodedArtifact],
    overwrite: bool,
) -> Result<(), PipelineError> {
    for artifact in artifacts.iter() {
        check_target(&artifact.filepath, overwrite)?;
    }

    let mut staged: Vec<PathBuf> = Vec::with_capacity(artifacts.len());
    for artifact in artifacts.iter() {
        match stage_artifact(artifact) {
            Ok(staged_path) => staged.push(staged_path),
            Err(e) => {
                remove_staged(&staged);
                return Err(e);
            }
        }
    }

    for (artifact, staged_path) in artifacts.iter().zip(staged.iter()) {
        std::fs::rename(staged_path, &artifact.filepath).map_err(|e| {
            PipelineError::ArtifactWriteError(
                artifact.filepath.to_string_lossy().to_string(),
                e.to_string(),
            )
        })?;
        log::info!("wrote {}", artifact.filepath.to_string_lossy());
    }
    Ok(())
}

fn check_target(filepath: &Path, overwrite: bool) -> Result<(), PipelineError> {
    let filename = filepath.to_string_lossy().to_string();
    if filepath.is_dir() {
        return Err(PipelineError::ArtifactWriteError(
            filename,
            String::from("target is a directory"),
        ));
    }
    if filepath.exists() && !overwrite {
        return Err(PipelineError::ArtifactWriteError(
            filename,
            String::from("file exists and overwrite is not enabled"),
        ));
    }
    Ok(())
}

fn staged_path(filepath: &Path) -> PathBuf {
    let mut name = filepath.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    filepath.with_file_name(name)
}

fn stage_artifact(artifact: &EncodedArtifact) -> Result<PathBuf, PipelineError> {
    let filename = artifact.filepath.to_string_lossy().to_string();
    if let Some(parent) = artifact.filepath.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PipelineError::ArtifactWriteError(filename.clone(), e.to_string()))?;
        }
    }
    let staged = staged_path(&artifact.filepath);
    let mut writer = File::create(&staged)
        .map(BufWriter::new)
        .map_err(|e| PipelineError::ArtifactWriteError(filename.clone(), e.to_string()))?;
    let written = writer.write_all(&artifact.bytes).and_then(|_| writer.flush());
    if let Err(e) = written {
        drop(writer);
        remove_staged(&[staged]);
        return Err(PipelineError::ArtifactWriteError(filename, e.to_string()));
    }
    Ok(staged)
}

fn remove_staged(staged: &[PathBuf]) {
    for path in staged.iter() {
        if let Err(e) = std::fs::remove_file(path) {
            log::warn!("unable to remove staged file {}: {e}", path.to_string_lossy());
        }
    }
}
