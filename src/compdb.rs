//! JSON compilation database reading and writing
//!
//! Format: <https://clang.llvm.org/docs/JSONCompilationDatabase.html>
//!
//! Entries are kept as ordered JSON objects. Only `command` and `arguments`
//! are ever mutated; every other key passes through untouched and in its
//! original position.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{FilterError, InputKind, Result};
use crate::paths;

/// Database file generated by CMake (`CMAKE_EXPORT_COMPILE_COMMANDS`)
pub const DATABASE_FILE: &str = "compile_commands.json";

/// Output file for entries kept in analysis scope
pub const INCLUDED_FILE: &str = "compile_commands_inc.json";

/// Output file for entries removed from analysis scope
pub const EXCLUDED_FILE: &str = "compile_commands_exc.json";

/// One compile record, opaque apart from the keys the filter reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompileEntry(Map<String, Value>);

impl CompileEntry {
    /// Wrap a JSON object, requiring a string `file` key
    pub fn from_object(index: usize, object: Map<String, Value>) -> Result<Self> {
        match object.get("file") {
            Some(Value::String(_)) => Ok(Self(object)),
            _ => Err(FilterError::MissingKey { index, key: "file" }),
        }
    }

    /// Source file being compiled
    pub fn file(&self) -> &str {
        self.0.get("file").and_then(Value::as_str).unwrap_or_default()
    }

    /// Working directory of the compile, if present
    pub fn directory(&self) -> Option<&str> {
        self.0.get("directory").and_then(Value::as_str)
    }

    /// Full compiler invocation, if the entry uses the `command` form
    pub fn command(&self) -> Option<&str> {
        self.0.get("command").and_then(Value::as_str)
    }

    /// Replace the `command` string in place
    pub fn set_command(&mut self, command: String) {
        if let Some(slot) = self.0.get_mut("command") {
            *slot = Value::String(command);
        }
    }

    /// Compiler argv, if the entry uses the `arguments` form
    pub fn arguments(&self) -> Option<Vec<&str>> {
        let array = self.0.get("arguments")?.as_array()?;
        array.iter().map(Value::as_str).collect()
    }

    /// Replace the `arguments` array in place
    pub fn set_arguments(&mut self, arguments: Vec<String>) {
        if let Some(slot) = self.0.get_mut("arguments") {
            *slot = Value::Array(arguments.into_iter().map(Value::String).collect());
        }
    }

    /// Directory containing the source file
    ///
    /// A relative `file` is taken relative to the entry's `directory`.
    pub fn source_dir(&self) -> PathBuf {
        let file = Path::new(self.file());
        let file = match self.directory() {
            Some(dir) if file.is_relative() => Path::new(dir).join(file),
            _ => file.to_path_buf(),
        };
        let file = paths::normalize(&file);
        file.parent().map(Path::to_path_buf).unwrap_or_default()
    }

    /// Borrow the underlying JSON object
    pub fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Ordered list of compile entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilationDatabase {
    pub entries: Vec<CompileEntry>,
}

impl CompilationDatabase {
    /// Parse a database from JSON text; `origin` is only used in errors
    pub fn from_json(contents: &str, origin: &Path) -> Result<Self> {
        let value: Value =
            serde_json::from_str(contents).map_err(|source| FilterError::Malformed {
                path: origin.to_path_buf(),
                source,
            })?;

        let Value::Array(items) = value else {
            return Err(FilterError::InvalidShape {
                path: origin.to_path_buf(),
                reason: "top-level value is not an array".to_string(),
            });
        };

        let entries = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(object) => CompileEntry::from_object(index, object),
                _ => Err(FilterError::InvalidShape {
                    path: origin.to_path_buf(),
                    reason: format!("entry #{index} is not an object"),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load `compile_commands.json` from `build_dir`
pub fn load_database(build_dir: &Path) -> Result<CompilationDatabase> {
    let path = build_dir.join(DATABASE_FILE);
    if !path.exists() {
        return Err(FilterError::MissingInput {
            kind: InputKind::CompilationDatabase,
            path,
        });
    }

    let contents = fs::read_to_string(&path).map_err(|source| FilterError::Io {
        path: path.clone(),
        source,
    })?;

    let database = CompilationDatabase::from_json(&contents, &path)?;
    tracing::debug!(entries = database.len(), path = %path.display(), "loaded compile commands");
    Ok(database)
}

/// Serialize `entries` as a four-space indented JSON array
pub fn to_json_string(entries: &[CompileEntry]) -> Result<String> {
    let mut buf = Vec::new();
    write_entries(&mut buf, entries).map_err(|source| FilterError::Io {
        path: PathBuf::new(),
        source,
    })?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_entries<W: Write>(writer: W, entries: &[CompileEntry]) -> std::io::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    entries
        .serialize(&mut serializer)
        .map_err(std::io::Error::from)
}

/// Write `entries` to `path`, replacing any existing file
pub fn write_database(path: &Path, entries: &[CompileEntry]) -> Result<()> {
    let io_err = |source: std::io::Error| FilterError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_entries(&mut writer, entries).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    tracing::debug!(entries = entries.len(), path = %path.display(), "wrote compile commands");
    Ok(())
}
