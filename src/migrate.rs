//! Migration of legacy directive blocks to per-key assignments.
//!
//! Legacy test files carry their analyzer configuration as one YAML document spread over
//! directive lines:
//!
//! ```text
//! // CONFIG: {AbstractDomain: [Interval, Octagon], widening: 3}
//! ```
//!
//! Migration replaces those lines with one assignment per key, written at the position of the
//! first directive line:
//!
//! ```text
//! // CONFIG: config.widening = 3
//! // CONFIG: config.AbstractDomain = [domains["Interval"], domains["Octagon"]]
//! ```
//!
//! Every directive line in the file contributes to the document, even when ordinary lines sit
//! between directive lines. Those ordinary lines end up after the generated block.

use std::fs;
use std::io::Write;
use std::path::Path;

use log::{debug, warn};
use serde_yaml::Value;
use tempfile::NamedTempFile;

use crate::directive::{split_lines, Marker};
use crate::domain::{lookup_expr, DomainRegistry};
use crate::error::{Error, Result};

/// Reserved key listing the abstract domains to run.
pub const DOMAIN_KEY: &str = "AbstractDomain";

/// Result of migrating one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Full rewritten file content.
    pub text: String,
    /// Configuration keys emitted, in output order (excluding the domain list).
    pub keys: Vec<String>,
    /// Domain names, in document order.
    pub domains: Vec<String>,
    /// Whether ordinary lines were found between directive lines.
    pub interleaved: bool,
}

/// Migrates the directive block of `text`.
///
/// Keys are emitted in document order, followed by the domain list.
pub fn migrate(text: &str, marker: &Marker, registry: &DomainRegistry) -> Result<Migration> {
    let mut leading = String::new();
    let mut trailing = String::new();
    let mut document = String::new();
    let mut prefix: Option<&str> = None;
    let mut eol = "\n";
    let mut gap = false;
    let mut interleaved = false;

    for (i, line) in split_lines(text).enumerate() {
        match marker.find(line) {
            Some(m) => {
                if prefix.is_none() {
                    prefix = Some(m.prefix);
                    if line.ends_with("\r\n") {
                        eol = "\r\n";
                    }
                } else if gap && !interleaved {
                    warn!(
                        "line {}: directive after ordinary lines; merging it into the first block",
                        i + 1
                    );
                    interleaved = true;
                }
                document.push_str(m.payload);
                document.push('\n');
            }
            None if prefix.is_none() => leading.push_str(line),
            None => {
                trailing.push_str(line);
                gap = true;
            }
        }
    }

    let Some(prefix) = prefix else {
        return Err(Error::MissingKey(DOMAIN_KEY.to_string()));
    };
    debug!("directive document: {:?}", document);
    if document.trim().is_empty() {
        return Err(Error::MissingKey(DOMAIN_KEY.to_string()));
    }

    let mapping = match serde_yaml::from_str::<Value>(&document)? {
        Value::Mapping(mapping) => mapping,
        Value::Null => Default::default(),
        _ => return Err(Error::NotAMapping),
    };

    let mut entries = Vec::new();
    let mut domain_list = None;
    for (key, value) in mapping {
        let key = match key {
            Value::String(key) => key,
            other => return Err(Error::InvalidKey(format!("{:?}", other))),
        };
        if key == DOMAIN_KEY {
            domain_list = Some(value);
        } else {
            entries.push((key, value));
        }
    }
    let domain_list = domain_list.ok_or_else(|| Error::MissingKey(DOMAIN_KEY.to_string()))?;
    let domains = domain_names(domain_list)?;

    for name in &domains {
        match registry.lookup(name) {
            Some(info) => debug!("domain {}: {}", info.name, info.description),
            None => warn!(
                "unknown abstract domain {:?} (known: {})",
                name,
                registry.names().collect::<Vec<_>>().join(", ")
            ),
        }
    }

    let mut out = leading;
    let mut keys = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let value = serde_json::to_string(&value)?;
        out.push_str(&format!("{} config.{} = {}{}", prefix, key, value, eol));
        keys.push(key);
    }
    let lookups: Vec<String> = domains.iter().map(|d| lookup_expr(d)).collect();
    out.push_str(&format!(
        "{} config.{} = [{}]{}",
        prefix,
        DOMAIN_KEY,
        lookups.join(", "),
        eol
    ));
    out.push_str(&trailing);

    Ok(Migration {
        text: out,
        keys,
        domains,
        interleaved,
    })
}

fn domain_names(value: Value) -> Result<Vec<String>> {
    match value {
        Value::String(name) => Ok(vec![name]),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(name) => Ok(name),
                _ => Err(Error::InvalidDomainList(DOMAIN_KEY.to_string())),
            })
            .collect(),
        _ => Err(Error::InvalidDomainList(DOMAIN_KEY.to_string())),
    }
}

/// Migrates `path` in place.
///
/// The new content goes to a temporary file next to `path`, which then replaces it. If anything
/// fails, `path` is left untouched.
pub fn migrate_file(path: impl AsRef<Path>, marker: &Marker, registry: &DomainRegistry) -> Result<Migration> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let permissions = fs::metadata(path).map_err(|e| Error::io(path, e))?.permissions();

    let migration = migrate(&text, marker, registry)?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(migration.text.as_bytes())
        .map_err(|e| Error::io(tmp.path(), e))?;
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;

    debug!("rewrote {}", path.display());
    Ok(migration)
}
