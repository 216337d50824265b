//! Identifier quoting
//!
//! Object names cannot be bound as statement parameters, so every
//! caller-supplied identifier passes through here before reaching SQL text.
//! Plain lowercase names pass through unchanged; anything else is
//! double-quoted with embedded quotes doubled. Empty names and embedded
//! NUL bytes are rejected outright.

use steward_core::ObjectName;

use crate::{Error, Result};

/// Quote a single identifier for safe inclusion in SQL text
pub fn quote_ident(name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(Error::InvalidIdentifier("empty identifier".to_string()));
    }
    if name.contains('\0') {
        return Err(Error::InvalidIdentifier(format!(
            "identifier contains NUL byte: {:?}",
            name
        )));
    }

    let plain = name
        .chars()
        .enumerate()
        .all(|(i, c)| match c {
            'a'..='z' | '_' | '$' => true,
            '0'..='9' => i > 0,
            _ => false,
        });

    if plain {
        Ok(name.to_string())
    } else {
        Ok(format!("\"{}\"", name.replace('"', "\"\"")))
    }
}

/// Quote a dotted path of identifiers (`part.part...`)
pub fn quote_path(parts: &[&str]) -> Result<String> {
    let quoted: Result<Vec<String>> = parts.iter().map(|p| quote_ident(p)).collect();
    Ok(quoted?.join("."))
}

/// Quote a fully qualified object name
pub fn quote_object(name: &ObjectName) -> Result<String> {
    quote_path(&[&name.database, &name.schema, &name.name])
}

/// Quote a relation reference that may already be schema-qualified
///
/// Output table names from configuration arrive as `table` or
/// `schema.table`; each dotted part is quoted individually.
pub fn quote_relation(name: &str) -> Result<String> {
    let parts: Vec<&str> = name.split('.').collect();
    quote_path(&parts)
}
