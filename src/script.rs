//! Index scripts for local (file) contexts.
//!
//! When a site is opened straight from disk there is no origin to fetch
//! JSON from, so the site ships `search-index.js`: a script whose only
//! effect is to assign the document array to a well-known global, e.g.
//! `window.SEARCH_INDEX=[...];`. [`evaluate`] runs such a script against a
//! fresh [`Globals`] table. Only top-level assignments of JSON literals are
//! understood; anything else is a script error.

use std::collections::HashMap;

use serde_json::Value;

use crate::{
    document::Document,
    error::{Error, Result},
};

/// Global variable the site builder assigns the index to.
pub const DEFAULT_GLOBAL: &str = "SEARCH_INDEX";

const GLOBAL_OBJECTS: &[&str] = &["window.", "globalThis.", "self."];
const DECLARATIONS: &[&str] = &["var", "let", "const"];

/// Global variables populated by an evaluated script.
#[derive(Debug, Default)]
pub struct Globals {
    values: HashMap<String, Value>,
}

impl Globals {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Evaluate an index script, returning the globals it assigned.
///
/// Later assignments to the same name overwrite earlier ones.
pub fn evaluate(script: &str) -> Result<Globals> {
    let mut globals = Globals::default();
    let script = script.strip_prefix('\u{feff}').unwrap_or(script);
    let mut rest = skip_trivia(script);

    while !rest.is_empty() {
        let (name, after_eq) = assignment_target(rest)?;
        let (value, after_value) = assigned_value(name, after_eq)?;

        globals.values.insert(name.to_string(), value);
        rest = skip_trivia(after_value);
    }

    Ok(globals)
}

/// Render the script that assigns `documents` to `window.<global>`.
pub fn wrap_index(documents: &[Document], global: &str) -> Result<String> {
    if !is_identifier(global) {
        return Err(Error::Config(format!(
            "`{global}` is not a valid global variable name"
        )));
    }
    Ok(format!(
        "window.{global}={};",
        serde_json::to_string(documents)?
    ))
}

/// Parse `[var|let|const] [window.]NAME =` and return the name plus the
/// text after `=`.
fn assignment_target(input: &str) -> Result<(&str, &str)> {
    let mut s = input;

    for keyword in DECLARATIONS {
        if let Some(after) = s.strip_prefix(keyword)
            && after.starts_with(char::is_whitespace)
        {
            s = after.trim_start();
            break;
        }
    }
    for object in GLOBAL_OBJECTS {
        if let Some(after) = s.strip_prefix(object) {
            s = after;
            break;
        }
    }

    let end = s
        .find(|c: char| !is_identifier_char(c))
        .unwrap_or(s.len());
    let name = &s[..end];
    if !is_identifier(name) {
        return Err(Error::Script(format!(
            "expected an assignment near `{}`",
            preview(input)
        )));
    }

    let after_eq = s[end..]
        .trim_start()
        .strip_prefix('=')
        .filter(|after| !after.starts_with('='))
        .ok_or_else(|| {
            Error::Script(format!("expected `=` after `{name}`"))
        })?;

    Ok((name, after_eq))
}

/// Parse the JSON literal on the right of `=`.
///
/// Arrays, objects and strings delimit themselves; bare scalars run to the
/// end of the statement.
fn assigned_value<'a>(name: &str, input: &'a str) -> Result<(Value, &'a str)> {
    let input = input.trim_start();
    let invalid = |e: serde_json::Error| {
        Error::Script(format!("invalid value assigned to `{name}`: {e}"))
    };

    if input.starts_with(['[', '{', '"']) {
        let mut stream =
            serde_json::Deserializer::from_str(input).into_iter::<Value>();
        let value = match stream.next() {
            Some(result) => result.map_err(invalid)?,
            None => {
                return Err(Error::Script(format!(
                    "missing value for `{name}`"
                )));
            }
        };
        return Ok((value, &input[stream.byte_offset()..]));
    }

    let end = input.find([';', '\n']).unwrap_or(input.len());
    let value = serde_json::from_str(input[..end].trim()).map_err(invalid)?;
    Ok((value, &input[end..]))
}

/// Skip whitespace, statement separators and comments.
fn skip_trivia(mut s: &str) -> &str {
    loop {
        let trimmed = s.trim_start_matches(|c: char| c.is_whitespace() || c == ';');
        if let Some(comment) = trimmed.strip_prefix("//") {
            s = comment.find('\n').map_or("", |i| &comment[i + 1..]);
        } else if let Some(comment) = trimmed.strip_prefix("/*") {
            s = comment.find("*/").map_or("", |i| &comment[i + 2..]);
        } else {
            return trimmed;
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(is_identifier_char)
}

fn preview(s: &str) -> String {
    s.chars().take(24).collect()
}
