//! Marker based extraction over the raw text of the generated project files.
//!
//! Neither input is parsed as a grammar. Each extractor locates a fixed
//! marker, isolates the line it sits on and slices the fields out of it.

use thiserror::Error;

/// Marks the include path list in `.mxproject`.
pub const HEADER_PATH_MARKER: &str = "HeaderPath=";

/// Compiler invocation whose line carries the preprocessor defines.
pub const COMPILER_MARKER: &str = "arm-none-eabi-gcc";

const DEFINE_PREFIX: &str = "-D";
const QUOTES: [char; 2] = ['"', '\''];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("marker `{marker}` not found")]
    MarkerNotFound { marker: &'static str },
    #[error("no line break after marker `{marker}`")]
    DelimiterNotFound { marker: &'static str },
    #[error("marker `{marker}` is present but lists no entries")]
    EmptyResult { marker: &'static str },
}

/// Returns the `;` separated fragments of the `HeaderPath=` line, in order.
///
/// Empty fragments (a trailing `;` is common) are dropped. A marker that
/// yields no fragment at all is an error rather than an empty list.
pub fn header_paths(blob: &str) -> Result<Vec<String>, ExtractError> {
    let start = blob
        .find(HEADER_PATH_MARKER)
        .ok_or(ExtractError::MarkerNotFound {
            marker: HEADER_PATH_MARKER,
        })?;
    let rest = &blob[start + HEADER_PATH_MARKER.len()..];

    let end = rest.find('\n').ok_or(ExtractError::DelimiterNotFound {
        marker: HEADER_PATH_MARKER,
    })?;
    let field = rest[..end].trim_end_matches('\r');

    let paths: Vec<String> = field
        .split(';')
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_owned)
        .collect();

    if paths.is_empty() {
        return Err(ExtractError::EmptyResult {
            marker: HEADER_PATH_MARKER,
        });
    }
    Ok(paths)
}

/// Returns the names of every `-D<NAME>` token on the compiler invocation line.
///
/// Only the first line mentioning the compiler is considered. The line ends at
/// the next `\n` or at the end of the blob, and a token ends at whitespace or
/// at the end of the line. A quoted `"-DNAME"` loses its quotes.
/// `-DNAME=VALUE` is returned as `NAME=VALUE`.
pub fn define_flags(blob: &str) -> Result<Vec<String>, ExtractError> {
    let start = blob
        .find(COMPILER_MARKER)
        .ok_or(ExtractError::MarkerNotFound {
            marker: COMPILER_MARKER,
        })?;
    let line = &blob[start..];
    let line = match line.find('\n') {
        Some(end) => &line[..end],
        None => line,
    };

    let mut defines = Vec::new();
    let mut rest = line;
    while let Some(pos) = rest.find(DEFINE_PREFIX) {
        let before = rest[..pos].chars().next_back();
        let quote = before.filter(|c| QUOTES.contains(c));
        // `-D` inside another token (a path such as `../X-Dir`) is not a define
        let starts_token = before.map_or(true, char::is_whitespace) || quote.is_some();

        let after = &rest[pos + DEFINE_PREFIX.len()..];
        let end = after.find(char::is_whitespace).unwrap_or(after.len());
        let token = &after[..end];
        let name = match quote {
            Some(q) => token.strip_suffix(q).unwrap_or(token),
            None => token,
        };

        if !starts_token {
            log::debug!("Skipping -D{} embedded in another argument", token);
        } else if !name.is_empty() {
            defines.push(name.to_owned());
        }
        rest = &after[end..];
    }

    Ok(defines)
}
