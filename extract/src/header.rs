//! Command heading splitter.
//!
//! A command heading is the text of an `<h1>` on the help page, e.g.
//! `\param [(dir)] <parameter-name> { parameter description }`. This module
//! splits it into the bare command name and its parameter specification.

use doxy_commands_core::COMMAND_ESCAPE;

use crate::error::{ExtractError, Result};

/// Splits a heading into `(name, parameters)`.
///
/// The heading must start with the command escape character, which is not
/// part of the returned name. The name ends at the first space or `[`:
/// a separating space is consumed, a `[` is kept as the start of the
/// parameter text (it opens an optional-parameter group). The formula
/// command `\f[` is special-cased because its bracket belongs to the
/// name itself.
///
/// # Examples
///
/// ```
/// use doxy_commands_extract::header::split_command_header;
///
/// let (name, params) = split_command_header("\\param [(dir)] <parameter-name>").unwrap();
/// assert_eq!(name, "param");
/// assert_eq!(params, "[(dir)] <parameter-name>");
///
/// let (name, params) = split_command_header("\\a <word>").unwrap();
/// assert_eq!((name, params.as_str()), ("a".to_string(), "<word>"));
///
/// let (name, params) = split_command_header("\\brief").unwrap();
/// assert_eq!((name.as_str(), params.as_str()), ("brief", ""));
/// ```
pub fn split_command_header(heading: &str) -> Result<(String, String)> {
    let Some(rest) = heading.strip_prefix(COMMAND_ESCAPE) else {
        return Err(ExtractError::MalformedHeader(heading.to_string()));
    };

    if rest == "f[" {
        return Ok((rest.to_string(), String::new()));
    }

    let space = rest.find(' ');
    let bracket = rest.find('[');
    match (space, bracket) {
        // `[` before any space: the bracket starts the parameters and is kept.
        (Some(space), Some(bracket)) if bracket < space => {
            Ok((rest[..bracket].to_string(), rest[bracket..].to_string()))
        }
        (None, Some(bracket)) => Ok((rest[..bracket].to_string(), rest[bracket..].to_string())),
        // Separating space: consumed, not part of either side.
        (Some(space), _) => Ok((rest[..space].to_string(), rest[space + 1..].to_string())),
        (None, None) => Ok((rest.to_string(), String::new())),
    }
}
