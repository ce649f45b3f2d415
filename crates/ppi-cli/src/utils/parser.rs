use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid chain identifier '{0}'. Expected a single character (use '_' for a blank chain).")]
    InvalidChainId(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },
}

/// Parses a chain identifier argument.
///
/// PDB chain identifiers are a single character. The placeholder `_` stands
/// for the blank chain, which cannot be typed reliably on a command line.
pub fn parse_chain_id(input: &str) -> Result<char, ParseError> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some('_'), None) => Ok(' '),
        (Some(c), None) if !c.is_whitespace() => Ok(c),
        _ => Err(ParseError::InvalidChainId(input.to_string())),
    }
}

/// Splits a `KEY=VALUE` override into its trimmed parts.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidKeyValue(input.to_string()))?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            input: input.to_string(),
        });
    }
    if value.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "value",
            input: input.to_string(),
        });
    }
    Ok((key, value))
}
