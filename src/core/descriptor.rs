//! Destination descriptor parsing
//!
//! A descriptor selects where records go and how the sink behaves:
//!
//! ```text
//! file:///var/log/app,rotate=day,level=INF
//! ```
//!
//! The first comma-separated segment is `scheme://uri`; every further segment
//! is a `key=value` option. Only the `file` scheme and the `rotate` and `level`
//! options are recognized. Nothing is trimmed.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const SCHEME_SEPARATOR: &str = "://";
const ROTATE_KEY: &str = "rotate";
const LEVEL_KEY: &str = "level";

/// Destination scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    File,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::File => "file",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of the `rotate` option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    /// Rotate at local day boundaries
    Day,
    /// Plain append-mode file
    #[default]
    None,
}

impl FromStr for Rotation {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "day" => Ok(Rotation::Day),
            "none" => Ok(Rotation::None),
            _ => Err(LoggerError::invalid_rotation(s)),
        }
    }
}

/// A parsed destination descriptor
///
/// # Examples
///
/// ```
/// use logurl::{Destination, Rotation};
///
/// let dest: Destination = "file:///var/log/app,rotate=day,level=INF".parse().unwrap();
/// assert_eq!(dest.uri, "/var/log/app");
/// assert_eq!(dest.rotation(), Rotation::Day);
/// assert_eq!(dest.level(), Some("INF"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub scheme: Scheme,
    /// Everything after `://` up to the first comma, verbatim
    pub uri: String,
    /// Option segments; a repeated key keeps its last value
    pub options: BTreeMap<String, String>,
}

impl Destination {
    /// The sink flavour requested by the `rotate` option
    ///
    /// The value was validated during parsing, so an unexpected value cannot
    /// appear here unless the struct was built by hand; it falls back to
    /// [`Rotation::None`].
    pub fn rotation(&self) -> Rotation {
        self.options
            .get(ROTATE_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Raw value of the `level` option, validated by `Logger::init`
    pub fn level(&self) -> Option<&str> {
        self.options.get(LEVEL_KEY).map(String::as_str)
    }
}

impl FromStr for Destination {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Split a descriptor into scheme, uri and options.
///
/// # Errors
///
/// - [`LoggerError::MalformedDescriptor`] if the first segment is not exactly
///   `scheme://uri`, or an option segment is empty
/// - [`LoggerError::UnsupportedScheme`] for any scheme other than `file`
/// - [`LoggerError::InvalidOptionPair`] if an option is not exactly one `key=value`
/// - [`LoggerError::UnknownOption`] for keys other than `rotate` and `level`
/// - [`LoggerError::InvalidRotation`] if the last `rotate` is neither `day` nor `none`
pub fn parse(descriptor: &str) -> Result<Destination> {
    let mut segments = descriptor.split(',');
    let head = segments.next().unwrap_or_default();

    let parts: Vec<&str> = head.split(SCHEME_SEPARATOR).collect();
    let [scheme, uri] = parts[..] else {
        return Err(LoggerError::malformed(
            descriptor,
            "first segment must have the form scheme://uri",
        ));
    };

    let scheme = match scheme {
        "file" => Scheme::File,
        other => return Err(LoggerError::unsupported_scheme(other, descriptor)),
    };

    let mut options = BTreeMap::new();
    for segment in segments {
        if segment.is_empty() {
            return Err(LoggerError::malformed(descriptor, "empty option segment"));
        }

        let pair: Vec<&str> = segment.split('=').collect();
        let [key, value] = pair[..] else {
            return Err(LoggerError::invalid_pair(segment, descriptor));
        };

        if key != ROTATE_KEY && key != LEVEL_KEY {
            return Err(LoggerError::unknown_option(key, descriptor));
        }

        options.insert(key.to_string(), value.to_string());
    }

    // Like `level`, only the value that wins is checked
    if let Some(value) = options.get(ROTATE_KEY) {
        value.parse::<Rotation>()?;
    }

    Ok(Destination {
        scheme,
        uri: uri.to_string(),
        options,
    })
}
