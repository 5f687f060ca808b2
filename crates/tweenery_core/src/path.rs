//! Path-string parsing and interpolation
//!
//! A path is a list of segments, each a single command letter followed by
//! numeric arguments: `"M 0,0 L 10 20 Z"`. Arguments may be separated by
//! whitespace, commas, or both.

use std::fmt;

use smallvec::SmallVec;
use tracing::debug;

use crate::error::{Error, Result};
use crate::interpolate::interpolate;

/// One `(command, args...)` tuple of a path
#[derive(Clone, Debug, PartialEq)]
pub struct PathSegment {
    /// Command letter (`M`, `L`, `c`, ...)
    pub command: char,
    /// Numeric arguments in source order
    pub args: SmallVec<[f64; 6]>,
}

impl PathSegment {
    pub fn new(command: char, args: impl IntoIterator<Item = f64>) -> Self {
        Self {
            command,
            args: args.into_iter().collect(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command)?;
        for (i, arg) in self.args.iter().enumerate() {
            let sep = if i == 0 { ' ' } else { ',' };
            write!(f, "{sep}{arg}")?;
        }
        Ok(())
    }
}

/// Split a path string into segments.
///
/// A run of letters starts a new segment and its first letter becomes the
/// command. Every letter is a command letter, so exponent notation such as
/// `1e2` is not supported.
pub fn parse_path(src: &str) -> Result<Vec<PathSegment>> {
    let mut chunks: Vec<(char, &str)> = Vec::new();
    let mut command: Option<char> = None;
    let mut body_start = 0;
    let mut prev: Option<char> = None;

    for (i, c) in src.char_indices() {
        if c.is_ascii_alphabetic() {
            if prev.is_some_and(|p| p.is_ascii_alphabetic()) {
                // Rest of a letter run belongs to the same command
                body_start = i + c.len_utf8();
            } else {
                match command {
                    Some(cmd) => chunks.push((cmd, &src[body_start..i])),
                    None => {
                        if let Some(token) = src[..i].split_whitespace().next() {
                            debug!(path = src, "Path data before first command");
                            return Err(Error::InvalidNumber {
                                segment: 0,
                                token: token.to_string(),
                            });
                        }
                    }
                }
                command = Some(c);
                body_start = i + c.len_utf8();
            }
        }
        prev = Some(c);
    }
    if let Some(cmd) = command {
        chunks.push((cmd, &src[body_start..]));
    }

    chunks
        .into_iter()
        .enumerate()
        .map(|(segment, (command, body))| {
            let args = body
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
                .map(|token| {
                    token.parse::<f64>().map_err(|_| {
                        debug!(path = src, token, "Failed to parse path argument");
                        Error::InvalidNumber {
                            segment,
                            token: token.to_string(),
                        }
                    })
                })
                .collect::<Result<SmallVec<[f64; 6]>>>()?;
            Ok(PathSegment { command, args })
        })
        .collect()
}

/// Interpolate two paths segment by segment.
///
/// Segments are paired by position, not by command letter; the output uses
/// the commands of `from`. Both paths must have the same number of segments
/// and the same argument count per segment.
pub fn interpolate_path(progress: f64, from: &str, to: &str) -> Result<String> {
    let from = parse_path(from)?;
    let to = parse_path(to)?;

    if from.len() != to.len() {
        return Err(Error::PathLengthMismatch {
            expected: from.len(),
            found: to.len(),
        });
    }

    let mut out = Vec::with_capacity(from.len());
    for (segment, (a, b)) in from.iter().zip(&to).enumerate() {
        if a.args.len() != b.args.len() {
            return Err(Error::PathShapeMismatch {
                segment,
                expected: a.args.len(),
                found: b.args.len(),
            });
        }
        let args = a
            .args
            .iter()
            .zip(&b.args)
            .map(|(&x, &y)| interpolate(progress, x, y));
        out.push(PathSegment::new(a.command, args).to_string());
    }

    Ok(out.join(" "))
}
