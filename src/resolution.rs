//! Video resolutions and the per-aspect-ratio resolution catalogs.
//!
//! A resolution list is configured as a `,`-delimited string of `WIDTHxHEIGHT`
//! tokens. Malformed tokens are dropped one at a time; a list that yields no
//! valid token at all is replaced by the built-in list for its aspect ratio, so
//! a loaded [`ResolutionCatalog`] never holds an empty list.
//!
//! # Example
//!
//! ```
//! use media_config::resolution::{parse_resolution_list, Resolution};
//!
//! let (parsed, rejected) = parse_resolution_list("320x240,bogus,640x480");
//! assert_eq!(parsed, vec![Resolution::new(320, 240), Resolution::new(640, 480)]);
//! assert_eq!(rejected, vec!["bogus"]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::diagnostics::Diagnostics;
use crate::error::ConfigIssue;
use crate::store::ConfigStore;

/// Delimiter between tokens of a resolution list.
pub const RESOLUTION_LIST_DELIMITER: char = ',';

/// Built-in 4:3 resolution list.
pub const DEFAULT_RESOLUTION_LIST_4_3: &str =
    "320x240,400x300,512x384,640x480,1024x768,1152x864,1296x972,1640x1232";

/// Built-in 16:9 resolution list.
pub const DEFAULT_RESOLUTION_LIST_16_9: &str =
    "384x216,512x288,640x360,768x432,896x504,1024x576,1152x648,1280x720,1408x864,1920x1080";

/// A video frame size in pixels. Both dimensions are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Create a resolution. Callers that take dimensions from untrusted input
    /// should go through [`parse_resolution_token`], which rejects zero sizes.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels in one frame.
    pub fn pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_resolution_token(s).ok_or_else(|| format!("invalid resolution '{}'", s))
    }
}

impl From<Resolution> for String {
    fn from(resolution: Resolution) -> Self {
        resolution.to_string()
    }
}

impl TryFrom<String> for Resolution {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parse one `WIDTHxHEIGHT` token.
///
/// Surrounding whitespace is ignored. Exactly one `x` separator is accepted and
/// both sides must be positive integers.
pub fn parse_resolution_token(token: &str) -> Option<Resolution> {
    let (width, height) = token.trim().split_once('x')?;
    let width: u32 = width.trim().parse().ok()?;
    let height: u32 = height.trim().parse().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some(Resolution::new(width, height))
}

/// Split a delimited resolution list into parsed resolutions and rejected tokens.
///
/// Order of the input is preserved. Empty tokens (e.g. a trailing delimiter)
/// are neither parsed nor rejected.
pub fn parse_resolution_list(input: &str) -> (Vec<Resolution>, Vec<&str>) {
    let mut parsed = Vec::new();
    let mut rejected = Vec::new();

    for token in input.split(RESOLUTION_LIST_DELIMITER) {
        if token.trim().is_empty() {
            continue;
        }
        match parse_resolution_token(token) {
            Some(resolution) => parsed.push(resolution),
            None => rejected.push(token),
        }
    }

    (parsed, rejected)
}

/// The two supported aspect ratios, selected by `use_4_3_video_resolution`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 4:3
    #[serde(rename = "4:3")]
    Standard,
    /// 16:9
    #[serde(rename = "16:9")]
    Wide,
}

impl AspectRatio {
    /// Select the aspect ratio from the `use_4_3_video_resolution` flag.
    pub fn from_use_4_3(use_4_3: bool) -> Self {
        if use_4_3 {
            AspectRatio::Standard
        } else {
            AspectRatio::Wide
        }
    }

    /// Config key holding this aspect ratio's resolution list.
    pub fn list_key(&self) -> &'static str {
        match self {
            AspectRatio::Standard => "video_resolution_list_4_3",
            AspectRatio::Wide => "video_resolution_list_16_9",
        }
    }

    /// Built-in resolution list used when the configured one is empty or invalid.
    pub fn builtin_list(&self) -> &'static str {
        match self {
            AspectRatio::Standard => DEFAULT_RESOLUTION_LIST_4_3,
            AspectRatio::Wide => DEFAULT_RESOLUTION_LIST_16_9,
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectRatio::Standard => f.write_str("4:3"),
            AspectRatio::Wide => f.write_str("16:9"),
        }
    }
}

/// A non-empty, ordered list of resolutions for one aspect ratio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolutionList(Vec<Resolution>);

impl ResolutionList {
    /// The built-in list for `aspect`.
    pub fn builtin(aspect: AspectRatio) -> Self {
        let (parsed, _) = parse_resolution_list(aspect.builtin_list());
        Self(parsed)
    }

    /// Load the list for `aspect` from the store, falling back to the built-in
    /// list when the configured one is absent or yields no valid resolution.
    pub fn load(store: &dyn ConfigStore, aspect: AspectRatio, diag: &mut Diagnostics) -> Self {
        let key = aspect.list_key();
        let raw = store.get_string(key).unwrap_or_default();
        let (parsed, rejected) = parse_resolution_list(&raw);

        for token in rejected {
            diag.report(ConfigIssue::ResolutionTokenMalformed {
                key: key.to_string(),
                token: token.to_string(),
            });
        }

        if parsed.is_empty() {
            // an absent key is the normal case, only complain about configured garbage
            if !raw.trim().is_empty() {
                diag.report(ConfigIssue::ResolutionListEmpty {
                    key: key.to_string(),
                });
            }
            debug!(key, aspect = %aspect, "Using built-in resolution list");
            return Self::builtin(aspect);
        }

        debug!(key, count = parsed.len(), "Loaded resolution list");
        Self(parsed)
    }

    /// Whether `resolution` is in the list, by exact match on both dimensions.
    pub fn contains(&self, resolution: &Resolution) -> bool {
        self.0.iter().any(|r| r == resolution)
    }

    /// Iterate in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &Resolution> {
        self.0.iter()
    }

    /// First resolution in configured order.
    pub fn first(&self) -> Resolution {
        // lists are never empty: construction always falls back to a built-in list
        self.0[0]
    }

    /// Largest resolution by pixel count.
    pub fn max_resolution(&self) -> Resolution {
        self.0
            .iter()
            .copied()
            .max_by_key(Resolution::pixels)
            .unwrap_or_else(|| self.first())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never `true` for a list produced by [`ResolutionList::load`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in configured order.
    pub fn as_slice(&self) -> &[Resolution] {
        &self.0
    }
}

impl fmt::Display for ResolutionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self.0.iter().map(Resolution::to_string).collect();
        f.write_str(&tokens.join(","))
    }
}

/// Both resolution lists, one per aspect ratio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionCatalog {
    /// `video_resolution_list_4_3`.
    #[serde(rename = "4:3")]
    pub list_4_3: ResolutionList,
    /// `video_resolution_list_16_9`.
    #[serde(rename = "16:9")]
    pub list_16_9: ResolutionList,
}

impl Default for ResolutionCatalog {
    fn default() -> Self {
        Self {
            list_4_3: ResolutionList::builtin(AspectRatio::Standard),
            list_16_9: ResolutionList::builtin(AspectRatio::Wide),
        }
    }
}

impl ResolutionCatalog {
    /// Load both lists from the store.
    pub fn load(store: &dyn ConfigStore, diag: &mut Diagnostics) -> Self {
        Self {
            list_4_3: ResolutionList::load(store, AspectRatio::Standard, diag),
            list_16_9: ResolutionList::load(store, AspectRatio::Wide, diag),
        }
    }

    /// The list for `aspect`.
    pub fn list(&self, aspect: AspectRatio) -> &ResolutionList {
        match aspect {
            AspectRatio::Standard => &self.list_4_3,
            AspectRatio::Wide => &self.list_16_9,
        }
    }

    /// Whether `resolution` is supported under the active `aspect`. Only the
    /// active list is searched.
    pub fn validate_resolution(&self, aspect: AspectRatio, resolution: &Resolution) -> bool {
        self.list(aspect).contains(resolution)
    }
}
