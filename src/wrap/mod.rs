//! Reflowing free-form text into fixed-width printer lines.
//!
//! [`wrap`] splits the input on line breaks, keeps blank lines as empty
//! output lines and folds every other line greedily to the column limit.
//! Every call is independent: no state survives between invocations.

mod fold;
mod line;

pub use fold::fold_fullwidth;

use line::LineWrapper;
use std::borrow::Cow;
use tracing::debug;

/// Column limit used by the label printer when nothing else is configured.
pub const DEFAULT_MAX_WIDTH: i64 = 27;

/// How many trailing code points of a full line are searched for a word break.
pub const DEFAULT_LOOKBACK: usize = 10;

/// Marker appended to a line that had to be broken mid-word.
pub const DEFAULT_HYPHEN: &str = "-";

/// Fullwidth forms are narrowed unless a caller opts out.
pub const DEFAULT_FOLD_FULLWIDTH: bool = true;

/// Tunables for [`wrap_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapOptions {
    /// Column limit. Zero or negative disables wrapping entirely.
    pub max_width: i64,
    /// Size of the word-break search window, in code points.
    pub lookback: usize,
    /// Appended on forced hyphenation.
    pub hyphen: String,
    /// Narrow Fullwidth forms before measuring.
    pub fold_fullwidth: bool,
}

impl WrapOptions {
    pub fn new(max_width: i64) -> Self {
        Self {
            max_width,
            ..Self::default()
        }
    }

    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn with_hyphen(mut self, hyphen: impl Into<String>) -> Self {
        self.hyphen = hyphen.into();
        self
    }

    pub fn with_fold_fullwidth(mut self, fold: bool) -> Self {
        self.fold_fullwidth = fold;
        self
    }
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            lookback: DEFAULT_LOOKBACK,
            hyphen: DEFAULT_HYPHEN.to_string(),
            fold_fullwidth: DEFAULT_FOLD_FULLWIDTH,
        }
    }
}

/// Wraps `text` to `max_width` columns with the default look-back window
/// and hyphen marker.
///
/// ```
/// use labelwrap::wrap;
///
/// assert_eq!(wrap("Hello world this is a test", 15), vec!["Hello world", "this is a test"]);
/// assert_eq!(wrap("Hello world", 0), vec!["Hello world"]);
/// ```
pub fn wrap(text: &str, max_width: i64) -> Vec<String> {
    wrap_with(text, &WrapOptions::new(max_width))
}

/// Wraps `text` according to `options`.
///
/// The result is never empty. With `max_width <= 0` the text comes back
/// untouched as a single element.
pub fn wrap_with(text: &str, options: &WrapOptions) -> Vec<String> {
    let max_width = match usize::try_from(options.max_width) {
        Ok(width) if width > 0 => width,
        _ => {
            debug!(max_width = options.max_width, "wrapping disabled");
            return vec![text.to_string()];
        }
    };

    let mut lines = Vec::new();
    for logical in text.split('\n') {
        let logical = logical.trim();
        if logical.is_empty() {
            lines.push(String::new());
            continue;
        }

        let logical: Cow<'_, str> = if options.fold_fullwidth {
            fold_fullwidth(logical)
        } else {
            Cow::Borrowed(logical)
        };
        let wrapper = LineWrapper::new(max_width, options.lookback, &options.hyphen);
        lines.extend(wrapper.wrap(&logical));
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    debug!(lines = lines.len(), max_width, "text wrapped");
    lines
}
