use serde::{Deserialize, Serialize};

use crate::OptionsError;

const DEFAULT_MAX_DEPTH: usize = 512;
// 8!: every ordering of an eight-element array is still enumerated.
const DEFAULT_PERMUTATION_LIMIT: usize = 40_320;

/// Configuration for a containment check.
///
/// Options are an immutable value; build one per call with the `with_*`
/// methods or decode one with [`ContainsOptions::from_json_str`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ContainsOptions {
    skip_containers: bool,
    array_strict_comparison: bool,
    max_depth: usize,
    permutation_limit: usize,
}

impl Default for ContainsOptions {
    fn default() -> Self {
        Self {
            skip_containers: true,
            array_strict_comparison: false,
            max_depth: DEFAULT_MAX_DEPTH,
            permutation_limit: DEFAULT_PERMUTATION_LIMIT,
        }
    }
}

impl ContainsOptions {
    /// Decodes options from a JSON object, filling in defaults for absent fields.
    ///
    /// ```
    /// # use contains_core::ContainsOptions;
    /// let opts = ContainsOptions::from_json_str(r#"{"arrayStrictComparison":true}"#)?;
    /// assert!(opts.array_strict_comparison());
    /// assert!(opts.skip_containers());
    /// # Ok::<(), contains_core::OptionsError>(())
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, OptionsError> {
        let options: Self =
            serde_json::from_str(input).map_err(|err| OptionsError::Json(err.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Whether match callbacks are suppressed for composite needle values.
    #[must_use]
    pub fn skip_containers(&self) -> bool {
        self.skip_containers
    }

    /// Whether arrays are compared strictly by position.
    #[must_use]
    pub fn array_strict_comparison(&self) -> bool {
        self.array_strict_comparison
    }

    /// Maximum needle depth before the check fails.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Maximum number of candidate pairings enumerated before the matcher
    /// switches to the assignment solver.
    #[must_use]
    pub fn permutation_limit(&self) -> usize {
        self.permutation_limit
    }

    /// Toggles suppression of match callbacks for composite needle values.
    ///
    /// ```
    /// # use contains_core::ContainsOptions;
    /// let opts = ContainsOptions::default().with_skip_containers(false);
    /// assert!(!opts.skip_containers());
    /// ```
    #[must_use]
    pub fn with_skip_containers(mut self, enabled: bool) -> Self {
        self.skip_containers = enabled;
        self
    }

    /// Toggles strict positional array comparison.
    #[must_use]
    pub fn with_array_strict_comparison(mut self, enabled: bool) -> Self {
        self.array_strict_comparison = enabled;
        self
    }

    /// Sets the maximum needle depth.
    ///
    /// ```
    /// # use contains_core::{ContainsOptions, OptionsError};
    /// assert_eq!(ContainsOptions::default().with_max_depth(0).unwrap_err(), OptionsError::ZeroMaxDepth);
    /// ```
    pub fn with_max_depth(mut self, depth: usize) -> Result<Self, OptionsError> {
        self.max_depth = depth;
        self.validate()?;
        Ok(self)
    }

    /// Sets the candidate enumeration limit of the unordered array matcher.
    pub fn with_permutation_limit(mut self, limit: usize) -> Result<Self, OptionsError> {
        self.permutation_limit = limit;
        self.validate()?;
        Ok(self)
    }

    pub(crate) fn validate(&self) -> Result<(), OptionsError> {
        if self.max_depth == 0 {
            return Err(OptionsError::ZeroMaxDepth);
        }
        if self.permutation_limit == 0 {
            return Err(OptionsError::ZeroPermutationLimit);
        }
        Ok(())
    }
}
