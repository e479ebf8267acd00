//! Clustering and heading-detection configuration.
//!
//! The outline and section pipelines use different parameters: the
//! outline favours tight lines, the section pipeline favours complete
//! section bodies.

/// Vertical tolerance for outline line clustering, in points.
pub const OUTLINE_Y_TOLERANCE: f32 = 2.0;

/// Vertical tolerance for section line clustering, in points.
pub const SECTION_Y_TOLERANCE: f32 = 3.0;

/// Minimum run length for the outline character-run join.
pub const OUTLINE_MIN_CHAR_RUN: usize = 3;

/// Number of distinct font sizes treated as heading sizes.
pub const HEADING_SIZE_COUNT: usize = 3;

/// Which span of an open bucket a new span is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BucketAnchor {
    /// The first span placed in the bucket
    #[default]
    First,
    /// The most recently placed span (lets a bucket drift downward)
    Latest,
}

/// When a line's spans are concatenated without separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinRule {
    /// Every span is a single character and there are at least `min_spans`
    AllSingleChars {
        /// Minimum number of spans
        min_spans: usize,
    },
    /// More than half of the spans (integer half) are single characters
    MajoritySingleChars,
}

impl JoinRule {
    /// Decide whether spans with these texts form a character run.
    pub fn is_char_run<'a>(&self, texts: impl IntoIterator<Item = &'a str>) -> bool {
        let lengths: Vec<usize> = texts.into_iter().map(|t| t.chars().count()).collect();
        let singles = lengths.iter().filter(|&&n| n == 1).count();
        match *self {
            JoinRule::AllSingleChars { min_spans } => {
                singles == lengths.len() && lengths.len() >= min_spans
            }
            JoinRule::MajoritySingleChars => singles > lengths.len() / 2,
        }
    }
}

/// Options for grouping spans into lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterOptions {
    /// Maximum (exclusive) `y0` distance to the bucket anchor
    pub y_tolerance: f32,
    /// Bucket anchor
    pub anchor: BucketAnchor,
    /// Character-run join rule
    pub join_rule: JoinRule,
}

impl ClusterOptions {
    /// Parameters of the outline pipeline.
    pub fn outline() -> Self {
        Self {
            y_tolerance: OUTLINE_Y_TOLERANCE,
            anchor: BucketAnchor::First,
            join_rule: JoinRule::AllSingleChars {
                min_spans: OUTLINE_MIN_CHAR_RUN,
            },
        }
    }

    /// Parameters of the section pipeline.
    pub fn sections() -> Self {
        Self {
            y_tolerance: SECTION_Y_TOLERANCE,
            anchor: BucketAnchor::Latest,
            join_rule: JoinRule::MajoritySingleChars,
        }
    }

    /// Set the vertical tolerance.
    pub fn with_y_tolerance(mut self, tolerance: f32) -> Self {
        self.y_tolerance = tolerance;
        self
    }
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self::outline()
    }
}

/// Heading heuristics of the section pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCriteria {
    /// Minimum words of a strict heading
    pub min_words: usize,
    /// Maximum words of a strict heading
    pub max_words: usize,
    /// Maximum characters of a strict heading
    pub max_chars: usize,
    /// Characters a strict heading may not end with
    pub forbidden_endings: Vec<char>,
    /// Maximum words of a fallback heading
    pub fallback_max_words: usize,
    /// Sections kept per document; fewer strict sections trigger the fallback
    pub section_limit: usize,
}

impl HeadingCriteria {
    /// Create criteria with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strict word bounds.
    pub fn with_word_range(mut self, min: usize, max: usize) -> Self {
        self.min_words = min;
        self.max_words = max;
        self
    }

    /// Set the strict character limit.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Set the per-document section limit.
    pub fn with_section_limit(mut self, limit: usize) -> Self {
        self.section_limit = limit;
        self
    }
}

impl Default for HeadingCriteria {
    fn default() -> Self {
        Self {
            min_words: 2,
            max_words: 4,
            max_chars: 40,
            forbidden_endings: vec!['.', ':', ';'],
            fallback_max_words: 8,
            section_limit: 5,
        }
    }
}
