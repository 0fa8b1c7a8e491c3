use std::cmp::Ordering;

/// Statistical reductions collapsing a sample sequence to one duration.
///
/// The reduced duration is the ranking key: the smaller it is, the faster
/// the endpoint answered for that input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reducer {
    Average,
    Median,
    /// Nearest-rank percentile; `p` in `0.0..=100.0`.
    Percentile(f64),
    Min,
    Max,
}

impl Reducer {
    /// Reduce `samples` to one duration; an empty slice reduces to `0.0`.
    pub fn apply(&self, samples: &[f64]) -> f64 {
        match self {
            Reducer::Average => {
                if samples.is_empty() {
                    0.0
                } else {
                    samples.iter().sum::<f64>() / samples.len() as f64
                }
            }
            Reducer::Median => percentile(samples, 50.0),
            Reducer::Percentile(p) => percentile(samples, *p),
            Reducer::Min => samples.iter().copied().reduce(f64::min).unwrap_or(0.0),
            Reducer::Max => samples.iter().copied().reduce(f64::max).unwrap_or(0.0),
        }
    }

    /// Parse a reducer name: `average`, `median`, `min`, `max`, or `pNN`
    /// (e.g. `p90` for the 90th percentile).
    pub fn from_name(name: &str) -> Option<Reducer> {
        match name {
            "average" => Some(Reducer::Average),
            "median" => Some(Reducer::Median),
            "min" => Some(Reducer::Min),
            "max" => Some(Reducer::Max),
            _ => {
                let p: f64 = name.strip_prefix('p')?.parse().ok()?;
                if (0.0..=100.0).contains(&p) {
                    Some(Reducer::Percentile(p))
                } else {
                    None
                }
            }
        }
    }

    /// Name for display; the inverse of `from_name`.
    pub fn as_name(&self) -> String {
        match self {
            Reducer::Average => "average".to_string(),
            Reducer::Median => "median".to_string(),
            Reducer::Percentile(p) => format!("p{}", p),
            Reducer::Min => "min".to_string(),
            Reducer::Max => "max".to_string(),
        }
    }
}

/// Sort `samples` ascending and return the element at index
/// `floor(p * n / 100)`, clamped to the last element (nearest-rank, no
/// interpolation). Returns 0.0 for an empty slice.
fn percentile(samples: &[f64], p: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let idx = (p * sorted.len() as f64 / 100.0).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
