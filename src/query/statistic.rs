use std::fmt;
use std::str::FromStr;

use super::QueryError;

/// Per-bucket reducers. Each is a pure function over optional values where
/// `None` (and NaN) are skipped and an empty input reduces to `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Statistic {
    Min,
    Max,
    Mean,
    Median,
    Mode,
}

impl Statistic {
    pub const ALL: [Statistic; 5] = [
        Statistic::Min,
        Statistic::Max,
        Statistic::Mean,
        Statistic::Median,
        Statistic::Mode,
    ];

    /// Suffix used in composite output column names.
    pub fn name(&self) -> &'static str {
        match self {
            Statistic::Min => "min",
            Statistic::Max => "max",
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::Mode => "mode",
        }
    }

    pub fn reduce(&self, values: &[Option<f64>]) -> Option<f64> {
        match self {
            Statistic::Min => min(values),
            Statistic::Max => max(values),
            Statistic::Mean => mean(values),
            Statistic::Median => median(values),
            Statistic::Mode => mode(values),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Statistic {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Statistic::ALL
            .into_iter()
            .find(|stat| stat.name() == wanted)
            .ok_or_else(|| QueryError::UnknownStatistic(s.to_string()))
    }
}

/// Drops repeated statistics, keeping first-occurrence order.
pub fn dedup_statistics(stats: &[Statistic]) -> Vec<Statistic> {
    let mut out: Vec<Statistic> = Vec::with_capacity(stats.len());
    for stat in stats {
        if !out.contains(stat) {
            out.push(*stat);
        }
    }
    out
}

fn present(values: &[Option<f64>]) -> impl Iterator<Item = f64> + '_ {
    values.iter().flatten().copied().filter(|v| !v.is_nan())
}

fn sorted(values: &[Option<f64>]) -> Vec<f64> {
    let mut out: Vec<f64> = present(values).collect();
    out.sort_by(f64::total_cmp);
    out
}

pub fn min(values: &[Option<f64>]) -> Option<f64> {
    present(values).min_by(f64::total_cmp)
}

pub fn max(values: &[Option<f64>]) -> Option<f64> {
    present(values).max_by(f64::total_cmp)
}

pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = present(values).fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let sorted = sorted(values);
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
    }
}

/// Most frequent value; on a tie the lowest value wins.
pub fn mode(values: &[Option<f64>]) -> Option<f64> {
    let sorted = sorted(values);
    let mut best: Option<(f64, usize)> = None;

    let mut i = 0;
    while i < sorted.len() {
        let value = sorted[i];
        let mut run = 1;
        // -0.0 and 0.0 share a run
        while i + run < sorted.len() && sorted[i + run] == value {
            run += 1;
        }
        // strictly greater keeps the earlier (lower) value on ties
        if best.map_or(true, |(_, count)| run > count) {
            best = Some((value, run));
        }
        i += run;
    }

    best.map(|(value, _)| value)
}
