//! CPU time-bucket counters and utilization arithmetic.
//!
//! Pure functions only: no I/O, no async.

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::domain::error::SampleError;

/// Remote script that reads the aggregate CPU line twice, one second apart.
///
/// Both readings come back in a single stdout so the delta costs one round trip.
pub const CPU_SAMPLE_COMMAND: &str =
    "head -1 /proc/stat && sleep 1 > /dev/null && head -1 /proc/stat";

/// One reading of the kernel's aggregate CPU counters (`/proc/stat` first line).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CpuStat {
    pub user: f64,
    pub nice: f64,
    pub system: f64,
    pub idle: f64,
    pub iowait: f64,
    pub irq: f64,
    pub softirq: f64,
    pub steal: f64,
    pub guest: f64,
    pub guest_nice: f64,
}

/// Four-bucket summary of a raw [`CpuStat`] reading.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CpuStatShort {
    /// `user + nice`.
    pub user: f64,
    pub system: f64,
    pub idle: f64,
    pub iowait: f64,
}

/// Generates the elementwise helpers and operator impls shared by both shapes.
macro_rules! elementwise {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl $ty {
            fn zip_with(self, rhs: Self, f: impl Fn(f64, f64) -> f64) -> Self {
                Self { $($field: f(self.$field, rhs.$field)),+ }
            }

            fn map(self, f: impl Fn(f64) -> f64) -> Self {
                Self { $($field: f(self.$field)),+ }
            }

            /// Sum of every bucket.
            #[must_use]
            pub fn total(&self) -> f64 {
                0.0 $(+ self.$field)+
            }

            /// Round every bucket to `precision` decimal digits.
            #[must_use]
            pub fn round(self, precision: u8) -> Self {
                let factor = 10_f64.powi(i32::from(precision));
                self.map(|v| (v * factor).round() / factor)
            }
        }

        elementwise!(@op $ty, Add, add, +);
        elementwise!(@op $ty, Sub, sub, -);
        elementwise!(@op $ty, Mul, mul, *);
        elementwise!(@op $ty, Div, div, /);
    };
    (@op $ty:ident, $tr:ident, $method:ident, $op:tt) => {
        impl $tr for $ty {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                self.zip_with(rhs, |a, b| a $op b)
            }
        }

        impl $tr<f64> for $ty {
            type Output = Self;

            fn $method(self, rhs: f64) -> Self {
                self.map(|a| a $op rhs)
            }
        }
    };
}

elementwise!(CpuStat {
    user,
    nice,
    system,
    idle,
    iowait,
    irq,
    softirq,
    steal,
    guest,
    guest_nice,
});

elementwise!(CpuStatShort {
    user,
    system,
    idle,
    iowait,
});

impl CpuStat {
    /// Number of counters following the `cpu` label.
    pub const FIELD_COUNT: usize = 10;

    /// Build a reading from counters in `/proc/stat` column order.
    #[must_use]
    pub fn from_counters(c: [f64; Self::FIELD_COUNT]) -> Self {
        let [user, nice, system, idle, iowait, irq, softirq, steal, guest, guest_nice] = c;
        Self {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
            guest,
            guest_nice,
        }
    }

    /// Parse one stat line, e.g. `cpu  4705 356 584 3699 23 23 0 0 0 0`.
    ///
    /// The leading label token is discarded; exactly ten counters must follow.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::Malformed`] on a wrong token count or a
    /// non-numeric counter.
    pub fn parse_line(line: &str) -> Result<Self, SampleError> {
        let mut tokens = line.split_whitespace();
        if tokens.next().is_none() {
            return Err(SampleError::Malformed("empty stat line".to_string()));
        }

        let values = tokens
            .map(|t| {
                t.parse::<f64>()
                    .map_err(|_| SampleError::Malformed(format!("non-numeric counter {t:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let counters: [f64; Self::FIELD_COUNT] = values.try_into().map_err(|v: Vec<f64>| {
            SampleError::Malformed(format!(
                "expected {} counters, got {}",
                Self::FIELD_COUNT,
                v.len()
            ))
        })?;
        Ok(Self::from_counters(counters))
    }

    /// Percentage of time spent in each bucket between two readings.
    ///
    /// `earlier` and `later` must come from the same host, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::Degenerate`] when the counters did not advance
    /// (total delta of zero or less), instead of producing NaN.
    pub fn utilization(earlier: Self, later: Self) -> Result<Self, SampleError> {
        let delta = later - earlier;
        let total = delta.total();
        if total <= 0.0 || !total.is_finite() {
            return Err(SampleError::Degenerate);
        }
        Ok(delta / total * 100.0)
    }

    /// Parse the two-line output of [`CPU_SAMPLE_COMMAND`] into utilization.
    ///
    /// Lines past the second are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError`] when fewer than two lines are present, a line
    /// does not parse, or the delta is degenerate.
    pub fn utilization_from_output(stdout: &str) -> Result<Self, SampleError> {
        let mut lines = stdout.split('\n');
        let (Some(first), Some(second)) = (lines.next(), lines.next()) else {
            return Err(SampleError::Malformed(
                "expected two stat lines".to_string(),
            ));
        };
        Self::utilization(Self::parse_line(first)?, Self::parse_line(second)?)
    }

    /// Fold into the four-bucket summary.
    ///
    /// Only meaningful on a raw reading; a percentage result folds too, but
    /// the merged buckets then no longer add up to a reading.
    #[must_use]
    pub fn short(&self) -> CpuStatShort {
        CpuStatShort {
            user: self.user + self.nice,
            system: self.system,
            idle: self.idle,
            iowait: self.iowait,
        }
    }
}
