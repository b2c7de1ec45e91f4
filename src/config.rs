use clap::ValueEnum;
use serde::Serialize;

use crate::engine::{ExecutorConfig, SeedSource};
use crate::error::{Error, Result};

/// Stride used by the strided bad-ma traversal unless overridden.
pub const DEFAULT_STRIDE: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Workload {
    /// Sum of `value[i] = i + 1` over an array of `size` elements.
    ArraySum,
    /// Mismatch count between two `size x size` matrices.
    MatrixCompare,
    /// Fill of a `size x size` matrix.
    MatrixInit,
}

impl Workload {
    pub const ALL: [Workload; 3] = [
        Workload::ArraySum,
        Workload::MatrixCompare,
        Workload::MatrixInit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Workload::ArraySum => "array-sum",
            Workload::MatrixCompare => "matrix-compare",
            Workload::MatrixInit => "matrix-init",
        }
    }

    pub fn is_matrix(&self) -> bool {
        matches!(self, Workload::MatrixCompare | Workload::MatrixInit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// No false sharing, no bad memory access
    Good,
    /// With false sharing
    BadFs,
    /// With inefficient memory access
    BadMa,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Good, Mode::BadFs, Mode::BadMa];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Good => "good",
            Mode::BadFs => "bad-fs",
            Mode::BadMa => "bad-ma",
        }
    }
}

/// How the array sum degrades memory locality in bad-ma mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Access {
    /// Visit elements in a shuffled order
    Random,
    /// Visit element `(i * stride) % size` at position `i`
    Strided,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub workload: Workload,
    pub mode: Mode,
    /// Element count for arrays, side length for matrices.
    pub size: usize,
    pub threads: usize,
    pub access: Access,
    pub stride: usize,
    pub seed: Option<u64>,
    /// Use a slot-free parallel reduction in good mode where the workload allows it.
    pub reduction: bool,
    pub pin_threads: bool,
}

impl RunConfig {
    pub fn new(workload: Workload, mode: Mode, size: usize, threads: usize) -> Self {
        Self {
            workload,
            mode,
            size,
            threads,
            access: Access::Random,
            stride: DEFAULT_STRIDE,
            seed: None,
            reduction: false,
            pin_threads: false,
        }
    }

    /// Rejects parameters that must never reach allocation or timing.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::ZeroSize);
        }
        if self.threads == 0 {
            return Err(Error::ZeroThreads);
        }
        if self.stride == 0 {
            return Err(Error::ZeroStride);
        }
        self.elements().map(|_| ())
    }

    /// Total number of elements the workload touches.
    pub fn elements(&self) -> Result<usize> {
        if self.workload.is_matrix() {
            self.size
                .checked_mul(self.size)
                .ok_or(Error::SizeOverflow { size: self.size })
        } else {
            Ok(self.size)
        }
    }

    pub fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            threads: self.threads,
            pin_threads: self.pin_threads,
        }
    }

    pub fn seed_source(&self) -> SeedSource {
        SeedSource::from_option(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config_passes() {
        let config = RunConfig::new(Workload::ArraySum, Mode::Good, 1000, 4);
        assert!(config.validate().is_ok());
        assert_eq!(config.elements().unwrap(), 1000);
    }

    #[test]
    fn zero_size_rejected() {
        let config = RunConfig::new(Workload::ArraySum, Mode::Good, 0, 4);
        assert!(matches!(config.validate(), Err(Error::ZeroSize)));
    }

    #[test]
    fn zero_threads_rejected() {
        let config = RunConfig::new(Workload::MatrixCompare, Mode::BadFs, 10, 0);
        assert!(matches!(config.validate(), Err(Error::ZeroThreads)));
    }

    #[test]
    fn zero_stride_rejected() {
        let mut config = RunConfig::new(Workload::ArraySum, Mode::BadMa, 10, 1);
        config.stride = 0;
        assert!(matches!(config.validate(), Err(Error::ZeroStride)));
    }

    #[test]
    fn matrix_size_is_squared() {
        let config = RunConfig::new(Workload::MatrixInit, Mode::Good, 30, 2);
        assert_eq!(config.elements().unwrap(), 900);
    }

    #[test]
    fn overflowing_matrix_side_rejected() {
        let config = RunConfig::new(Workload::MatrixCompare, Mode::Good, usize::MAX / 2, 2);
        assert!(matches!(
            config.validate(),
            Err(Error::SizeOverflow { .. })
        ));
    }

    #[test]
    fn mode_names_match_command_line() {
        for mode in Mode::ALL {
            let parsed = Mode::from_str(mode.as_str(), false).unwrap();
            assert_eq!(parsed, mode);
        }
        assert!(Mode::from_str("bad", false).is_err());
    }
}
