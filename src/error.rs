use thiserror::Error;

/// Errors that stop a benchmark run before its timed region starts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("size must be a positive integer")]
    ZeroSize,

    #[error("number of threads must be a positive integer")]
    ZeroThreads,

    #[error("stride must be a positive integer")]
    ZeroStride,

    /// A matrix side length whose square does not fit in the address space.
    #[error("matrix side length {size} is too large: size * size overflows")]
    SizeOverflow { size: usize },

    #[error("memory allocation failed for {what} ({elements} elements)")]
    Allocation { what: &'static str, elements: usize },

    #[error("failed to build the worker thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Allocates a vector of `len` elements produced by `fill`, reporting allocation
/// failure as an [`Error`] instead of aborting the process.
pub(crate) fn try_alloc_with<T>(
    what: &'static str,
    len: usize,
    fill: impl FnMut(usize) -> T,
) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| Error::Allocation { what, elements: len })?;
    buffer.extend((0..len).map(fill));
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_failure_is_reported() {
        let result = try_alloc_with::<u64>("huge buffer", usize::MAX / 2, |_| 0);
        assert!(matches!(
            result,
            Err(Error::Allocation {
                what: "huge buffer",
                ..
            })
        ));
    }

    #[test]
    fn fill_uses_index() {
        let buffer = try_alloc_with("small", 4, |i| i * 10).unwrap();
        assert_eq!(buffer, vec![0, 10, 20, 30]);
    }

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            Error::SizeOverflow { size: 7 }.to_string(),
            "matrix side length 7 is too large: size * size overflows"
        );
        assert_eq!(
            Error::ZeroThreads.to_string(),
            "number of threads must be a positive integer"
        );
    }
}
