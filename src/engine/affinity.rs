use core_affinity::CoreId;

/// Cores available to this process, empty when the platform cannot report them.
pub fn core_ids() -> Vec<CoreId> {
    core_affinity::get_core_ids().unwrap_or_default()
}

/// Pins the calling thread to `cores[index]`, wrapping around when there are
/// more workers than cores.
pub fn pin_current(cores: &[CoreId], index: usize) -> bool {
    if cores.is_empty() {
        tracing::warn!(index, "no core ids available, worker left unpinned");
        return false;
    }

    let core = cores[index % cores.len()];
    let pinned = core_affinity::set_for_current(core);
    if !pinned {
        tracing::warn!(index, core = core.id, "failed to pin worker thread");
    }
    pinned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_core_list_leaves_thread_unpinned() {
        assert!(!pin_current(&[], 0));
    }

    #[test]
    fn pinning_in_a_scoped_thread() {
        let cores = core_ids();
        if cores.is_empty() {
            return;
        }

        std::thread::scope(|s| {
            s.spawn(|| {
                // Restricted sandboxes may refuse; either way this must not panic.
                let _ = pin_current(&cores, cores.len() + 1);
            });
        });
    }
}
