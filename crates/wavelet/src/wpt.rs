//! Wavelet Packet Transform (full binary tree).

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::WaveletError;
use crate::filter::WaveletFilter;
use crate::pyramid::{LevelTransform, check_level, dyadic_exponent, window_sizes};
use crate::step::{analyze_into, synthesize_into};

/// Packet transform: each step splits every band, not just the approximation.
///
/// At window size `h` the buffer is cut into `N / h` disjoint blocks and each
/// block is analyzed independently. The packet tree is never materialized;
/// a node's children occupy the same positions as the node itself.
#[derive(Clone, Debug)]
pub struct WaveletPacketTransform {
    filter: Arc<WaveletFilter>,
}

impl WaveletPacketTransform {
    /// Creates a packet transform over the given filter.
    pub fn new(filter: impl Into<Arc<WaveletFilter>>) -> Self {
        Self {
            filter: filter.into(),
        }
    }

    /// Returns the filter driving each step.
    pub fn filter(&self) -> &WaveletFilter {
        &self.filter
    }
}

impl LevelTransform for WaveletPacketTransform {
    fn max_level(&self, len: usize) -> Result<usize, WaveletError> {
        dyadic_exponent(len)
    }

    fn forward_in_place(&self, buf: &mut [f64], level: usize) -> Result<(), WaveletError> {
        let max = self.max_level(buf.len())?;
        check_level(buf.len(), level, max)?;

        let windows = window_sizes(buf.len(), level, self.filter.min_transform_length());
        debug!(len = buf.len(), level, steps = windows.len(), "wpt forward");
        let mut scratch = vec![0.0; buf.len()];
        for &h in &windows {
            trace!(window = h, blocks = buf.len() / h, "analysis step");
            for block in buf.chunks_exact_mut(h) {
                analyze_into(block, &self.filter, &mut scratch[..h]);
                block.copy_from_slice(&scratch[..h]);
            }
        }
        Ok(())
    }

    fn reverse_in_place(&self, buf: &mut [f64], level: usize) -> Result<(), WaveletError> {
        let max = self.max_level(buf.len())?;
        check_level(buf.len(), level, max)?;

        let windows = window_sizes(buf.len(), level, self.filter.min_transform_length());
        debug!(len = buf.len(), level, steps = windows.len(), "wpt reverse");
        let mut scratch = vec![0.0; buf.len()];
        for &h in windows.iter().rev() {
            trace!(window = h, blocks = buf.len() / h, "synthesis step");
            for block in buf.chunks_exact_mut(h) {
                synthesize_into(block, &self.filter, &mut scratch[..h]);
                block.copy_from_slice(&scratch[..h]);
            }
        }
        Ok(())
    }
}
