//! Conversion from TOML settings and CLI overrides to library types.

use std::sync::Arc;

use pyramid_transform::{
    ParallelScheduler, SchedulerConfig, TransformBuilder, TransformError, Transformer,
};

use crate::cli::Selection;
use crate::config::{DemoToml, ParallelToml};

/// Returns the scheduler settings, or `None` when parallelism is off.
///
/// A `--threads` flag turns the scheduler on regardless of the file.
pub fn build_scheduler_config(
    parallel: &ParallelToml,
    threads: Option<usize>,
) -> Option<SchedulerConfig> {
    if !parallel.enabled && threads.is_none() {
        return None;
    }
    Some(
        SchedulerConfig::new()
            .with_threads(threads.unwrap_or(parallel.threads))
            .with_min_len(parallel.min_len),
    )
}

/// Builds the transformer named by `selection`.
pub fn build_transformer(
    selection: &Selection,
    demo: &DemoToml,
    scheduler: Option<Arc<ParallelScheduler>>,
) -> Result<Transformer, TransformError> {
    let name = selection.kind.name();
    let mut builder = TransformBuilder::from_names(name, selection.wavelet.as_deref())?
        .with_arbitrary_length(demo.arbitrary_length);
    if let Some(s) = scheduler {
        builder = builder.with_scheduler(s);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyramid_transform::{Transform, TransformKind};

    #[test]
    fn scheduler_off_by_default() {
        assert!(build_scheduler_config(&ParallelToml::default(), None).is_none());
    }

    #[test]
    fn threads_flag_enables_scheduler() {
        let config = build_scheduler_config(&ParallelToml::default(), Some(3)).unwrap();
        assert_eq!(config.threads(), 3);
        assert_eq!(config.min_len(), 4);
    }

    #[test]
    fn file_settings_apply() {
        let parallel = ParallelToml {
            enabled: true,
            threads: 2,
            min_len: 8,
        };
        let config = build_scheduler_config(&parallel, None).unwrap();
        assert_eq!(config.threads(), 2);
        assert_eq!(config.min_len(), 8);
    }

    #[test]
    fn transformer_from_selection() {
        let selection = Selection {
            kind: TransformKind::WaveletPacket,
            wavelet: Some("db2".into()),
        };
        let demo = DemoToml {
            arbitrary_length: true,
            ..DemoToml::default()
        };
        let t = build_transformer(&selection, &demo, None).unwrap();
        assert_eq!(t.kind(), TransformKind::WaveletPacket);
        assert_eq!(t.forward(&[1.0, 2.0, 3.0]).unwrap().len(), 3);
    }

    #[test]
    fn wavelet_kind_without_wavelet_fails() {
        let selection = Selection {
            kind: TransformKind::FastWavelet,
            wavelet: None,
        };
        let err = build_transformer(&selection, &DemoToml::default(), None).unwrap_err();
        assert!(matches!(err, TransformError::MissingWavelet(_)));
    }
}
