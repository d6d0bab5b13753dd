//! Sticky header.

use super::ClassDelta;
use crate::config::HeaderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    Expanded,
    Compact,
}

impl HeaderMode {
    /// Compact once the page has scrolled strictly past `threshold_px`.
    #[must_use]
    pub fn for_offset(offset_px: f64, threshold_px: f64) -> Self {
        if offset_px > threshold_px {
            Self::Compact
        } else {
            Self::Expanded
        }
    }
}

#[must_use]
pub fn header_classes(mode: HeaderMode, cfg: &HeaderConfig) -> ClassDelta {
    match mode {
        HeaderMode::Compact => ClassDelta::swap(&cfg.compact_classes, &cfg.expanded_classes),
        HeaderMode::Expanded => ClassDelta::swap(&cfg.expanded_classes, &cfg.compact_classes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(HeaderMode::for_offset(0.0, 50.0), HeaderMode::Expanded);
        assert_eq!(HeaderMode::for_offset(50.0, 50.0), HeaderMode::Expanded);
        assert_eq!(HeaderMode::for_offset(50.5, 50.0), HeaderMode::Compact);
        assert_eq!(HeaderMode::for_offset(900.0, 50.0), HeaderMode::Compact);
    }

    #[test]
    fn compact_swaps_backgrounds() {
        let cfg = HeaderConfig::default();
        let delta = header_classes(HeaderMode::Compact, &cfg);
        assert_eq!(delta.add.as_slice(), ["py-0", "bg-brand-dark/95", "shadow-lg"]);
        assert_eq!(delta.remove.as_slice(), ["bg-brand-dark/85"]);

        let back = header_classes(HeaderMode::Expanded, &cfg);
        assert_eq!(back.add.as_slice(), ["bg-brand-dark/85"]);
        assert_eq!(back.remove.len(), 3);
    }
}
