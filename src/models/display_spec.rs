use acep_dither::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Geometry of the target panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySpec {
    pub width: u32,
    pub height: u32,
}

impl DisplaySpec {
    /// 5.65" 7-color ACeP panel: 600x448
    pub const ACEP_565: Self = Self {
        width: DISPLAY_WIDTH as u32,
        height: DISPLAY_HEIGHT as u32,
    };

    /// Size of one frame buffer, one code byte per pixel
    pub const fn frame_bytes(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for DisplaySpec {
    fn default() -> Self {
        Self::ACEP_565
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acep_frame_size() {
        let spec = DisplaySpec::default();
        assert_eq!((spec.width, spec.height), (600, 448));
        assert_eq!(spec.frame_bytes(), 268_800);
    }
}
