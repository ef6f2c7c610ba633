// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Aspect-preserving image fitting.

/// Displayed image size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedSize {
    pub width: f32,
    pub height: f32,
}

/// Scale `natural_width` x `natural_height` to respect both caps.
///
/// Two passes, in this order: first shrink to `max_width` if too wide, then
/// shrink the *result* to `max_height` if still too tall. Images are never
/// enlarged. The order is observable: a tall, narrow image can come out
/// narrower than a single min-ratio fit would give.
pub fn fit(natural_width: f32, natural_height: f32, max_width: f32, max_height: f32) -> FittedSize {
    let mut width = natural_width;
    let mut height = natural_height;

    if width > max_width {
        let scale = max_width / width;
        width *= scale;
        height *= scale;
    }

    if height > max_height {
        let scale = max_height / height;
        width *= scale;
        height *= scale;
    }

    FittedSize { width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn tall_image_scales_in_two_stages() {
        let size = fit(1000.0, 2000.0, 495.0, 300.0);
        assert!(close(size.width, 150.0), "width {}", size.width);
        assert!(close(size.height, 300.0), "height {}", size.height);
    }

    #[test]
    fn wide_image_only_needs_first_stage() {
        let size = fit(990.0, 200.0, 495.0, 300.0);
        assert!(close(size.width, 495.0));
        assert!(close(size.height, 100.0));
    }

    #[test]
    fn small_image_is_untouched() {
        assert_eq!(
            fit(120.0, 80.0, 495.0, 300.0),
            FittedSize {
                width: 120.0,
                height: 80.0
            }
        );
    }

    #[test]
    fn aspect_ratio_is_preserved() {
        for (w, h) in [(4000.0, 3000.0), (300.0, 1200.0), (495.0, 301.0), (10.0, 900.0)] {
            let size = fit(w, h, 495.0, 300.0);
            assert!(size.width <= 495.0 + 1e-3);
            assert!(size.height <= 300.0 + 1e-3);
            let natural = w / h;
            let fitted = size.width / size.height;
            assert!((natural - fitted).abs() / natural < 1e-4, "{w}x{h}");
        }
    }
}
