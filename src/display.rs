//! Conversions between simulation meters and screen pixels
//!
//! The renderer is not part of this crate. These helpers perform the scaling
//! a 2D renderer needs: fitting the padded largest distance into the viewport,
//! flipping the y axis about the viewport center, and clamping body sizes so
//! that a star does not cover the screen and a spacecraft stays visible.

use crate::config::RenderingConfig;
use crate::physics::math::{Scalar, Vector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScale {
    pub meters_per_pixel: Scalar,
    /// Width and height of the square viewport
    pub viewport_pixels: Scalar,
    minimum_size_pixels: Scalar,
    maximum_size_pixels: Scalar,
}

impl DisplayScale {
    /// Scale such that `largest_distance_meters` spans `margin / 2` viewports
    ///
    /// Returns `None` when the inputs cannot produce a finite positive scale.
    pub fn fit(
        largest_distance_meters: Scalar,
        viewport_pixels: Scalar,
        rendering: &RenderingConfig,
    ) -> Option<Self> {
        let meters_per_pixel =
            rendering.viewport_margin_factor * largest_distance_meters / viewport_pixels;

        if !meters_per_pixel.is_finite() || meters_per_pixel <= 0.0 {
            return None;
        }

        Some(Self {
            meters_per_pixel,
            viewport_pixels,
            minimum_size_pixels: rendering.minimum_size_pixels,
            maximum_size_pixels: rendering.maximum_size_pixels,
        })
    }

    /// Screen position of a simulation position, origin at the top left
    pub fn to_pixels(&self, position: Vector) -> Vector {
        let center = self.viewport_pixels / 2.0;

        Vector::new(
            center + position.x / self.meters_per_pixel,
            center - position.y / self.meters_per_pixel,
        )
    }

    /// Simulation position under a screen position
    pub fn to_meters(&self, pixels: Vector) -> Vector {
        let center = self.viewport_pixels / 2.0;

        Vector::new(
            (pixels.x - center) * self.meters_per_pixel,
            (center - pixels.y) * self.meters_per_pixel,
        )
    }

    /// Drawn diameter of a body, clamped to the configured pixel range
    pub fn body_size_pixels(&self, diameter_meters: Scalar) -> Scalar {
        let size = diameter_meters / self.meters_per_pixel;

        if size.is_nan() {
            return self.minimum_size_pixels;
        }

        size.clamp(self.minimum_size_pixels, self.maximum_size_pixels)
    }

    pub fn body_sizes_pixels(&self, diameters_meters: &[Scalar]) -> Vec<Scalar> {
        diameters_meters
            .iter()
            .map(|&diameter| self.body_size_pixels(diameter))
            .collect()
    }
}
