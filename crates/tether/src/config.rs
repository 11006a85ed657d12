//! Configuration types for Tether layouts.
//!
//! All types implement [`serde::Deserialize`] with every field optional, so a
//! partial configuration file only overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the layout kind and its options.
//! - [`LayoutOptions`] - Canvas size and force-simulation parameters.
//!
//! # Example
//!
//! ```
//! # use tether::config::{AppConfig, LayoutOptions};
//! let config = AppConfig::default();
//! assert_eq!(config.layout().iterations(), 300);
//!
//! let options = LayoutOptions::default().with_canvas(800.0, 600.0);
//! assert_eq!(options.width(), 800.0);
//! ```

use serde::Deserialize;

use tether_core::geometry::Point;

use crate::layout::LayoutKind;

/// Top-level configuration combining the layout kind and its options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout options section.
    #[serde(default)]
    layout: LayoutOptions,

    /// Which layout algorithm to run.
    #[serde(default)]
    engine: LayoutKind,
}

impl AppConfig {
    /// Creates a new [`AppConfig`].
    ///
    /// # Arguments
    ///
    /// * `layout` - Canvas and simulation parameters.
    /// * `engine` - Layout algorithm selection.
    pub fn new(layout: LayoutOptions, engine: LayoutKind) -> Self {
        Self { layout, engine }
    }

    /// Returns the layout options.
    pub fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    /// Returns the configured [`LayoutKind`].
    pub fn engine(&self) -> LayoutKind {
        self.engine
    }

    /// Returns the configuration with a different [`LayoutKind`].
    pub fn with_engine(mut self, engine: LayoutKind) -> Self {
        self.engine = engine;
        self
    }
}

/// Canvas size and force-simulation parameters shared by every layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Canvas width; layouts center on `width / 2`.
    width: f32,
    /// Canvas height; layouts center on `height / 2`.
    height: f32,
    /// Number of relaxation steps the force simulation runs.
    iterations: usize,
    /// Collision radius around each node.
    node_spacing: f32,
    /// Rest length of the spring along each edge.
    link_distance: f32,
    /// Spring stiffness.
    link_strength: f32,
    /// Charge between every node pair; negative pushes apart.
    repulsion_strength: f32,
    /// Pull toward the canvas center.
    center_strength: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            iterations: 300,
            node_spacing: 100.0,
            link_distance: 200.0,
            link_strength: 0.1,
            repulsion_strength: -1000.0,
            center_strength: 0.1,
        }
    }
}

impl LayoutOptions {
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Middle of the canvas.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn node_spacing(&self) -> f32 {
        self.node_spacing
    }

    pub fn link_distance(&self) -> f32 {
        self.link_distance
    }

    pub fn link_strength(&self) -> f32 {
        self.link_strength
    }

    pub fn repulsion_strength(&self) -> f32 {
        self.repulsion_strength
    }

    pub fn center_strength(&self) -> f32 {
        self.center_strength
    }

    /// Set the canvas dimensions
    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the number of iterations for the force simulation
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the collision radius around each node
    pub fn with_node_spacing(mut self, spacing: f32) -> Self {
        self.node_spacing = spacing;
        self
    }

    /// Set the spring rest length and stiffness
    pub fn with_link(mut self, distance: f32, strength: f32) -> Self {
        self.link_distance = distance;
        self.link_strength = strength;
        self
    }

    /// Set the pairwise charge
    pub fn with_repulsion_strength(mut self, strength: f32) -> Self {
        self.repulsion_strength = strength;
        self
    }

    /// Set the pull toward the canvas center
    pub fn with_center_strength(mut self, strength: f32) -> Self {
        self.center_strength = strength;
        self
    }
}
