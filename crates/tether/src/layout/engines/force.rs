//! Force-directed layout engine
//!
//! A velocity-Verlet style simulation with a cooling schedule: every tick the
//! link, charge, center and collision forces add to each body's velocity,
//! velocities are damped, and positions integrate. The simulation warm-starts
//! from the current node positions.
//!
//! Each call owns its own [`Simulation`], so concurrent layouts never share
//! state and the same input always produces the same output.

use indexmap::IndexMap;
use log::{debug, trace};
use rand::{Rng, SeedableRng, rngs::StdRng};

use tether_core::{
    geometry::Point,
    graph::{Graph, Node},
    identifier::Id,
};

use crate::config::LayoutOptions;

/// Alpha the cooling schedule reaches on the last iteration.
const ALPHA_MIN: f32 = 0.001;
/// Fraction of velocity lost per tick.
const VELOCITY_DECAY: f32 = 0.4;
/// How hard overlapping collision circles are pushed apart.
const COLLISION_STRENGTH: f32 = 0.7;
/// Charge ignores distances below this (squared) to avoid blowups.
const MIN_CHARGE_DISTANCE_SQUARED: f32 = 1.0;
/// Seed for the jitter that separates coincident bodies.
const JITTER_SEED: u64 = 0x7e7e_7e7e;

/// Force-directed layout engine.
pub struct Engine {
    iterations: usize,
    center: Point,
    center_strength: f32,
    link_distance: f32,
    link_strength: f32,
    repulsion_strength: f32,
    collision_radius: f32,
}

impl Engine {
    /// Create a force engine from the caller's layout options
    pub fn new(options: &LayoutOptions) -> Self {
        Self {
            iterations: options.iterations(),
            center: options.center(),
            center_strength: options.center_strength(),
            link_distance: options.link_distance(),
            link_strength: options.link_strength(),
            repulsion_strength: options.repulsion_strength(),
            collision_radius: options.node_spacing(),
        }
    }

    /// Run the simulation and return the nodes at their relaxed positions.
    ///
    /// The graph must already be validated. Node order, ids and sizes are
    /// preserved; only positions change.
    pub fn calculate(&self, graph: &Graph) -> Vec<Node> {
        let mut simulation = Simulation::new(self, graph);

        debug!(
            node_count = graph.nodes().len(),
            link_count = simulation.links.len(),
            iterations = self.iterations;
            "Running force simulation"
        );

        for _ in 0..self.iterations {
            simulation.tick(self);
        }

        trace!(alpha = simulation.alpha; "Force simulation cooled");

        graph
            .nodes()
            .iter()
            .zip(simulation.bodies)
            .map(|(node, body)| node.with_position(Point::new(body.x, body.y)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Body {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
}

#[derive(Debug, Clone, Copy)]
struct Link {
    source: usize,
    target: usize,
    /// Share of the correction applied to the target.
    bias: f32,
}

/// Mutable state for a single layout run.
struct Simulation {
    bodies: Vec<Body>,
    links: Vec<Link>,
    alpha: f32,
    alpha_decay: f32,
    rng: StdRng,
}

impl Simulation {
    fn new(engine: &Engine, graph: &Graph) -> Self {
        let slots: IndexMap<Id, usize> = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(slot, node)| (node.id(), slot))
            .collect();

        let bodies = graph
            .nodes()
            .iter()
            .map(|node| Body {
                x: node.position().x(),
                y: node.position().y(),
                vx: 0.0,
                vy: 0.0,
            })
            .collect();

        // Endpoints were checked by validation. Self-loops carry no spring.
        let endpoints: Vec<(usize, usize)> = graph
            .edges()
            .iter()
            .map(|edge| (slots[&edge.source()], slots[&edge.target()]))
            .filter(|(source, target)| source != target)
            .collect();

        let mut degree = vec![0usize; slots.len()];
        for &(source, target) in &endpoints {
            degree[source] += 1;
            degree[target] += 1;
        }

        let links = endpoints
            .into_iter()
            .map(|(source, target)| Link {
                source,
                target,
                bias: degree[source] as f32 / (degree[source] + degree[target]) as f32,
            })
            .collect();

        let alpha_decay = if engine.iterations == 0 {
            0.0
        } else {
            1.0 - ALPHA_MIN.powf(1.0 / engine.iterations as f32)
        };

        Self {
            bodies,
            links,
            alpha: 1.0,
            alpha_decay,
            rng: StdRng::seed_from_u64(JITTER_SEED),
        }
    }

    fn tick(&mut self, engine: &Engine) {
        self.alpha -= self.alpha * self.alpha_decay;

        self.apply_links(engine);
        self.apply_charge(engine);
        self.apply_center(engine);
        self.apply_collision(engine);

        for body in &mut self.bodies {
            body.vx *= 1.0 - VELOCITY_DECAY;
            body.vy *= 1.0 - VELOCITY_DECAY;
            body.x += body.vx;
            body.y += body.vy;
        }
    }

    /// Tiny deterministic offset used when two bodies coincide on an axis.
    fn jiggle(&mut self) -> f32 {
        (self.rng.random::<f32>() - 0.5) * 1e-6
    }

    /// Springs pull linked bodies toward the rest length, weighted so that
    /// the better-connected endpoint moves less.
    fn apply_links(&mut self, engine: &Engine) {
        for i in 0..self.links.len() {
            let Link {
                source,
                target,
                bias,
            } = self.links[i];
            let s = self.bodies[source];
            let t = self.bodies[target];

            let mut dx = t.x + t.vx - s.x - s.vx;
            let mut dy = t.y + t.vy - s.y - s.vy;
            if dx == 0.0 {
                dx = self.jiggle();
            }
            if dy == 0.0 {
                dy = self.jiggle();
            }

            let length = dx.hypot(dy);
            let k = (length - engine.link_distance) / length * self.alpha * engine.link_strength;
            dx *= k;
            dy *= k;

            let t = &mut self.bodies[target];
            t.vx -= dx * bias;
            t.vy -= dy * bias;
            let s = &mut self.bodies[source];
            s.vx += dx * (1.0 - bias);
            s.vy += dy * (1.0 - bias);
        }
    }

    /// Every pair of bodies exchanges an inverse-distance charge.
    fn apply_charge(&mut self, engine: &Engine) {
        let count = self.bodies.len();
        for i in 0..count {
            for j in 0..count {
                if i == j {
                    continue;
                }

                let mut dx = self.bodies[j].x - self.bodies[i].x;
                let mut dy = self.bodies[j].y - self.bodies[i].y;
                if dx == 0.0 {
                    dx = self.jiggle();
                }
                if dy == 0.0 {
                    dy = self.jiggle();
                }

                let mut distance_squared = dx * dx + dy * dy;
                if distance_squared < MIN_CHARGE_DISTANCE_SQUARED {
                    distance_squared = (MIN_CHARGE_DISTANCE_SQUARED * distance_squared).sqrt();
                }

                let w = engine.repulsion_strength * self.alpha / distance_squared;
                let body = &mut self.bodies[i];
                body.vx += dx * w;
                body.vy += dy * w;
            }
        }
    }

    fn apply_center(&mut self, engine: &Engine) {
        let k = engine.center_strength * self.alpha;
        for body in &mut self.bodies {
            body.vx += (engine.center.x() - body.x) * k;
            body.vy += (engine.center.y() - body.y) * k;
        }
    }

    /// Overlapping collision circles are pushed apart. Not scaled by alpha,
    /// so separation still holds once the simulation has cooled.
    fn apply_collision(&mut self, engine: &Engine) {
        let radius = engine.collision_radius;
        let reach = radius + radius;
        let count = self.bodies.len();

        for i in 0..count {
            for j in (i + 1)..count {
                let a = self.bodies[i];
                let b = self.bodies[j];

                let mut dx = (a.x + a.vx) - (b.x + b.vx);
                let mut dy = (a.y + a.vy) - (b.y + b.vy);
                let mut distance_squared = dx * dx + dy * dy;
                if distance_squared >= reach * reach {
                    continue;
                }

                if dx == 0.0 {
                    dx = self.jiggle();
                    distance_squared += dx * dx;
                }
                if dy == 0.0 {
                    dy = self.jiggle();
                    distance_squared += dy * dy;
                }

                let distance = distance_squared.sqrt();
                let push = (reach - distance) / distance * COLLISION_STRENGTH;
                dx *= push;
                dy *= push;

                // Equal radii split the correction evenly.
                let a = &mut self.bodies[i];
                a.vx += dx * 0.5;
                a.vy += dy * 0.5;
                let b = &mut self.bodies[j];
                b.vx -= dx * 0.5;
                b.vy -= dy * 0.5;
            }
        }
    }
}
