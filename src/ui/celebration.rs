//! Confetti shown after a win is revealed.
//!
//! Bursts fire every `interval` until `duration` has passed; each burst
//! shrinks with the time left and is launched from two points near the
//! upper left and upper right. Coordinates are canvas space: x in 0..1
//! left to right, y in 0..1 bottom to top.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Particles per origin at the start of the celebration.
const MAX_BURST: f64 = 50.0;
/// Ticks a particle lives.
const PARTICLE_TICKS: u32 = 60;
const START_SPEED: f64 = 0.03;
const GRAVITY: f64 = 0.002;
const DECAY: f64 = 0.92;
pub const PALETTE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    vx: f64,
    vy: f64,
    age: u32,
    /// Index into the renderer's palette, below [`PALETTE_SIZE`].
    pub color: usize,
}

impl Particle {
    fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vx *= DECAY;
        self.vy = self.vy * DECAY - GRAVITY;
        self.age += 1;
    }

    fn is_alive(&self) -> bool {
        self.age < PARTICLE_TICKS && self.y > -0.1
    }
}

#[derive(Debug, Clone)]
pub struct Celebration {
    started: Instant,
    duration: Duration,
    interval: Duration,
    next_burst: Instant,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl Celebration {
    pub fn start(now: Instant, duration: Duration, interval: Duration) -> Self {
        Self::with_rng(now, duration, interval, StdRng::from_os_rng())
    }

    pub fn with_rng(now: Instant, duration: Duration, interval: Duration, rng: StdRng) -> Self {
        Celebration {
            started: now,
            duration,
            interval,
            next_burst: now,
            particles: Vec::new(),
            rng,
        }
    }

    /// Particles each origin emits when `time_left` of `duration` remains.
    pub fn burst_size(time_left: Duration, duration: Duration) -> usize {
        if duration.is_zero() {
            return 0;
        }
        let share = time_left.as_secs_f64() / duration.as_secs_f64();
        (MAX_BURST * share.clamp(0.0, 1.0)) as usize
    }

    fn time_left(&self, now: Instant) -> Duration {
        (self.started + self.duration).saturating_duration_since(now)
    }

    /// Advance particles one step and fire any due burst.
    pub fn tick(&mut self, now: Instant) {
        for particle in &mut self.particles {
            particle.step();
        }
        self.particles.retain(Particle::is_alive);

        let time_left = self.time_left(now);
        if time_left.is_zero() || now < self.next_burst {
            return;
        }
        let count = Self::burst_size(time_left, self.duration);
        for x_range in [0.1..0.3, 0.7..0.9] {
            let x = self.rng.random_range(x_range);
            // origin slightly above the visible top edge at most
            let y = 1.2 - self.rng.random::<f64>();
            self.emit(x, y, count);
        }
        self.next_burst = now + self.interval;
    }

    fn emit(&mut self, x: f64, y: f64, count: usize) {
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..std::f64::consts::TAU);
            let speed = START_SPEED * self.rng.random_range(0.5..1.0);
            self.particles.push(Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                age: 0,
                color: self.rng.random_range(0..PALETTE_SIZE),
            });
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Still emitting or particles still in flight.
    pub fn is_active(&self, now: Instant) -> bool {
        !self.time_left(now).is_zero() || !self.particles.is_empty()
    }
}
