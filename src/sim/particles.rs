//! Cosmetic particle bursts
//!
//! Particles never affect gameplay. They are integrated once per rendered
//! frame whether or not a gameplay tick happens.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Position;
use crate::cell_center;
use crate::consts::{MAX_PARTICLES, PARTICLE_DECAY, PARTICLE_GRAVITY};

/// Particles emitted per eaten food (golden food gets a bigger burst)
pub const EAT_BURST: usize = 10;
pub const GOLDEN_BURST: usize = 12;
/// Particles emitted per snake segment on death
pub const DEATH_PER_SEGMENT: usize = 3;
/// Only the first segments of a long snake burst on death
pub const DEATH_SEGMENT_LIMIT: usize = 20;

/// Snake body colours used by the death burst (0xRRGGBBAA)
pub const DEATH_PALETTE: [u32; 3] = [0x2ECC71FF, 0x27AE60FF, 0xFFFFFFFF];

/// A single spark, in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub color: u32,
    pub size: f32,
}

impl Particle {
    /// Remaining life in 0..=1, used for opacity and size scaling
    pub fn life_fraction(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Advance every particle by one frame and drop the dead ones
pub fn update_particles(particles: &[Particle]) -> Vec<Particle> {
    particles
        .iter()
        .map(|p| Particle {
            pos: p.pos + p.vel,
            vel: Vec2::new(p.vel.x, p.vel.y + PARTICLE_GRAVITY),
            life: p.life - PARTICLE_DECAY,
            ..*p
        })
        .filter(|p| p.life > 0.0)
        .collect()
}

fn spark<R: Rng + ?Sized>(rng: &mut R, origin: Vec2, spread: f32, palette: &[u32]) -> Particle {
    let vel = Vec2::new(
        (rng.random::<f32>() - 0.5) * spread,
        (rng.random::<f32>() - 0.5) * spread,
    );
    let color = if palette.is_empty() {
        0xFFFFFFFF
    } else {
        palette[rng.random_range(0..palette.len())]
    };
    Particle {
        pos: origin,
        vel,
        life: 1.0,
        max_life: 1.0,
        color,
        size: 2.0 + rng.random::<f32>() * 4.0,
    }
}

/// Burst at an eaten food cell
pub fn eat_burst<R: Rng + ?Sized>(
    rng: &mut R,
    cell: Position,
    count: usize,
    palette: &[u32],
) -> Vec<Particle> {
    let origin = cell_center(cell.x, cell.y);
    (0..count).map(|_| spark(rng, origin, 6.0, palette)).collect()
}

/// Burst along the body of a dead snake
pub fn death_burst<R: Rng + ?Sized>(rng: &mut R, snake: &[Position]) -> Vec<Particle> {
    let mut out = Vec::with_capacity(snake.len().min(DEATH_SEGMENT_LIMIT) * DEATH_PER_SEGMENT);
    for seg in snake.iter().take(DEATH_SEGMENT_LIMIT) {
        let origin = cell_center(seg.x, seg.y);
        for _ in 0..DEATH_PER_SEGMENT {
            out.push(spark(rng, origin, 5.0, &DEATH_PALETTE));
        }
    }
    out
}

/// Append a burst, evicting the oldest particles past the cap
pub fn append_capped(particles: &mut Vec<Particle>, burst: Vec<Particle>) {
    particles.extend(burst);
    if particles.len() > MAX_PARTICLES {
        let excess = particles.len() - MAX_PARTICLES;
        particles.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn particle(life: f32) -> Particle {
        Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(1.0, -2.0),
            life,
            max_life: 1.0,
            color: 0xFFFFFFFF,
            size: 3.0,
        }
    }

    #[test]
    fn test_integrate_one_frame() {
        let next = update_particles(&[particle(1.0)]);
        assert_eq!(next.len(), 1);
        let p = next[0];
        assert_eq!(p.pos, Vec2::new(11.0, 8.0));
        assert!((p.vel.y - (-2.0 + PARTICLE_GRAVITY)).abs() < 1e-6);
        assert!((p.life - (1.0 - PARTICLE_DECAY)).abs() < 1e-6);
    }

    #[test]
    fn test_dead_particles_removed() {
        let next = update_particles(&[particle(0.02), particle(0.5)]);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_particles_expire_after_unit_life() {
        let mut ps = vec![particle(1.0)];
        let mut frames = 0;
        while !ps.is_empty() {
            ps = update_particles(&ps);
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(frames, 34);
    }

    #[test]
    fn test_eat_burst_shape() {
        let mut rng = Pcg32::seed_from_u64(1);
        let palette = [0xFF0000FF, 0x00FF00FF];
        let burst = eat_burst(&mut rng, Position::new(2, 3), EAT_BURST, &palette);
        assert_eq!(burst.len(), EAT_BURST);
        for p in &burst {
            assert_eq!(p.pos, cell_center(2, 3));
            assert!(p.vel.x.abs() <= 3.0 && p.vel.y.abs() <= 3.0);
            assert!((2.0..6.0).contains(&p.size));
            assert!(palette.contains(&p.color));
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn test_death_burst_caps_segments() {
        let mut rng = Pcg32::seed_from_u64(2);
        let short: Vec<_> = (0..4).map(|x| Position::new(x, 0)).collect();
        assert_eq!(death_burst(&mut rng, &short).len(), 12);

        let long: Vec<_> = (0..35).map(|i| Position::new(i % 20, i / 20)).collect();
        assert_eq!(
            death_burst(&mut rng, &long).len(),
            DEATH_SEGMENT_LIMIT * DEATH_PER_SEGMENT
        );
    }

    #[test]
    fn test_append_capped_drops_oldest() {
        let mut ps: Vec<_> = (0..MAX_PARTICLES).map(|_| particle(0.5)).collect();
        append_capped(&mut ps, vec![particle(1.0); 4]);
        assert_eq!(ps.len(), MAX_PARTICLES);
        assert_eq!(ps.last().map(|p| p.life), Some(1.0));
    }

    #[test]
    fn test_life_fraction() {
        assert_eq!(particle(0.25).life_fraction(), 0.25);
        assert_eq!(particle(-1.0).life_fraction(), 0.0);
    }
}
