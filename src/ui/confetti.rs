//! 过关彩纸动画
//!
//! 彩纸从顶部随机位置落下，每片在自己的下落时间结束后消失，
//! 整个场景在爆发后固定时间清空

use std::time::{Duration, Instant};

use rand::Rng;

const MIN_FALL_MS: u64 = 500;
const MAX_FALL_MS: u64 = 1000;

/// 一片彩纸
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,        // 水平位置 0.0..1.0
    pub rotation: u16, // 0..360 度
    pub color: (u8, u8, u8),
    pub spawned: Instant,
    pub fall: Duration,
}

impl Particle {
    /// 下落进度 0.0..=1.0，结束后返回 None
    pub fn progress(&self, now: Instant) -> Option<f32> {
        let elapsed = now.saturating_duration_since(self.spawned);
        if elapsed >= self.fall {
            return None;
        }
        Some(elapsed.as_secs_f32() / self.fall.as_secs_f32())
    }

    /// 按旋转角度选字符
    pub fn glyph(&self) -> char {
        match (self.rotation / 45) % 4 {
            0 => '│',
            1 => '╱',
            2 => '─',
            _ => '╲',
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Confetti {
    pub particles: Vec<Particle>,
    clear_at: Option<Instant>,
}

impl Confetti {
    /// 爆发一批彩纸
    pub fn burst<R: Rng>(&mut self, rng: &mut R, now: Instant, count: usize, clear_after: Duration) {
        self.particles.extend((0..count).map(|_| Particle {
            x: rng.gen_range(0.0..1.0),
            rotation: rng.gen_range(0..360),
            color: (rng.r#gen(), rng.r#gen(), rng.r#gen()),
            spawned: now,
            fall: Duration::from_millis(rng.gen_range(MIN_FALL_MS..MAX_FALL_MS)),
        }));
        self.clear_at = Some(now + clear_after);
    }

    /// 移除落地的彩纸，到时清空场景
    pub fn update(&mut self, now: Instant) {
        if self.clear_at.is_some_and(|t| now >= t) {
            self.clear();
            return;
        }
        self.particles.retain(|p| p.progress(now).is_some());
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.clear_at = None;
    }

    /// 是否还有彩纸在下落
    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.clear_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_burst_spawns_particles() {
        let mut rng = StdRng::seed_from_u64(1);
        let now = Instant::now();
        let mut confetti = Confetti::default();
        confetti.burst(&mut rng, now, 30, Duration::from_secs(2));

        assert_eq!(confetti.particles.len(), 30);
        for p in &confetti.particles {
            assert!((0.0..1.0).contains(&p.x));
            assert!(p.rotation < 360);
            assert!(p.fall >= Duration::from_millis(500) && p.fall < Duration::from_millis(1000));
        }
    }

    #[test]
    fn test_particles_land_and_disappear() {
        let mut rng = StdRng::seed_from_u64(2);
        let now = Instant::now();
        let mut confetti = Confetti::default();
        confetti.burst(&mut rng, now, 10, Duration::from_secs(2));

        confetti.update(now + Duration::from_millis(400));
        assert_eq!(confetti.particles.len(), 10);

        confetti.update(now + Duration::from_millis(1000));
        assert!(!confetti.is_active());
        assert_eq!(confetti.next_deadline(), Some(now + Duration::from_secs(2)));

        confetti.update(now + Duration::from_secs(2));
        assert_eq!(confetti.next_deadline(), None);
    }

    #[test]
    fn test_progress() {
        let now = Instant::now();
        let particle = Particle {
            x: 0.5,
            rotation: 90,
            color: (255, 0, 0),
            spawned: now,
            fall: Duration::from_millis(800),
        };

        assert_eq!(particle.progress(now), Some(0.0));
        let half = particle.progress(now + Duration::from_millis(400)).unwrap();
        assert!((half - 0.5).abs() < 1e-3);
        assert_eq!(particle.progress(now + Duration::from_millis(800)), None);
        assert_eq!(particle.glyph(), '─');
    }
}
