use rand::prelude::SliceRandom;
use rand::Rng;

use super::particles::{hue_to_rgb, random_bright_color, EffectType, Particle, CONFETTI_CHARS};

const VICTORY_MESSAGES: [&str; 8] = [
    "ALL WORDS FOUND!",
    "BRILLIANT!",
    "WORD WIZARD!",
    "PERFECT!",
    "WELL DONE!",
    "SPELLBINDING!",
    "LEGENDARY!",
    "FLAWLESS!",
];

const BANNER: &str = r#"
 ___  ___  _    __   __ ___  ___
/ __|/ _ \| |   \ \ / /| __||   \
\__ \ (_) | |__  \ V / | _| | |) |
|___/\___/|____|  \_/  |___||___/
"#;

/// Confetti celebration shown once a level is solved
#[derive(Debug)]
pub struct VictoryScreen {
    particles: Vec<Particle>,
    effect_type: EffectType,
    frame_count: u32,
    rainbow_offset: f32,
    message_index: usize,
    firework_cooldown: u32,
    /// Letters of the solved level, rained down by `LetterRain`
    letters: Vec<char>,
    pub width: u16,
    pub height: u16,
}

impl Default for VictoryScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl VictoryScreen {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            effect_type: EffectType::Confetti,
            frame_count: 0,
            rainbow_offset: 0.0,
            message_index: 0,
            firework_cooldown: 0,
            letters: Vec::new(),
            width: 80,
            height: 24,
        }
    }

    /// Start a fresh celebration for a level whose words use `letters`
    pub fn reset(&mut self, letters: Vec<char>) {
        let mut rng = rand::thread_rng();
        self.particles.clear();
        self.frame_count = 0;
        self.rainbow_offset = 0.0;
        self.firework_cooldown = 0;
        self.effect_type = EffectType::random();
        self.message_index = rng.gen_range(0..VICTORY_MESSAGES.len());
        self.letters = letters;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn update(&mut self) {
        self.frame_count += 1;
        self.rainbow_offset += 0.02;

        let floor = self.height as f32 + 2.0;
        self.particles.retain_mut(|p| {
            p.step(0.05);
            p.lifetime > 0.0 && p.y < floor
        });

        match self.effect_type {
            EffectType::Confetti => self.spawn_confetti(),
            EffectType::LetterRain => self.spawn_letters(),
            EffectType::Fireworks => self.spawn_fireworks(),
        }
    }

    fn spawn_confetti(&mut self) {
        let mut rng = rand::thread_rng();
        for _ in 0..3 {
            self.particles.push(Particle {
                x: rng.gen_range(0.0..self.width.max(1) as f32),
                y: -1.0,
                vx: rng.gen_range(-0.4..0.4),
                vy: rng.gen_range(0.2..0.8),
                char: CONFETTI_CHARS.choose(&mut rng).copied().unwrap_or('*'),
                color: random_bright_color(),
                lifetime: rng.gen_range(3.0..6.0),
            });
        }
    }

    fn spawn_letters(&mut self) {
        let mut rng = rand::thread_rng();
        let Some(&letter) = self.letters.choose(&mut rng) else {
            self.spawn_confetti();
            return;
        };
        let hue = self.rainbow_offset + rng.gen_range(0.0..0.3);
        self.particles.push(Particle {
            x: rng.gen_range(0.0..self.width.max(1) as f32),
            y: -1.0,
            vx: 0.0,
            vy: rng.gen_range(0.3..0.9),
            char: letter,
            color: hue_to_rgb(hue),
            lifetime: rng.gen_range(4.0..7.0),
        });
    }

    fn spawn_fireworks(&mut self) {
        if self.firework_cooldown > 0 {
            self.firework_cooldown -= 1;
            return;
        }
        let mut rng = rand::thread_rng();
        if !rng.gen_bool(0.1) {
            return;
        }
        let x = rng.gen_range(0.0..self.width.max(1) as f32);
        let y = rng.gen_range(2.0..(self.height as f32 / 2.0).max(3.0));
        let color = random_bright_color();
        for _ in 0..20 {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(0.4..1.6);
            self.particles.push(Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed * 0.5,
                char: '●',
                color,
                lifetime: rng.gen_range(1.0..2.0),
            });
        }
        self.firework_cooldown = 20;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn current_message(&self) -> &str {
        VICTORY_MESSAGES[self.message_index]
    }

    pub fn banner(&self) -> &str {
        BANNER
    }

    pub fn rainbow_offset(&self) -> f32 {
        self.rainbow_offset
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_spawns_and_culls() {
        let mut screen = VictoryScreen::new();
        screen.resize(40, 10);
        screen.reset(vec!['K', 'E', 'N']);
        for _ in 0..200 {
            screen.update();
        }
        assert_eq!(screen.frame_count(), 200);
        assert!(screen.particles().iter().all(|p| p.y < 12.0));
    }

    #[test]
    fn test_reset_clears_particles() {
        let mut screen = VictoryScreen::new();
        screen.reset(Vec::new());
        for _ in 0..10 {
            screen.update();
        }
        screen.reset(Vec::new());
        assert!(screen.particles().is_empty());
        assert_eq!(screen.frame_count(), 0);
    }
}
