//! Victory confetti for the canvas UI

use crate::theme::Color;

/// Small PRNG so animations need no entropy source
struct AnimRng {
    state: u64,
}

impl AnimRng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.state >> 33) ^ self.state) as u32
    }

    fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f32) / (u32::MAX as f32)
    }

    fn gen_range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    fn gen_range_usize(&mut self, min: usize, max: usize) -> usize {
        min + (self.next_u32() as usize % (max - min))
    }
}

/// A single particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub char: char,
    pub color: Color,
    pub lifetime: f32,
    pub size: f32,
}

impl Particle {
    pub fn is_visible(&self, width: f32, height: f32) -> bool {
        self.x >= -10.0
            && self.x < width + 10.0
            && self.y >= -10.0
            && self.y < height + 10.0
            && self.lifetime > 0.0
    }
}

const CONFETTI_CHARS: &[char] = &['*', '✦', '✧', '◆', '◇', '●', '■', '▲'];

const CONFETTI_COLORS: &[Color] = &[
    Color::new(255, 90, 90),
    Color::new(255, 210, 90),
    Color::new(100, 255, 150),
    Color::new(90, 180, 255),
    Color::new(220, 120, 255),
];

const VICTORY_MESSAGES: &[&str] = &[
    "ALL WORDS FOUND!",
    "BRILLIANT!",
    "WORD WIZARD!",
    "PERFECT!",
    "WELL DONE!",
    "LEGENDARY!",
];

/// Falling confetti plus the level's letters, shown after the last word
pub struct VictoryScreen {
    rng: AnimRng,
    particles: Vec<Particle>,
    letters: Vec<char>,
    frame: u32,
    message_index: usize,
}

impl VictoryScreen {
    pub fn new(seed: u64, letters: Vec<char>) -> Self {
        let mut rng = AnimRng::new(seed);
        let message_index = rng.gen_range_usize(0, VICTORY_MESSAGES.len());
        Self {
            rng,
            particles: Vec::new(),
            letters,
            frame: 0,
            message_index,
        }
    }

    /// Advance one frame on a `width` x `height` canvas
    pub fn update(&mut self, width: f32, height: f32) {
        self.frame = self.frame.wrapping_add(1);

        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += 0.08;
            p.lifetime -= 0.016;
            p.lifetime > 0.0 && p.y < height + 20.0
        });

        for _ in 0..3 {
            let from_letters = !self.letters.is_empty() && self.rng.next_f32() < 0.3;
            let ch = if from_letters {
                self.letters[self.rng.gen_range_usize(0, self.letters.len())]
            } else {
                CONFETTI_CHARS[self.rng.gen_range_usize(0, CONFETTI_CHARS.len())]
            };
            let color = CONFETTI_COLORS[self.rng.gen_range_usize(0, CONFETTI_COLORS.len())];
            self.particles.push(Particle {
                x: self.rng.gen_range_f32(0.0, width),
                y: -10.0,
                vx: self.rng.gen_range_f32(-1.0, 1.0),
                vy: self.rng.gen_range_f32(1.0, 3.0),
                char: ch,
                color,
                lifetime: self.rng.gen_range_f32(3.0, 6.0),
                size: if from_letters { 28.0 } else { 18.0 },
            });
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn message(&self) -> &str {
        VICTORY_MESSAGES[self.message_index]
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }
}
