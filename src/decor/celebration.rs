// decor/celebration.rs

use super::easing::{CubicBezier, keyframes, loop_progress};
use super::palette::{CONFETTI, Rgb};
use super::Frame;
use crate::evasion::ViewportBounds;
use rand::Rng;

const SHIMMER_SECS: f32 = 3.0;
const CURTAIN_SECS: f32 = 5.0;
const CAPTION_DELAY_SECS: f32 = 3.0;
const CAPTION_SECS: f32 = 3.0;

/// A heart rising through the whole screen behind the celebration card
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingHeart {
    pub id: usize,
    pub left: f32,
    pub size: f32,
    pub delay: f32,
    pub duration: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shimmer {
    pub id: usize,
    pub left: f32,
    pub top: f32,
    pub delay: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfettiShape {
    Square,
    Circle,
    Triangle,
    Heart,
    Star,
}

const SHAPES: [ConfettiShape; 5] = [
    ConfettiShape::Square,
    ConfettiShape::Circle,
    ConfettiShape::Triangle,
    ConfettiShape::Heart,
    ConfettiShape::Star,
];

/// How a piece of confetti gets onto the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Volley {
    /// Explodes outward from the middle of the screen, once
    Burst { tx: f32, ty: f32 },
    /// Fired up and across from a bottom corner, once
    Cannon { tx: f32, ty: f32 },
    /// Flutters down from above the screen, forever
    Shower,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Confetti {
    pub id: usize,
    /// Launch point, percent of viewport width
    pub x: f32,
    /// Launch point, percent of viewport height
    pub y: f32,
    pub color: Rgb,
    pub size: f32,
    pub delay: f32,
    pub duration: f32,
    pub rotation: f32,
    pub tilt: f32,
    pub shape: ConfettiShape,
    pub wobble: f32,
    /// Total spin over one flight, in degrees
    pub spin: f32,
    pub volley: Volley,
}

pub fn generate_hearts(rng: &mut impl Rng) -> Vec<FloatingHeart> {
    (0..30)
        .map(|id| FloatingHeart {
            id,
            left: rng.random_range(0.0..100.0),
            size: 15.0 + rng.random_range(0.0..40.0),
            delay: rng.random_range(0.0..8.0),
            duration: 8.0 + rng.random_range(0.0..6.0),
        })
        .collect()
}

pub fn generate_shimmers(rng: &mut impl Rng) -> Vec<Shimmer> {
    (0..60)
        .map(|id| Shimmer {
            id,
            left: rng.random_range(0.0..100.0),
            top: rng.random_range(0.0..100.0),
            delay: rng.random_range(0.0..3.0),
        })
        .collect()
}

/// Ranges shared by one group of confetti
struct Batch {
    first_id: usize,
    count: usize,
    size: (f32, f32),
    delay: (f32, f32),
    duration: (f32, f32),
    wobble: f32,
}

fn piece(
    rng: &mut impl Rng,
    id: usize,
    batch: &Batch,
    (x, y): (f32, f32),
    volley: Volley,
) -> Confetti {
    Confetti {
        id,
        x,
        y,
        color: CONFETTI[rng.random_range(0..CONFETTI.len())],
        size: batch.size.0 + rng.random_range(0.0..batch.size.1),
        delay: batch.delay.0 + rng.random_range(0.0..batch.delay.1),
        duration: batch.duration.0 + rng.random_range(0.0..batch.duration.1),
        rotation: rng.random_range(0.0..360.0),
        tilt: rng.random_range(0.0..360.0),
        shape: SHAPES[rng.random_range(0..SHAPES.len())],
        wobble: rng.random_range(0.0..batch.wobble),
        spin: 720.0 + rng.random_range(0.0..1080.0),
        volley,
    }
}

/// Center burst, left cannon, right cannon, then the shower: 400 pieces
/// with ids running 0..400 in that order.
pub fn generate_confetti(rng: &mut impl Rng) -> Vec<Confetti> {
    let burst = Batch {
        first_id: 0,
        count: 100,
        size: (8.0, 12.0),
        delay: (0.0, 0.2),
        duration: (1.5, 2.0),
        wobble: 10.0,
    };
    let cannon = |first_id| Batch {
        first_id,
        count: 60,
        size: (10.0, 10.0),
        delay: (0.1, 0.3),
        duration: (2.0, 2.5),
        wobble: 15.0,
    };
    let shower = Batch {
        first_id: 220,
        count: 180,
        size: (6.0, 10.0),
        delay: (0.5, 12.0),
        duration: (5.0, 8.0),
        wobble: 20.0,
    };

    let mut pieces = Vec::with_capacity(400);

    for id in burst.first_id..burst.first_id + burst.count {
        let volley = Volley::Burst {
            tx: (rng.random::<f32>() - 0.5) * 1200.0,
            ty: (rng.random::<f32>() - 0.7) * 1000.0,
        };
        pieces.push(piece(rng, id, &burst, (50.0, 50.0), volley));
    }

    for (batch, origin, direction) in [
        (cannon(100), (0.0, 100.0), 1.0),
        (cannon(160), (100.0, 100.0), -1.0),
    ] {
        for id in batch.first_id..batch.first_id + batch.count {
            let volley = Volley::Cannon {
                tx: direction * (400.0 + rng.random_range(0.0..600.0)),
                ty: -600.0 - rng.random_range(0.0..500.0),
            };
            pieces.push(piece(rng, id, &batch, origin, volley));
        }
    }

    for id in shower.first_id..shower.first_id + shower.count {
        let origin = (rng.random_range(0.0..100.0), -20.0 - rng.random_range(0.0..50.0));
        pieces.push(piece(rng, id, &shower, origin, Volley::Shower));
    }

    pieces
}

impl FloatingHeart {
    pub fn sample(&self, time: f32, viewport: ViewportBounds) -> Frame {
        let x = self.left / 100.0 * viewport.width;
        if time < self.delay {
            return Frame::hidden(x, viewport.height * 1.1);
        }

        let t = loop_progress(time, self.delay, self.duration);
        Frame {
            x,
            y: viewport.height * (1.1 - 1.2 * t),
            scale: 0.5 + 0.7 * t,
            rotation_deg: 360.0 * t,
            opacity: keyframes(&[(0.0, 0.0), (0.2, 0.8), (0.8, 0.8), (1.0, 0.0)], t),
        }
    }
}

impl Shimmer {
    pub fn sample(&self, time: f32, viewport: ViewportBounds) -> Frame {
        let t = loop_progress(time, self.delay, SHIMMER_SECS);
        let pulse = 0.5 - 0.5 * (t * std::f32::consts::TAU).cos();
        Frame {
            x: self.left / 100.0 * viewport.width,
            y: self.top / 100.0 * viewport.height,
            scale: 0.5 + pulse,
            rotation_deg: 0.0,
            opacity: pulse,
        }
    }
}

impl Confetti {
    /// `time` counts from the moment the celebration appeared
    pub fn sample(&self, time: f32, viewport: ViewportBounds) -> Frame {
        let x = self.x / 100.0 * viewport.width;
        let y = self.y / 100.0 * viewport.height;

        match self.volley {
            Volley::Burst { tx, ty } => self.flight(time, (x, y), (tx, ty), 1.0, CubicBezier::BURST),
            Volley::Cannon { tx, ty } => self.flight(time, (x, y), (tx, ty), 1.2, CubicBezier::CANNON),
            Volley::Shower => {
                if time < self.delay {
                    return Frame::hidden(x, y);
                }
                let t = loop_progress(time, self.delay, self.duration);
                let sway = keyframes(
                    &[(0.0, 0.0), (0.25, 1.0), (0.5, -1.0), (0.75, 1.0), (1.0, 0.0)],
                    t,
                );
                let fall = keyframes(&[(0.0, 0.0), (0.75, 0.75), (1.0, 1.2)], t);
                Frame {
                    x: x + sway * self.wobble,
                    y: y + fall * viewport.height,
                    scale: 1.0,
                    rotation_deg: self.tilt + 360.0 * t,
                    opacity: 1.0 - t,
                }
            }
        }
    }

    /// One-shot flight that holds its end pose once finished
    fn flight(
        &self,
        time: f32,
        (x, y): (f32, f32),
        (tx, ty): (f32, f32),
        end_scale: f32,
        curve: CubicBezier,
    ) -> Frame {
        if time < self.delay {
            return Frame::hidden(x, y);
        }
        let t = ((time - self.delay) / self.duration.max(f32::EPSILON)).min(1.0);
        let k = curve.apply(t);
        Frame {
            x: x + tx * k,
            y: y + ty * k,
            scale: end_scale * k,
            rotation_deg: self.tilt + self.spin * k,
            opacity: 1.0 - k,
        }
    }

    /// Once-only pieces are done for good after their flight
    pub fn is_spent(&self, time: f32) -> bool {
        !matches!(self.volley, Volley::Shower) && time >= self.delay + self.duration
    }
}

/// The fade to black that closes the celebration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curtain {
    /// Black overlay opacity
    pub overlay: f32,
    /// Scale of the celebration content behind the overlay
    pub content_scale: f32,
    pub content_opacity: f32,
    /// "Forever Together." caption
    pub caption_opacity: f32,
    pub caption_scale: f32,
}

impl Curtain {
    /// `elapsed` counts from the moment the ending began
    pub fn at(elapsed: f32) -> Self {
        let fade = CubicBezier::EASE_IN_OUT.apply(elapsed / CURTAIN_SECS);
        let caption = CubicBezier::EASE.apply((elapsed - CAPTION_DELAY_SECS) / CAPTION_SECS);
        Curtain {
            overlay: fade,
            content_scale: 1.0 - 0.5 * fade,
            content_opacity: 1.0 - fade,
            caption_opacity: caption,
            caption_scale: 0.9 + 0.1 * caption,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const VIEWPORT: ViewportBounds = ViewportBounds::new(1000.0, 800.0);

    #[test]
    fn test_confetti_layout() {
        let mut rng = StdRng::seed_from_u64(1);
        let pieces = generate_confetti(&mut rng);

        assert_eq!(pieces.len(), 400);
        assert!(pieces.iter().enumerate().all(|(i, p)| p.id == i));

        assert!(pieces[..100].iter().all(|p| matches!(p.volley, Volley::Burst { .. })));
        assert!(pieces[..100].iter().all(|p| (p.x, p.y) == (50.0, 50.0)));
        assert!(pieces[100..160].iter().all(|p| (p.x, p.y) == (0.0, 100.0)));
        assert!(pieces[160..220].iter().all(|p| (p.x, p.y) == (100.0, 100.0)));
        assert!(pieces[220..].iter().all(|p| p.volley == Volley::Shower));
    }

    #[test]
    fn test_cannons_fire_inward_and_up() {
        let mut rng = StdRng::seed_from_u64(2);
        let pieces = generate_confetti(&mut rng);

        for p in &pieces[100..220] {
            let Volley::Cannon { tx, ty } = p.volley else {
                panic!("piece {} is not a cannon shot", p.id);
            };
            let inward = if p.x == 0.0 { tx } else { -tx };
            assert!((400.0..1000.0).contains(&inward));
            assert!((-1100.0..=-600.0).contains(&ty));
            assert!((0.1..0.4).contains(&p.delay));
            assert!((2.0..4.5).contains(&p.duration));
        }
    }

    #[test]
    fn test_shower_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        for p in &generate_confetti(&mut rng)[220..] {
            assert!((-70.0..=-20.0).contains(&p.y));
            assert!((0.5..12.5).contains(&p.delay));
            assert!((5.0..13.0).contains(&p.duration));
            assert!(p.wobble < 20.0);
            assert!((720.0..1800.0).contains(&p.spin));
        }
    }

    #[test]
    fn test_burst_flies_out_and_fades() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut p = generate_confetti(&mut rng).remove(0);
        p.delay = 0.0;
        p.volley = Volley::Burst { tx: 300.0, ty: -400.0 };

        let start = p.sample(0.0, VIEWPORT);
        assert_eq!((start.x, start.y), (500.0, 400.0));
        assert_eq!(start.scale, 0.0);
        assert_eq!(start.opacity, 1.0);

        let end = p.sample(p.duration + 1.0, VIEWPORT);
        assert!((end.x - 800.0).abs() < 1e-3);
        assert!(end.y.abs() < 1e-3);
        assert_eq!(end.opacity, 0.0);
        assert!(p.is_spent(p.duration + 1.0));
    }

    #[test]
    fn test_shower_never_spent() {
        let mut rng = StdRng::seed_from_u64(5);
        let p = generate_confetti(&mut rng).pop().unwrap();
        assert!(!p.is_spent(1000.0));
        assert_eq!(p.sample(0.0, VIEWPORT).opacity, 0.0);
    }

    #[test]
    fn test_hearts_and_shimmers() {
        let mut rng = StdRng::seed_from_u64(6);
        let hearts = generate_hearts(&mut rng);
        let shimmers = generate_shimmers(&mut rng);

        assert_eq!(hearts.len(), 30);
        assert!(hearts.iter().all(|h| (15.0..55.0).contains(&h.size) && (8.0..14.0).contains(&h.duration)));
        assert_eq!(shimmers.len(), 60);
        assert!(shimmers.iter().all(|s| s.delay < 3.0));
    }

    #[test]
    fn test_heart_rises() {
        let heart = FloatingHeart {
            id: 0,
            left: 50.0,
            size: 20.0,
            delay: 0.0,
            duration: 10.0,
        };
        let low = heart.sample(1.0, VIEWPORT);
        let high = heart.sample(5.0, VIEWPORT);
        assert!(high.y < low.y);
        assert!((high.opacity - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_curtain_closes() {
        let open = Curtain::at(0.0);
        assert_eq!(open.overlay, 0.0);
        assert_eq!(open.content_opacity, 1.0);
        assert_eq!(open.caption_opacity, 0.0);

        let midway = Curtain::at(2.5);
        assert!(midway.overlay > 0.0 && midway.overlay < 1.0);
        assert_eq!(midway.caption_opacity, 0.0);

        let closed = Curtain::at(6.0);
        assert_eq!(closed.overlay, 1.0);
        assert!((closed.content_scale - 0.5).abs() < 1e-6);
        assert_eq!(closed.caption_opacity, 1.0);

        let caption = Curtain::at(4.5);
        assert!(caption.caption_opacity > 0.0 && caption.caption_opacity < 1.0);
    }
}
