use glam::{Mat2, Vec2};
use rand::Rng;
use std::f32::consts::PI;

/// Seconds over which a wave train ramps in at birth and back out before it
/// expires.
const FADE_IN_TIME: f64 = 5.0;

/// One procedural wave train with a finite lifetime.
///
/// The averaged fields are configuration, fixed at construction. The
/// per-instance state (amplitude, wavelength, frequencies, phase offset,
/// direction) is re-randomized by [`Wave::reset`] every time the train
/// expires and respawns, so the ensemble never settles into a repeating
/// pattern.
#[derive(Debug, Clone)]
pub struct Wave {
    pub avg_amplitude: f32,
    pub avg_wavelength: f32,
    pub chop: f32,
    pub duration: f64,
    pub avg_direction: Vec2,

    amplitude: f32,
    wavelength: f32,
    freq: f32,
    temporal_freq: f32,
    phase_offset: f32,
    direction: Vec2,
    start_time: f64,
    reset_time: f64,
    att_offset: f64,
}

impl Wave {
    /// Create a wave train and roll its first random instance.
    ///
    /// `att_offset` backdates the synthetic start time by that fraction of
    /// `duration`, letting an ensemble pre-stagger its trains so they do not
    /// all respawn in sync.
    #[allow(clippy::too_many_arguments)]
    pub fn new<R: Rng>(
        avg_amplitude: f32,
        avg_wavelength: f32,
        chop: f32,
        duration: f64,
        avg_direction: Vec2,
        att_offset: f64,
        rng: &mut R,
        now: f64,
    ) -> Self {
        let mut wave = Self {
            avg_amplitude,
            avg_wavelength,
            chop,
            duration,
            avg_direction,
            amplitude: 0.0,
            wavelength: 0.0,
            freq: 0.0,
            temporal_freq: 0.0,
            phase_offset: 0.0,
            direction: avg_direction,
            start_time: 0.0,
            reset_time: 0.0,
            att_offset,
        };

        wave.reset(rng, now);
        wave.reset_time -= wave.att_offset * wave.duration;
        wave.start_time = wave.reset_time;

        wave
    }

    /// Roll a fresh random instance of this train in place.
    ///
    /// The amplitude lands in `[0.5, 2.0) * avg_amplitude` and the
    /// wavelength scales with it so the amplitude/wavelength ratio of the
    /// configuration is preserved. The temporal frequency follows the
    /// deep-water dispersion relation for the rolled wavelength.
    pub fn reset<R: Rng>(&mut self, rng: &mut R, now: f64) {
        self.amplitude = 0.5 * self.avg_amplitude + rng.gen::<f32>() * (1.5 * self.avg_amplitude);
        self.wavelength = self.amplitude * self.avg_wavelength / self.avg_amplitude;
        self.freq = 2.0 * PI / self.wavelength;
        self.temporal_freq = (9.8 * PI * 2.0 / self.wavelength).sqrt();
        self.phase_offset = rng.gen::<f32>() * 2.0 * PI;

        // nudge the travel direction by up to five degrees either way
        let angle = (5.0 * (2.0 * rng.gen::<f32>() - 1.0)).to_radians();
        self.direction = (Mat2::from_angle(angle) * self.avg_direction).normalize();

        self.reset_time = now;
    }

    /// Animated amplitude at `now`: zero once the train's lifetime exceeds
    /// its duration, a raised-cosine ramp near birth and expiry, the rolled
    /// amplitude in between.
    ///
    /// The fade-out branch is checked before the fade-in branch; for
    /// durations shorter than twice the fade window the fade-out wins where
    /// they overlap.
    pub fn amplitude(&self, now: f64) -> f32 {
        let elapsed = now - self.reset_time;

        if elapsed > self.duration {
            return 0.0;
        }

        if self.duration - elapsed < FADE_IN_TIME {
            let fade =
                0.5 - 0.5 * (std::f64::consts::PI * (self.duration - elapsed) / FADE_IN_TIME).cos();
            return self.amplitude * fade as f32;
        }

        if elapsed > FADE_IN_TIME {
            return self.amplitude;
        }

        let fade = 0.5 - 0.5 * (std::f64::consts::PI * elapsed / FADE_IN_TIME).cos();
        self.amplitude * fade as f32
    }

    /// Accumulated phase at `now`. Jumps backwards when the train respawns,
    /// since each new instance rolls a fresh phase offset.
    pub fn phase(&self, now: f64) -> f32 {
        self.temporal_freq * (now - self.reset_time) as f32 + self.phase_offset
    }

    pub fn wavelength(&self) -> f32 {
        self.wavelength
    }

    /// Spatial angular frequency, `2π / wavelength`.
    pub fn freq(&self) -> f32 {
        self.freq
    }

    pub fn phase_offset(&self) -> f32 {
        self.phase_offset
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Time of the last respawn (backdated by the attenuation offset at
    /// construction).
    pub fn reset_time(&self) -> f64 {
        self.reset_time
    }

    /// Time this train first entered its ensemble.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }
}

/// The production geometry-displacement ensemble: a single long-lived swell.
pub fn geometry_waves<R: Rng>(rng: &mut R, now: f64) -> Vec<Wave> {
    vec![Wave::new(
        1.0,
        35.0,
        8.0,
        1000.0,
        Vec2::new(1.0, 0.5),
        0.1,
        rng,
        now,
    )]
}

/// Short-wavelength detail trains driving the normal-perturbation texture
/// pass. Wavelengths land in `[0.3, 6.3)` with directions scattered around
/// the swell heading.
pub fn texture_waves<R: Rng>(count: usize, rng: &mut R, now: f64) -> Vec<Wave> {
    let mut waves = Vec::with_capacity(count);

    for _ in 0..count {
        let r1 = (2.0 * rng.gen::<f32>() - 1.0) * 0.5;
        let r2 = (2.0 * rng.gen::<f32>() - 1.0) * 0.5;
        let wavelength = rng.gen::<f32>() * 6.0 + 0.3;

        waves.push(Wave::new(
            0.005 * wavelength,
            wavelength,
            0.0,
            1600.0,
            Vec2::new(1.0 + r1, 0.5 + r2),
            1.0 / 16.0,
            rng,
            now,
        ));
    }

    waves
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn swell(seed: u64) -> Wave {
        let mut rng = StdRng::seed_from_u64(seed);
        Wave::new(1.0, 35.0, 8.0, 1000.0, Vec2::new(1.0, 0.5), 0.1, &mut rng, 0.0)
    }

    #[test]
    fn construction_backdates_reset_time() {
        let wave = swell(1);

        assert!((wave.reset_time() + 100.0).abs() < 1e-9);
        assert_eq!(wave.start_time(), wave.reset_time());
    }

    #[test]
    fn rolled_amplitude_stays_in_configured_band() {
        for seed in 0..64 {
            let wave = swell(seed);
            // elapsed is 100s here, well inside the steady window
            let amplitude = wave.amplitude(0.0);
            assert!((0.5..2.0).contains(&amplitude), "amplitude {amplitude}");
        }
    }

    #[test]
    fn reset_preserves_steepness_ratio() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut wave = swell(2);

        for i in 0..32 {
            wave.reset(&mut rng, i as f64 * 10.0);
            let steady = wave.amplitude(i as f64 * 10.0 + 10.0);
            assert!((wave.wavelength() / steady - 35.0).abs() < 1e-3);
        }
    }

    #[test]
    fn temporal_frequency_follows_dispersion_relation() {
        let wave = swell(3);
        let expected = (9.8 * PI * 2.0 / wave.wavelength()).sqrt();

        // phase grows by the temporal frequency per second
        let slope = wave.phase(1.0) - wave.phase(0.0);
        assert!((slope - expected).abs() < 1e-4);
    }

    #[test]
    fn direction_stays_within_five_degrees_of_average() {
        let average = Vec2::new(1.0, 0.5).normalize();
        for seed in 0..64 {
            let wave = swell(seed);
            let cos_angle = wave.direction().dot(average);
            assert!(cos_angle >= (5.0f32.to_radians()).cos() - 1e-6);
            assert!((wave.direction().length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn envelope_is_continuous_at_fade_boundaries() {
        let mut rng = StdRng::seed_from_u64(4);
        let wave = Wave::new(1.0, 35.0, 8.0, 1000.0, Vec2::new(1.0, 0.5), 0.0, &mut rng, 0.0);

        let eps = 1e-6;
        // fade-in joins the steady segment at elapsed = 5s
        let before = wave.amplitude(5.0 - eps);
        let after = wave.amplitude(5.0 + eps);
        assert!((before - after).abs() < 1e-4);

        // steady segment joins the fade-out at elapsed = duration - 5s
        let before = wave.amplitude(995.0 - eps);
        let after = wave.amplitude(995.0 + eps);
        assert!((before - after).abs() < 1e-4);
    }

    #[test]
    fn envelope_ramps_from_zero_and_back_to_zero() {
        let mut rng = StdRng::seed_from_u64(5);
        let wave = Wave::new(1.0, 35.0, 8.0, 1000.0, Vec2::new(1.0, 0.5), 0.0, &mut rng, 0.0);

        assert_eq!(wave.amplitude(0.0), 0.0);
        assert!(wave.amplitude(2.5) > 0.0);
        assert!(wave.amplitude(2.5) < wave.amplitude(5.0));
        assert_eq!(wave.amplitude(1000.5), 0.0);
    }

    #[test]
    fn phase_is_monotonic_between_resets() {
        let wave = swell(6);
        let mut last = wave.phase(0.0);

        for step in 1..100 {
            let phase = wave.phase(step as f64 * 0.25);
            assert!(phase > last);
            last = phase;
        }
    }

    #[test]
    fn texture_waves_roll_bounded_wavelengths() {
        let mut rng = StdRng::seed_from_u64(11);
        let waves = texture_waves(32, &mut rng, 0.0);

        assert_eq!(waves.len(), 32);
        for wave in &waves {
            assert!(wave.avg_wavelength >= 0.3 && wave.avg_wavelength < 6.3);
            assert!((wave.avg_amplitude - 0.005 * wave.avg_wavelength).abs() < 1e-6);
            assert_eq!(wave.duration, 1600.0);
        }
    }
}
