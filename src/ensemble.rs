use rand::Rng;

use crate::uniform::UniformSink;
use crate::wave::Wave;

/// Push the full parameter block for every wave train into its uniform-array
/// slot. One-time call at scene setup; amplitudes are read at `now` with the
/// trains freshly constructed.
///
/// The per-train chop is normalized across the ensemble,
/// `total_chop / (freq * amplitude * N)`, so the summed horizontal
/// displacement stays visually stable regardless of train count. Scheduling
/// an empty ensemble is a precondition violation.
pub fn init_waves<S: UniformSink>(
    sink: &mut S,
    waves: &[Wave],
    var_name: &str,
    total_chop: f32,
    now: f64,
) {
    debug_assert!(!waves.is_empty(), "wave ensemble must not be empty");

    for (i, wave) in waves.iter().enumerate() {
        let slot = format!("{var_name}[{i}]");
        let chop = total_chop / (wave.freq() * wave.amplitude(now) * waves.len() as f32);

        sink.set_vec2(&format!("{slot}.wave_dirs"), wave.direction());
        sink.set_float(&format!("{slot}.freq"), wave.freq());
        sink.set_float(&format!("{slot}.phase"), wave.phase(now));
        sink.set_float(&format!("{slot}.phase_offset"), wave.phase_offset());
        sink.set_float(&format!("{slot}.amplitude"), wave.amplitude(now));
        sink.set_float(&format!("{slot}.chop"), chop);
    }
}

/// Per-frame tick over the ensemble.
///
/// Trains whose animated amplitude has reached zero have expired; they are
/// respawned in place before anything is pushed for the frame, and their
/// direction and spatial frequency slots are rewritten since the respawn
/// rerolled them. Amplitude, phase, phase offset and chop are pushed for
/// every train every frame.
pub fn update_waves<S: UniformSink, R: Rng>(
    sink: &mut S,
    waves: &mut [Wave],
    var_name: &str,
    total_chop: f32,
    rng: &mut R,
    now: f64,
) {
    debug_assert!(!waves.is_empty(), "wave ensemble must not be empty");

    let count = waves.len() as f32;

    for (i, wave) in waves.iter_mut().enumerate() {
        let slot = format!("{var_name}[{i}]");

        let mut amplitude = wave.amplitude(now);
        if amplitude == 0.0 {
            wave.reset(rng, now);
            amplitude = wave.amplitude(now);
            sink.set_vec2(&format!("{slot}.wave_dirs"), wave.direction());
            sink.set_float(&format!("{slot}.freq"), wave.freq());
        }

        let mut chop = total_chop / (wave.freq() * wave.amplitude(now) * count);
        if !chop.is_finite() {
            // a train respawned at exactly `now` sits at the origin of its
            // fade-in and displaces nothing this frame; push a neutral chop
            // rather than the raw infinity
            log::debug!("non-finite chop for {slot} on respawn frame, pushing 0");
            chop = 0.0;
        }

        sink.set_float(&format!("{slot}.amplitude"), amplitude);
        sink.set_float(&format!("{slot}.phase"), wave.phase(now));
        sink.set_float(&format!("{slot}.phase_offset"), wave.phase_offset());
        sink.set_float(&format!("{slot}.chop"), chop);
    }
}
