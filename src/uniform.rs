use glam::Vec2;
use std::collections::HashMap;

/// Destination for named shader-style uniform writes.
///
/// Ensemble scheduling addresses uniform-array elements with names of the
/// form `"waves[3].freq"`; any rendering backend that can set named scalar
/// and 2-vector uniforms can implement this.
pub trait UniformSink {
    fn set_vec2(&mut self, name: &str, value: Vec2);
    fn set_float(&mut self, name: &str, value: f32);
}

/// A value held by a [`UniformBank`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    Float(f32),
    Vec2(Vec2),
}

/// In-memory uniform store. Stands in for a GPU shader program when
/// generating offline snapshots and in tests.
#[derive(Debug, Default)]
pub struct UniformBank {
    values: HashMap<String, Uniform>,
}

impl UniformBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        match self.values.get(name) {
            Some(Uniform::Float(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_vec2(&self, name: &str) -> Option<Vec2> {
        match self.values.get(name) {
            Some(Uniform::Vec2(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl UniformSink for UniformBank {
    fn set_vec2(&mut self, name: &str, value: Vec2) {
        self.values.insert(name.to_string(), Uniform::Vec2(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_string(), Uniform::Float(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_stores_and_reads_back_values() {
        let mut bank = UniformBank::new();
        bank.set_float("waves[0].freq", 1.25);
        bank.set_vec2("waves[0].wave_dirs", Vec2::new(1.0, 0.5));

        assert_eq!(bank.get_float("waves[0].freq"), Some(1.25));
        assert_eq!(bank.get_vec2("waves[0].wave_dirs"), Some(Vec2::new(1.0, 0.5)));
        assert_eq!(bank.get_float("waves[0].wave_dirs"), None);
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn later_writes_overwrite_earlier_ones() {
        let mut bank = UniformBank::new();
        bank.set_float("chop", 1.0);
        bank.set_float("chop", 2.0);

        assert_eq!(bank.get_float("chop"), Some(2.0));
        assert_eq!(bank.len(), 1);
    }
}
