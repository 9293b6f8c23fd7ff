//! Animator parameter sink.

use bevy::prelude::*;

/// Parameter carrying the smoothed locomotion speed.
pub const SPEED_PARAM: &str = "Speed";

/// Named float parameters read by whatever drives the character's animation.
#[derive(Component, Clone, Debug, Default)]
pub struct AnimatorParams {
    floats: Vec<(&'static str, f32)>,
}

impl AnimatorParams {
    pub fn set_float(&mut self, name: &'static str, value: f32) {
        match self.floats.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.floats.push((name, value)),
        }
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        self.floats
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites() {
        let mut params = AnimatorParams::default();
        assert_eq!(params.get_float(SPEED_PARAM), None);

        params.set_float(SPEED_PARAM, 0.25);
        params.set_float(SPEED_PARAM, 0.75);
        assert_eq!(params.get_float(SPEED_PARAM), Some(0.75));
        assert_eq!(params.get_float("Other"), None);
    }
}
