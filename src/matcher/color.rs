use serde::{Deserialize, Serialize};

use super::constants::DEFAULT_COLOR_WEIGHT;

/**
    An RGB color together with its prominence within the image it came from.

    The score is only ever used as a weight, it is not required
    to be normalized or to sum up to anything across a palette.
*/
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub score: f64,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8, score: f64) -> Self {
        Self {
            red,
            green,
            blue,
            score,
        }
    }

    /**
        Creates a color from unvalidated channel values, rounding
        and clamping each of them into the `0..=255` range.

        The score is clamped into `0.0..=1.0`, non-finite scores become zero.
    */
    pub fn from_channels_lossy(red: f64, green: f64, blue: f64, score: f64) -> Self {
        Self::new(
            clamp_channel(red),
            clamp_channel(green),
            clamp_channel(blue),
            clamp_score(score),
        )
    }

    /**
        The weight of this color when scoring, which falls
        back to a default if the score is zero or missing.
    */
    pub fn weight(&self) -> f64 {
        if self.score == 0.0 || self.score.is_nan() {
            DEFAULT_COLOR_WEIGHT
        } else {
            self.score
        }
    }

    pub(crate) fn channels(&self) -> [i32; 3] {
        [
            i32::from(self.red),
            i32::from(self.green),
            i32::from(self.blue),
        ]
    }
}

fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.round().clamp(0.0, 255.0) as u8
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/**
    Euclidean distance between two colors in RGB space.
*/
pub fn color_distance(a: &Color, b: &Color) -> f64 {
    let [ar, ag, ab] = a.channels();
    let [br, bg, bb] = b.channels();
    let dr = f64::from(ar - br);
    let dg = f64::from(ag - bg);
    let db = f64::from(ab - bb);
    (dr * dr + dg * dg + db * db).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::constants::MAX_COLOR_DISTANCE;

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = Color::new(12, 200, 77, 0.4);
        let b = Color::new(250, 3, 90, 0.1);
        assert_eq!(color_distance(&a, &b), color_distance(&b, &a));
        assert_eq!(color_distance(&a, &a), 0.0);
    }

    #[test]
    fn distance_between_extremes_is_close_to_max_constant() {
        let black = Color::new(0, 0, 0, 0.0);
        let white = Color::new(255, 255, 255, 0.0);
        let dist = color_distance(&black, &white);
        assert!((dist - MAX_COLOR_DISTANCE).abs() < 0.01);
    }

    #[test]
    fn zero_score_uses_default_weight() {
        assert_eq!(Color::new(1, 2, 3, 0.0).weight(), DEFAULT_COLOR_WEIGHT);
        assert_eq!(Color::new(1, 2, 3, 0.25).weight(), 0.25);
    }

    #[test]
    fn lossy_channels_are_rounded_and_clamped() {
        let c = Color::from_channels_lossy(-4.0, 127.6, 300.0, f64::NAN);
        assert_eq!((c.red, c.green, c.blue), (0, 128, 255));
        assert_eq!(c.score, 0.0);

        assert_eq!(Color::from_channels_lossy(0.0, 0.0, 0.0, -5.0).score, 0.0);
        assert_eq!(Color::from_channels_lossy(0.0, 0.0, 0.0, 3.5).score, 1.0);
        assert_eq!(Color::from_channels_lossy(0.0, 0.0, 0.0, f64::INFINITY).score, 0.0);
    }
}
