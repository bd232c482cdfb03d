//! Decoded sensor readings and indicator colours.

use serde::{Deserialize, Serialize};

/// Output of one proximity sensor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProximityReading {
    pub detected: bool,
    /// Distance from the sensor to the detected point; `0.0` when nothing is
    /// detected.
    pub distance: f64,
}

impl ProximityReading {
    /// Build a reading from the detected point in the sensor frame, if any.
    pub fn from_detection(point: Option<[f64; 3]>) -> Self {
        match point {
            Some([x, y, z]) => Self {
                detected: true,
                distance: (x * x + y * y + z * z).sqrt(),
            },
            None => Self::default(),
        }
    }
}

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Byte offset of the sampled pixel in a color sensor image: the centre
    /// pixel of a 3×3 RGB24 buffer.
    pub const SAMPLE_OFFSET: usize = 24;

    /// Decode a color sensor image by sampling the centre pixel.
    ///
    /// Returns `None` when the buffer is too short to contain it.
    pub fn from_sensor_image(data: &[u8]) -> Option<Self> {
        let px = data.get(Self::SAMPLE_OFFSET..Self::SAMPLE_OFFSET + 3)?;
        Some(Self::new(px[0], px[1], px[2]))
    }
}

/// A raw camera frame.  Pixels are RGB24, rows bottom-up as the simulator
/// delivers them; decoding is left to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Colour shown on the robot's indicator LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorColor {
    Red,
    Green,
    Blue,
    #[default]
    Off,
}

impl IndicatorColor {
    /// Parse a colour name.  Anything unrecognised switches the LED off.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "red" => IndicatorColor::Red,
            "green" => IndicatorColor::Green,
            "blue" => IndicatorColor::Blue,
            _ => IndicatorColor::Off,
        }
    }

    /// Integer code understood by the simulator's monitor script.
    pub fn signal_code(self) -> i32 {
        match self {
            IndicatorColor::Off => 21001,
            IndicatorColor::Red => 21002,
            IndicatorColor::Green => 21003,
            IndicatorColor::Blue => 21004,
        }
    }
}

impl std::fmt::Display for IndicatorColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndicatorColor::Red => write!(f, "red"),
            IndicatorColor::Green => write!(f, "green"),
            IndicatorColor::Blue => write!(f, "blue"),
            IndicatorColor::Off => write!(f, ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proximity_distance_is_point_norm() {
        let r = ProximityReading::from_detection(Some([0.03, 0.0, 0.04]));
        assert!(r.detected);
        assert!((r.distance - 0.05).abs() < 1e-12);
    }

    #[test]
    fn proximity_without_detection_is_zero() {
        let r = ProximityReading::from_detection(None);
        assert!(!r.detected);
        assert_eq!(r.distance, 0.0);
    }

    #[test]
    fn color_sensor_samples_centre_pixel() {
        let mut data = vec![0u8; 27];
        data[24] = 200;
        data[25] = 10;
        data[26] = 30;
        assert_eq!(Rgb::from_sensor_image(&data), Some(Rgb::new(200, 10, 30)));
    }

    #[test]
    fn color_sensor_short_buffer_is_none() {
        assert_eq!(Rgb::from_sensor_image(&[0u8; 26]), None);
    }

    #[test]
    fn indicator_codes() {
        assert_eq!(IndicatorColor::from_name("red").signal_code(), 21002);
        assert_eq!(IndicatorColor::from_name("green").signal_code(), 21003);
        assert_eq!(IndicatorColor::from_name("Blue").signal_code(), 21004);
        assert_eq!(IndicatorColor::from_name("akldjf").signal_code(), 21001);
        assert_eq!(IndicatorColor::from_name(""), IndicatorColor::Off);
    }
}
