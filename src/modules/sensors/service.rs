//! Simulated field sensor.

use agrosense_models::NewSensorReading;
use chrono::{DateTime, Utc};
use rand::Rng;

pub const TEMPERATURE_RANGE: std::ops::Range<f64> = 20.0..30.0;
pub const HUMIDITY_RANGE: std::ops::Range<f64> = 40.0..70.0;
pub const RADIATION_RANGE: std::ops::Range<f64> = 200.0..1000.0;
pub const RAIN_PROBABILITY: f64 = 0.2;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Generates one reading taken at `now`.
///
/// Temperature and humidity carry two decimals, radiation is whole.
pub fn simulate_reading<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> NewSensorReading {
    NewSensorReading::new(
        round_to(rng.gen_range(TEMPERATURE_RANGE), 2),
        round_to(rng.gen_range(HUMIDITY_RANGE), 2),
        rng.gen_bool(RAIN_PROBABILITY),
        round_to(rng.gen_range(RADIATION_RANGE), 0),
        now,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_readings_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();

        for _ in 0..500 {
            let reading = simulate_reading(&mut rng, now);
            assert!((20.0..=30.0).contains(&reading.temperature));
            assert!((40.0..=70.0).contains(&reading.humidity));
            assert!((200.0..=1000.0).contains(&reading.radiation));
            assert_eq!(reading.radiation.fract(), 0.0);
        }
    }

    #[test]
    fn test_rain_is_occasional() {
        let mut rng = StdRng::seed_from_u64(11);
        let now = Utc::now();
        let rainy = (0..1000)
            .filter(|_| simulate_reading(&mut rng, now).rain)
            .count();
        assert!(rainy > 100 && rainy < 300, "rainy = {}", rainy);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(25.456, 2), 25.46);
        assert_eq!(round_to(512.4, 0), 512.0);
    }
}
