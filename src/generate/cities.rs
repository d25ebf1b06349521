use rand::Rng;

use super::{clamp_round, unit};
use crate::models::{City, Tier};

// ---

/// A fixed map location and the severity band it always belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ReferenceCity {
    // ---
    name: &'static str,
    latitude: f64,
    longitude: f64,
    tier: Tier,
}

const fn city(name: &'static str, latitude: f64, longitude: f64, tier: Tier) -> ReferenceCity {
    ReferenceCity {
        name,
        latitude,
        longitude,
        tier,
    }
}

use Tier::{Good, Moderate, Poor, Severe};

static REFERENCE_CITIES: [ReferenceCity; 53] = [
    // India
    city("Delhi", 28.6139, 77.2090, Severe),
    city("Mumbai", 19.0760, 72.8777, Poor),
    city("Bengaluru", 12.9716, 77.5946, Moderate),
    city("Chennai", 13.0827, 80.2707, Moderate),
    city("Kolkata", 22.5726, 88.3639, Poor),
    city("Hyderabad", 17.3850, 78.4867, Moderate),
    city("Ahmedabad", 23.0225, 72.5714, Poor),
    city("Pune", 18.5204, 73.8567, Moderate),
    city("Jaipur", 26.9124, 75.7873, Poor),
    city("Lucknow", 26.8467, 80.9462, Severe),
    city("Patna", 25.5941, 85.1376, Severe),
    city("Bhopal", 23.2599, 77.4126, Moderate),
    city("Chandigarh", 30.7333, 76.7794, Good),
    city("Guwahati", 26.1445, 91.7362, Good),
    city("Kochi", 9.9312, 76.2673, Good),
    city("Amritsar", 31.6340, 74.8723, Good),
    city("Ludhiana", 30.9010, 75.8573, Severe),
    city("Agra", 27.1767, 78.0081, Severe),
    city("Kanpur", 26.4499, 80.3319, Severe),
    city("Varanasi", 25.3176, 82.9739, Severe),
    city("Prayagraj", 25.4358, 81.8463, Severe),
    city("Dehradun", 30.3165, 78.0322, Good),
    city("Srinagar", 34.0837, 74.7973, Good),
    city("Shimla", 31.1048, 77.1734, Good),
    city("Surat", 21.1702, 72.8311, Poor),
    city("Vadodara", 22.3072, 73.1812, Poor),
    city("Indore", 22.7196, 75.8577, Poor),
    city("Nagpur", 21.1458, 79.0882, Poor),
    city("Nashik", 20.0110, 73.7903, Moderate),
    city("Thiruvananthapuram", 8.5241, 76.9366, Good),
    city("Coimbatore", 11.0168, 76.9558, Good),
    city("Mysuru", 12.2958, 76.6394, Good),
    city("Visakhapatnam", 17.6868, 83.2185, Moderate),
    city("Vijayawada", 16.5062, 80.6480, Moderate),
    city("Bhubaneswar", 20.2961, 85.8245, Moderate),
    city("Ranchi", 23.3441, 85.3096, Moderate),
    city("Raipur", 21.2514, 81.6296, Poor),
    city("Shillong", 25.5788, 91.8933, Good),
    // World
    city("New York", 40.7128, -74.0060, Moderate),
    city("London", 51.5074, -0.1278, Good),
    city("Tokyo", 35.6762, 139.6503, Good),
    city("Beijing", 39.9042, 116.4074, Severe),
    city("Sydney", -33.8688, 151.2093, Good),
    city("Paris", 48.8566, 2.3522, Moderate),
    city("Moscow", 55.7558, 37.6173, Moderate),
    city("Dubai", 25.2048, 55.2708, Poor),
    city("Singapore", 1.3521, 103.8198, Good),
    city("Los Angeles", 34.0522, -118.2437, Poor),
    city("Seoul", 37.5665, 126.9780, Poor),
    city("Cairo", 30.0444, 31.2357, Severe),
    city("Rio de Janeiro", -22.9068, -43.1729, Moderate),
    city("Johannesburg", -26.2041, 28.0473, Moderate),
    city("Toronto", 43.6510, -79.3470, Good),
];

/// Sample a fresh AQI for every reference city, in reference-list order.
///
/// Each value is the tier's base plus a `[-30, 30)` offset, clamped to
/// `[20, 500]`. Only the number is random; tier membership never changes.
pub fn city_readings<R: Rng + ?Sized>(rng: &mut R) -> Vec<City> {
    // ---
    REFERENCE_CITIES
        .iter()
        .map(|c| City {
            name: c.name,
            coordinates: (c.latitude, c.longitude),
            aqi: clamp_round(c.tier.base_aqi() + (unit(rng) - 0.5) * 60.0, 20.0, 500.0),
        })
        .collect()
}

/// Order cities worst to best. Ties keep their reference-list order.
pub fn rank(mut cities: Vec<City>) -> Vec<City> {
    cities.sort_by(|a, b| b.aqi.cmp(&a.aqi));
    cities
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn aqi_of(cities: &[City], name: &str) -> u16 {
        cities.iter().find(|c| c.name == name).unwrap().aqi
    }

    #[test]
    fn test_names_are_unique() {
        // ---
        let names: HashSet<_> = REFERENCE_CITIES.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), REFERENCE_CITIES.len());
    }

    #[test]
    fn test_tier_sizes() {
        // ---
        let count = |tier: Tier| REFERENCE_CITIES.iter().filter(|c| c.tier == tier).count();
        assert_eq!(count(Severe), 10);
        assert_eq!(count(Poor), 12);
        assert_eq!(count(Moderate), 15);
        assert_eq!(count(Good), 16);
    }

    #[test]
    fn test_midpoint_draw_returns_tier_bases() {
        // ---
        let cities = city_readings(&mut StepRng::new(1 << 63, 0));

        assert_eq!(aqi_of(&cities, "Delhi"), 280);
        assert_eq!(aqi_of(&cities, "Mumbai"), 160);
        assert_eq!(aqi_of(&cities, "Paris"), 90);
        assert_eq!(aqi_of(&cities, "Kochi"), 45);
    }

    #[test]
    fn test_lowest_draw_clamps_good_tier() {
        // ---
        let cities = city_readings(&mut StepRng::new(0, 0));

        assert_eq!(aqi_of(&cities, "Delhi"), 250);
        assert_eq!(aqi_of(&cities, "Bengaluru"), 60);
        // 45 - 30 falls below the floor.
        assert_eq!(aqi_of(&cities, "London"), 20);
    }

    #[test]
    fn test_keeps_reference_order() {
        // ---
        let cities = city_readings(&mut StdRng::seed_from_u64(9));
        let names: Vec<_> = cities.iter().map(|c| c.name).collect();
        let expected: Vec<_> = REFERENCE_CITIES.iter().map(|c| c.name).collect();
        assert_eq!(names, expected);
        assert_eq!(cities[0].coordinates, (28.6139, 77.2090));
    }

    #[test]
    fn test_values_stay_in_range() {
        // ---
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            assert!(city_readings(&mut rng)
                .iter()
                .all(|c| (20..=500).contains(&c.aqi)));
        }
    }

    #[test]
    fn test_severe_city_centred_on_base() {
        // ---
        let mut rng = StdRng::seed_from_u64(2024);
        let draws: u32 = 4000;
        let total: f64 = (0..draws)
            .map(|_| f64::from(aqi_of(&city_readings(&mut rng), "Delhi")))
            .sum();
        let mean = total / f64::from(draws);
        assert!((mean - 280.0).abs() < 2.0, "mean was {}", mean);
    }

    #[test]
    fn test_rank_sorts_descending() {
        // ---
        let cities = rank(city_readings(&mut StdRng::seed_from_u64(5)));
        assert!(cities.windows(2).all(|w| w[0].aqi >= w[1].aqi));
        assert_eq!(cities.len(), 53);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        // ---
        // With a constant draw every severe city ties at 280.
        let ranked = rank(city_readings(&mut StepRng::new(1 << 63, 0)));
        assert_eq!(ranked[0].name, "Delhi");
        assert_eq!(ranked[1].name, "Lucknow");
    }
}
