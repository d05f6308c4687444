//! Weather-adjusted solar generation model.
//!
//! Contrasts the theoretical peak output of a PV array (running at rated
//! power all year) with a realistic estimate derived from a regional
//! capacity factor and a roof-orientation derate.

use std::fmt;

/// Hours in a non-leap year, used for the theoretical maximum.
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Monthly distribution of annual generation (sums to 1.0).
pub const MONTHLY_GENERATION_FRACTIONS: [f64; 12] = [
    0.03, 0.04, 0.07, 0.10, 0.12, 0.14, 0.14, 0.12, 0.10, 0.07, 0.04, 0.03,
];

/// Short month names for charts and CSV output.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// UK region grouping for the effective capacity factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Southern England, capacity factor 0.13.
    South,
    /// The Midlands, capacity factor 0.12.
    Midlands,
    /// Northern England and Scotland, capacity factor 0.11.
    North,
}

impl Region {
    /// Config names accepted by [`Region::from_name`].
    pub const NAMES: &[&str] = &["south", "midlands", "north"];

    /// Parses a region from its config name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "south" => Some(Self::South),
            "midlands" => Some(Self::Midlands),
            "north" => Some(Self::North),
            _ => None,
        }
    }

    /// Annual capacity factor before orientation derate.
    pub fn capacity_factor(self) -> f64 {
        match self {
            Self::South => 0.13,
            Self::Midlands => 0.12,
            Self::North => 0.11,
        }
    }

    /// Human-readable label for reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::South => "South England",
            Self::Midlands => "Midlands",
            Self::North => "North/Scotland",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Roof orientation derate applied on top of the regional capacity factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Ideal south-facing roof, factor 1.00.
    South,
    /// South-east or south-west, factor 0.90.
    SouthEastWest,
    /// East or west, factor 0.80.
    EastWest,
    /// North-facing or heavily shaded, factor 0.60.
    NorthShaded,
}

impl Orientation {
    /// Config names accepted by [`Orientation::from_name`].
    pub const NAMES: &[&str] = &["south", "se_sw", "east_west", "north_shaded"];

    /// Parses an orientation from its config name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "south" => Some(Self::South),
            "se_sw" => Some(Self::SouthEastWest),
            "east_west" => Some(Self::EastWest),
            "north_shaded" => Some(Self::NorthShaded),
            _ => None,
        }
    }

    /// Multiplicative derate on the regional capacity factor.
    pub fn factor(self) -> f64 {
        match self {
            Self::South => 1.00,
            Self::SouthEastWest => 0.90,
            Self::EastWest => 0.80,
            Self::NorthShaded => 0.60,
        }
    }

    /// Human-readable label for reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::South => "Ideal (South)",
            Self::SouthEastWest => "OK (SE/SW)",
            Self::EastWest => "Suboptimal (E/W)",
            Self::NorthShaded => "Poor (North/shaded)",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Annual generation estimate for a PV system.
#[derive(Debug, Clone, Copy)]
pub struct GenerationEstimate {
    /// Output if the array ran at rated power all year (kWh).
    pub theoretical_kwh: f64,
    /// Weather- and orientation-adjusted output (kWh).
    pub realistic_kwh: f64,
    /// Effective capacity factor (region x orientation).
    pub capacity_factor: f64,
    /// Specific yield: realistic kWh per installed kWp.
    pub kwh_per_kwp: f64,
}

impl GenerationEstimate {
    /// Computes the estimate for a system of `kwp` peak capacity.
    pub fn for_system(kwp: f64, region: Region, orientation: Orientation) -> Self {
        let theoretical_kwh = kwp * HOURS_PER_YEAR;
        let capacity_factor = region.capacity_factor() * orientation.factor();
        let realistic_kwh = theoretical_kwh * capacity_factor;
        let kwh_per_kwp = if kwp > 0.0 { realistic_kwh / kwp } else { 0.0 };
        Self {
            theoretical_kwh,
            realistic_kwh,
            capacity_factor,
            kwh_per_kwp,
        }
    }
}

/// Distributes annual generation across the 12 months.
pub fn monthly_generation(realistic_kwh: f64) -> [f64; 12] {
    MONTHLY_GENERATION_FRACTIONS.map(|frac| realistic_kwh * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_fractions_sum_to_one() {
        let sum: f64 = MONTHLY_GENERATION_FRACTIONS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn four_kwp_south_ideal() {
        let est = GenerationEstimate::for_system(4.0, Region::South, Orientation::South);
        assert_eq!(est.theoretical_kwh, 35040.0);
        assert!((est.capacity_factor - 0.13).abs() < 1e-12);
        assert!((est.realistic_kwh - 4555.2).abs() < 1e-9);
        assert!((est.kwh_per_kwp - 1138.8).abs() < 1e-9);
    }

    #[test]
    fn orientation_derates_stack_multiplicatively() {
        let ideal = GenerationEstimate::for_system(4.0, Region::North, Orientation::South);
        let shaded = GenerationEstimate::for_system(4.0, Region::North, Orientation::NorthShaded);
        assert!((shaded.realistic_kwh - ideal.realistic_kwh * 0.6).abs() < 1e-9);
    }

    #[test]
    fn zero_kwp_yields_zero_specific_yield() {
        let est = GenerationEstimate::for_system(0.0, Region::South, Orientation::South);
        assert_eq!(est.realistic_kwh, 0.0);
        assert_eq!(est.kwh_per_kwp, 0.0);
    }

    #[test]
    fn monthly_generation_sums_to_annual() {
        let months = monthly_generation(4555.2);
        let sum: f64 = months.iter().sum();
        assert!((sum - 4555.2).abs() < 1e-9);
        // June and July carry the largest share
        assert_eq!(months[5], months[6]);
        assert!(months[5] > months[0]);
    }

    #[test]
    fn region_names_round_trip() {
        for name in Region::NAMES {
            assert!(Region::from_name(name).is_some(), "region {name} should parse");
        }
        assert!(Region::from_name("wales").is_none());
    }

    #[test]
    fn orientation_names_round_trip() {
        for name in Orientation::NAMES {
            assert!(
                Orientation::from_name(name).is_some(),
                "orientation {name} should parse"
            );
        }
        assert!(Orientation::from_name("flat").is_none());
    }

    #[test]
    fn realistic_never_exceeds_theoretical() {
        for region in [Region::South, Region::Midlands, Region::North] {
            for orientation in [
                Orientation::South,
                Orientation::SouthEastWest,
                Orientation::EastWest,
                Orientation::NorthShaded,
            ] {
                let est = GenerationEstimate::for_system(6.5, region, orientation);
                assert!(est.realistic_kwh < est.theoretical_kwh);
            }
        }
    }
}
