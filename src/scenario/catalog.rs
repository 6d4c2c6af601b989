//! Built-in scenarios

use super::{Scenario, ScenarioError, SliderSettings};
use crate::physics::math::{PI, PolarCoordinate, Scalar, Vector};

const DAY: Scalar = 3600.0 * 24.0;
const YEAR: Scalar = DAY * 365.0;

pub struct ScenarioCatalog;

impl ScenarioCatalog {
    pub const DEFAULT: &'static str = "mars_cycler";

    pub fn names() -> Vec<&'static str> {
        vec!["mars_cycler", "figure_eight"]
    }

    pub fn get(name: &str) -> Result<Scenario, ScenarioError> {
        match name {
            "mars_cycler" => Ok(mars_cycler()),
            "figure_eight" => Ok(figure_eight()),
            _ => Err(ScenarioError::UnknownScenario(name.to_string())),
        }
    }
}

/// The Sun, the Earth, Mars and a cycler craft on a transfer orbit
fn mars_cycler() -> Scenario {
    Scenario {
        name: "mars_cycler".into(),
        dimensionless: false,
        masses: vec![1.98855e30, 5.972e24, 6.4171e23, 4.2e5],
        densities: Some(vec![0.01; 4]),
        time_scale_factor: YEAR,
        pale_orbital_paths: false,
        body_names: vec![
            "the Sun".into(),
            "the Earth".into(),
            "Mars".into(),
            "Cycler".into(),
        ],
        positions: vec![
            PolarCoordinate::new(0.0, 0.0),
            PolarCoordinate::new(1.496e11, 0.0),
            PolarCoordinate::new(2.28e11, 0.0),
            PolarCoordinate::new(2.29e11, 0.32),
        ],
        velocities: vec![
            PolarCoordinate::new(0.0, PI / 2.0),
            PolarCoordinate::new(30e3, PI / 2.0),
            PolarCoordinate::new(24e3, PI / 2.0),
            PolarCoordinate::new(24e3, PI / 2.0),
        ],
        mass_slider: SliderSettings::new(3e2, 3e30, Some(5)),
        time_scale_factor_slider: SliderSettings::new(0.0, DAY * 500.0 * 10000.0, Some(5)),
    }
}

/// Chenciner-Montgomery figure-eight choreography of three equal masses, G = 1
fn figure_eight() -> Scenario {
    let outer = Vector::new(0.97000436, -0.24308753);
    let center_velocity = Vector::new(-0.93240737, -0.86473146);

    Scenario {
        name: "figure_eight".into(),
        dimensionless: true,
        masses: vec![1.0; 3],
        densities: Some(vec![100.0; 3]),
        time_scale_factor: 1.0,
        pale_orbital_paths: true,
        body_names: vec!["A".into(), "B".into(), "C".into()],
        positions: vec![
            PolarCoordinate::from_cartesian(-outer),
            PolarCoordinate::from_cartesian(outer),
            PolarCoordinate::from_cartesian(Vector::ZERO),
        ],
        velocities: vec![
            PolarCoordinate::from_cartesian(-center_velocity / 2.0),
            PolarCoordinate::from_cartesian(-center_velocity / 2.0),
            PolarCoordinate::from_cartesian(center_velocity),
        ],
        mass_slider: SliderSettings::new(0.0, 10.0, Some(3)),
        time_scale_factor_slider: SliderSettings::new(0.0, 20.0, Some(3)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_name_resolves() {
        for name in ScenarioCatalog::names() {
            let scenario = ScenarioCatalog::get(name).unwrap();
            assert_eq!(scenario.name, name);
        }
    }

    #[test]
    fn test_default_is_listed() {
        assert!(ScenarioCatalog::names().contains(&ScenarioCatalog::DEFAULT));
    }

    #[test]
    fn test_unknown_name() {
        let err = ScenarioCatalog::get("venus_flyby").unwrap_err();

        assert_eq!(err, ScenarioError::UnknownScenario("venus_flyby".into()));
        assert!(err.to_string().contains("mars_cycler"));
    }

    #[test]
    fn test_mars_cycler_body_order() {
        let scenario = ScenarioCatalog::get("mars_cycler").unwrap();

        assert_eq!(scenario.body_count(), 4);
        assert_eq!(scenario.body_name(0), "the Sun");
        assert_eq!(scenario.body_name(3), "Cycler");
        assert!(!scenario.dimensionless);
    }

    #[test]
    fn test_figure_eight_starts_with_zero_momentum() {
        let scenario = ScenarioCatalog::get("figure_eight").unwrap();

        let momentum = scenario
            .velocities
            .iter()
            .zip(&scenario.masses)
            .fold(Vector::ZERO, |sum, (velocity, mass)| {
                sum + velocity.to_cartesian() * *mass
            });

        assert!(momentum.length() < 1e-12, "momentum {momentum:?}");
    }
}
