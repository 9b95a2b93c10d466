//! Hyperparameter search space: an ordered list of named dimensions.
//!
//! Dimension order is the positional correspondence key between surrogate
//! points and named parameter values — it must be preserved end-to-end.

use rand::Rng;
use serde::{Deserialize, Serialize};

use ranklab_core::errors::SearchError;
use ranklab_core::models::ParamValue;

/// Value domain of one tunable hyperparameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Domain {
    Real { low: f64, high: f64 },
    Integer { low: i64, high: i64 },
    Categorical { choices: Vec<ParamValue> },
}

/// One named, bounded dimension of the search space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub domain: Domain,
}

impl Dimension {
    pub fn real(name: impl Into<String>, low: f64, high: f64) -> Self {
        Self {
            name: name.into(),
            domain: Domain::Real { low, high },
        }
    }

    pub fn integer(name: impl Into<String>, low: i64, high: i64) -> Self {
        Self {
            name: name.into(),
            domain: Domain::Integer { low, high },
        }
    }

    pub fn categorical(name: impl Into<String>, choices: Vec<ParamValue>) -> Self {
        Self {
            name: name.into(),
            domain: Domain::Categorical { choices },
        }
    }

    fn validate(&self) -> Result<(), SearchError> {
        let reason = match &self.domain {
            Domain::Real { low, high } => {
                if !low.is_finite() || !high.is_finite() {
                    Some("bounds must be finite".to_string())
                } else if low >= high {
                    Some(format!("bounds must satisfy low < high, got [{low}, {high}]"))
                } else {
                    None
                }
            }
            Domain::Integer { low, high } => {
                if low >= high {
                    Some(format!("bounds must satisfy low < high, got [{low}, {high}]"))
                } else {
                    None
                }
            }
            Domain::Categorical { choices } => {
                if choices.is_empty() {
                    Some("needs at least one choice".to_string())
                } else {
                    None
                }
            }
        };
        match reason {
            Some(reason) => Err(SearchError::InvalidDimension {
                name: self.name.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Decode a unit-interval coordinate into a concrete value.
    pub fn decode(&self, unit: f64) -> ParamValue {
        let u = unit.clamp(0.0, 1.0);
        match &self.domain {
            Domain::Real { low, high } => ParamValue::Float(low + u * (high - low)),
            Domain::Integer { low, high } => {
                let span = (high - low) as f64;
                ParamValue::Int(low + (u * span).round() as i64)
            }
            Domain::Categorical { choices } => {
                let idx = ((u * choices.len() as f64) as usize).min(choices.len() - 1);
                choices[idx].clone()
            }
        }
    }
}

/// The search domain: validated, ordered dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSpace {
    dimensions: Vec<Dimension>,
}

impl SearchSpace {
    pub fn new(dimensions: Vec<Dimension>) -> Result<Self, SearchError> {
        if dimensions.is_empty() {
            return Err(SearchError::EmptySpace);
        }
        for dimension in &dimensions {
            dimension.validate()?;
        }
        Ok(Self { dimensions })
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Uniform sample in the unit hypercube.
    pub(crate) fn sample_unit<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.dimensions.iter().map(|_| rng.gen::<f64>()).collect()
    }

    /// Decode a unit point into named values, strictly in dimension order.
    pub fn decode(&self, point: &[f64]) -> Vec<(String, ParamValue)> {
        self.dimensions
            .iter()
            .zip(point)
            .map(|(dimension, &u)| (dimension.name.clone(), dimension.decode(u)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_preserves_dimension_order() {
        let space = SearchSpace::new(vec![
            Dimension::real("alpha", 0.0, 1.0),
            Dimension::integer("depth", 1, 9),
            Dimension::categorical(
                "kernel",
                vec![
                    ParamValue::Text("rbf".into()),
                    ParamValue::Text("linear".into()),
                ],
            ),
        ])
        .unwrap();

        let named = space.decode(&[0.5, 0.5, 0.0]);
        let names: Vec<&str> = named.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["alpha", "depth", "kernel"]);
    }

    #[test]
    fn real_decode_interpolates_bounds() {
        let d = Dimension::real("x", -2.0, 2.0);
        assert_eq!(d.decode(0.0), ParamValue::Float(-2.0));
        assert_eq!(d.decode(1.0), ParamValue::Float(2.0));
        assert_eq!(d.decode(0.5), ParamValue::Float(0.0));
    }

    #[test]
    fn integer_decode_rounds_and_covers_bounds() {
        let d = Dimension::integer("n", 1, 5);
        assert_eq!(d.decode(0.0), ParamValue::Int(1));
        assert_eq!(d.decode(1.0), ParamValue::Int(5));
        assert_eq!(d.decode(0.5), ParamValue::Int(3));
    }

    #[test]
    fn categorical_decode_hits_every_choice() {
        let d = Dimension::categorical(
            "c",
            vec![ParamValue::Int(10), ParamValue::Int(20), ParamValue::Int(30)],
        );
        assert_eq!(d.decode(0.0), ParamValue::Int(10));
        assert_eq!(d.decode(0.4), ParamValue::Int(20));
        assert_eq!(d.decode(1.0), ParamValue::Int(30));
    }

    #[test]
    fn out_of_range_coordinates_clamp() {
        let d = Dimension::real("x", 0.0, 1.0);
        assert_eq!(d.decode(-3.0), ParamValue::Float(0.0));
        assert_eq!(d.decode(7.0), ParamValue::Float(1.0));
    }

    #[test]
    fn invalid_spaces_are_rejected() {
        assert!(matches!(
            SearchSpace::new(vec![]),
            Err(SearchError::EmptySpace)
        ));
        assert!(SearchSpace::new(vec![Dimension::real("x", 1.0, 1.0)]).is_err());
        assert!(SearchSpace::new(vec![Dimension::integer("n", 5, 2)]).is_err());
        assert!(SearchSpace::new(vec![Dimension::categorical("c", vec![])]).is_err());
    }
}
