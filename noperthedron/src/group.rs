//! Cyclic transformation group about the z axis
//!
//! Element (k, l) is `(-1)^l * R_z(2 pi k / n)` for k in 0..n and l in {0, 1}.
//! Elements are stored k-major, so element (k, l) sits at index `2k + l` and
//! each rotation is immediately followed by its negated partner.

use crate::error::{NoperthedronError, Result};
use crate::matrix::Matrix3;
use std::f64::consts::PI;

/// Number of rotation angles in the Noperthedron group
pub const NOPERTHEDRON_ROTATIONS: usize = 15;

/// Number of signs each rotation is combined with
pub const SIGNS: usize = 2;

/// Ordered set of signed rotations
#[derive(Debug, Clone, PartialEq)]
pub struct TransformGroup {
    rotations: usize,
    elements: Vec<Matrix3>,
}

impl TransformGroup {
    /// The 30-element group used for the Noperthedron
    pub fn noperthedron() -> Result<Self> {
        Self::cyclic(NOPERTHEDRON_ROTATIONS)
    }

    /// `2n` signed rotations by multiples of `2 pi / n`
    pub fn cyclic(rotations: usize) -> Result<Self> {
        let mut elements = Vec::with_capacity(rotations * SIGNS);
        for k in 0..rotations {
            let rotation = Matrix3::rotation_z(2.0 * PI * k as f64 / rotations as f64);
            for l in 0..SIGNS {
                let sign = if l == 0 { 1.0 } else { -1.0 };
                let element = rotation.scale(sign);
                if !element.is_finite() {
                    return Err(NoperthedronError::NumericInstability {
                        what: "group element",
                        index: elements.len(),
                    });
                }
                elements.push(element);
            }
        }

        log::debug!(
            "Generated transformation group: {} rotations x {} signs",
            rotations,
            SIGNS
        );

        Ok(Self {
            rotations,
            elements,
        })
    }

    /// Number of distinct rotation angles
    pub fn rotations(&self) -> usize {
        self.rotations
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Matrix3] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Matrix3> {
        self.elements.iter()
    }

    /// Element for rotation step `k` and sign exponent `l`
    pub fn element(&self, k: usize, l: usize) -> Option<&Matrix3> {
        if k < self.rotations && l < SIGNS {
            self.elements.get(k * SIGNS + l)
        } else {
            None
        }
    }

    /// Index of the element with the same rotation and opposite sign
    pub fn partner(&self, index: usize) -> Option<usize> {
        (index < self.elements.len()).then_some(index ^ 1)
    }

    /// The generator `-R_z(2 pi / n)`, whose powers visit every element
    pub fn generator(&self) -> Option<&Matrix3> {
        self.element(1, 1)
    }
}

impl<'a> IntoIterator for &'a TransformGroup {
    type Item = &'a Matrix3;
    type IntoIter = std::slice::Iter<'a, Matrix3>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noperthedron_hull::Point3;

    #[test]
    fn test_group_size_and_order() {
        let group = TransformGroup::noperthedron().unwrap();
        assert_eq!(group.len(), 30);
        assert_eq!(group.rotations(), 15);
        assert_eq!(group.elements()[0], Matrix3::identity());
        assert_eq!(group.elements()[1], Matrix3::identity().scale(-1.0));
        assert_eq!(
            group.element(3, 0),
            Some(&Matrix3::rotation_z(2.0 * PI * 3.0 / 15.0))
        );
        assert!(group.element(15, 0).is_none());
        assert!(group.element(0, 2).is_none());
    }

    #[test]
    fn test_partner_is_negation() {
        let group = TransformGroup::noperthedron().unwrap();
        for k in 0..15 {
            let positive = group.element(k, 0).unwrap();
            let negative = group.element(k, 1).unwrap();
            assert_eq!(*negative, positive.scale(-1.0));
            assert_eq!(group.partner(2 * k), Some(2 * k + 1));
            assert_eq!(group.partner(2 * k + 1), Some(2 * k));

            let p = Point3::new(0.3, -0.8, 0.45);
            assert_eq!(negative.apply(&p), positive.apply(&p).scale(-1.0));
        }
        assert_eq!(group.partner(30), None);
    }

    #[test]
    fn test_no_duplicate_elements() {
        let group = TransformGroup::noperthedron().unwrap();
        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                assert!(
                    !group.elements()[i].approx_eq(&group.elements()[j], 1e-6),
                    "elements {i} and {j} coincide"
                );
            }
        }
    }

    #[test]
    fn test_generator_order_thirty() {
        let group = TransformGroup::noperthedron().unwrap();
        let generator = group.generator().unwrap();
        let mut power = Matrix3::identity();
        for step in 1..=30 {
            power = generator.compose(&power);
            let is_identity = power.approx_eq(&Matrix3::identity(), 1e-12);
            assert_eq!(is_identity, step == 30, "power {step}");
        }
    }

    #[test]
    fn test_generator_powers_cover_group() {
        let group = TransformGroup::noperthedron().unwrap();
        let generator = group.generator().unwrap();
        let mut power = Matrix3::identity();
        for _ in 0..30 {
            power = generator.compose(&power);
            assert!(group.iter().any(|m| m.approx_eq(&power, 1e-12)));
        }
    }

    #[test]
    fn test_smaller_group() {
        let group = TransformGroup::cyclic(4).unwrap();
        assert_eq!(group.len(), 8);
        let quarter = group.element(1, 0).unwrap();
        assert!(quarter.approx_eq(&Matrix3::new([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]), 1e-15));
    }
}
