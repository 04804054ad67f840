use std::ops::{Add, Div, DivAssign, Mul, Neg, Sub};

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vector3(pub f32, pub f32, pub f32);

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
/// x, y, z, imass
///
/// Also used for planes, where xyz is the unit normal and w the signed distance.
pub struct Vector4(pub f32, pub f32, pub f32, pub f32);

pub type Plane = Vector4;

impl Vector3 {
	pub const fn splat(s: f32) -> Self {
		Self(s, s, s)
	}

	#[inline]
	pub fn dot(self, other: Self) -> f32 {
		self.0 * other.0 + self.1 * other.1 + self.2 * other.2
	}

	#[inline]
	pub fn length2(self) -> f32 {
		self.dot(self)
	}

	#[inline]
	pub fn length(self) -> f32 {
		self.length2().sqrt()
	}

	#[inline]
	pub fn cross(self, other: Self) -> Self {
		Self(
			self.1 * other.2 - self.2 * other.1,
			self.2 * other.0 - self.0 * other.2,
			self.0 * other.1 - self.1 * other.0,
		)
	}

	/// Component-wise minimum. Uses `<` so a NaN component on `self` is replaced.
	#[inline]
	pub fn min(self, other: Self) -> Self {
		Self(
			if self.0 < other.0 { self.0 } else { other.0 },
			if self.1 < other.1 { self.1 } else { other.1 },
			if self.2 < other.2 { self.2 } else { other.2 },
		)
	}

	#[inline]
	pub fn max(self, other: Self) -> Self {
		Self(
			if self.0 > other.0 { self.0 } else { other.0 },
			if self.1 > other.1 { self.1 } else { other.1 },
			if self.2 > other.2 { self.2 } else { other.2 },
		)
	}

	/// Extends into a [Vector4] with the given w.
	pub fn extend(self, w: f32) -> Vector4 {
		Vector4(self.0, self.1, self.2, w)
	}
}

impl Vector4 {
	#[inline]
	pub fn dot(self, other: Self) -> f32 {
		self.0 * other.0 + self.1 * other.1 + self.2 * other.2 + self.3 * other.3
	}

	#[inline]
	pub fn length2(self) -> f32 {
		self.dot(self)
	}

	/// Drops w.
	#[inline]
	pub fn xyz(self) -> Vector3 {
		Vector3(self.0, self.1, self.2)
	}
}

impl From<Vector4> for Vector3 {
	fn from(v: Vector4) -> Self {
		v.xyz()
	}
}

impl Add for Vector3 {
	type Output = Self;
	fn add(self, v: Self) -> Self {
		Self(self.0 + v.0, self.1 + v.1, self.2 + v.2)
	}
}

impl Sub for Vector3 {
	type Output = Self;
	fn sub(self, v: Self) -> Self {
		Self(self.0 - v.0, self.1 - v.1, self.2 - v.2)
	}
}

impl Neg for Vector3 {
	type Output = Self;
	fn neg(self) -> Self {
		Self(-self.0, -self.1, -self.2)
	}
}

/// Component-wise product, used for applying a non-uniform scale.
impl Mul for Vector3 {
	type Output = Self;
	fn mul(self, v: Self) -> Self {
		Self(self.0 * v.0, self.1 * v.1, self.2 * v.2)
	}
}

impl Mul<f32> for Vector3 {
	type Output = Self;
	fn mul(self, s: f32) -> Self {
		Self(self.0 * s, self.1 * s, self.2 * s)
	}
}

impl Div<f32> for Vector3 {
	type Output = Self;
	fn div(self, s: f32) -> Self {
		Self(self.0 / s, self.1 / s, self.2 / s)
	}
}

impl DivAssign<f32> for Vector3 {
	fn div_assign(&mut self, s: f32) {
		self.0 /= s;
		self.1 /= s;
		self.2 /= s;
	}
}

impl Sub for Vector4 {
	type Output = Self;
	fn sub(self, v: Self) -> Self {
		Self(self.0 - v.0, self.1 - v.1, self.2 - v.2, self.3 - v.3)
	}
}

/// A ray as passed by the host. `dir` is expected to be normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
	pub origin: Vector3,
	pub dir: Vector3,
}

impl Ray {
	pub fn new(origin: Vector3, dir: Vector3) -> Self {
		Self { origin, dir }
	}
}

/// Axis aligned bounding box.
///
/// The default box is empty (min at +MAX, max at -MAX) so that growing it by any
/// point yields that point.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Pod, Zeroable, derivative::Derivative)]
#[derivative(Debug, Default)]
pub struct Bounds {
	#[derivative(Default(value = "Vector3::splat(f32::MAX)"))]
	pub min: Vector3,
	#[derivative(Default(value = "Vector3::splat(-f32::MAX)"))]
	pub max: Vector3,
}

impl Bounds {
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn grow(&mut self, p: Vector3) {
		self.min = self.min.min(p);
		self.max = self.max.max(p);
	}

	/// True if no point has been added yet.
	pub fn is_empty(&self) -> bool {
		self.min.0 > self.max.0 || self.min.1 > self.max.1 || self.min.2 > self.max.2
	}

	pub fn contains(&self, p: Vector3) -> bool {
		p.0 >= self.min.0
			&& p.1 >= self.min.1
			&& p.2 >= self.min.2
			&& p.0 <= self.max.0
			&& p.1 <= self.max.1
			&& p.2 <= self.max.2
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn cross_follows_right_hand_rule() {
		let z = Vector3(1.0, 0.0, 0.0).cross(Vector3(0.0, 1.0, 0.0));
		assert_eq!(z, Vector3(0.0, 0.0, 1.0));
	}

	#[test]
	fn length_of_pythagorean_triple() {
		assert_relative_eq!(Vector3(3.0, 4.0, 0.0).length(), 5.0);
		assert_relative_eq!(Vector4(1.0, 1.0, 1.0, 1.0).length2(), 4.0);
	}

	#[test]
	fn scale_is_component_wise() {
		let v = Vector3(1.0, 2.0, 3.0) * Vector3(2.0, 0.5, -1.0);
		assert_eq!(v, Vector3(2.0, 1.0, -3.0));
	}

	#[test]
	fn empty_bounds_grow_to_point() {
		let mut b = Bounds::empty();
		assert!(b.is_empty());

		b.grow(Vector3(1.0, -2.0, 3.0));
		assert!(!b.is_empty());
		assert_eq!(b.min, Vector3(1.0, -2.0, 3.0));
		assert_eq!(b.max, Vector3(1.0, -2.0, 3.0));
		assert!(b.contains(Vector3(1.0, -2.0, 3.0)));
	}

	#[test]
	fn bounds_layout_is_two_vectors() {
		assert_eq!(std::mem::size_of::<Bounds>(), 2 * std::mem::size_of::<Vector3>());
		assert_eq!(std::mem::size_of::<Vector4>(), 16);
	}
}
