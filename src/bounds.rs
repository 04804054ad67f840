use crate::{
	types::{Bounds, Vector3, Vector4},
	GeometryError,
};

/// Box around the particles selected by `indices`. No indices gives [Bounds::empty].
pub fn compute_bounds(particles: &[Vector4], indices: &[i32]) -> Result<Bounds, GeometryError> {
	let mut bounds = Bounds::empty();

	for &index in indices {
		let particle = usize::try_from(index)
			.ok()
			.and_then(|i| particles.get(i))
			.ok_or(GeometryError::IndexOutOfRange {
				index: index as i64,
				len: particles.len(),
			})?;

		bounds.grow(Vector3::from(*particle));
	}

	Ok(bounds)
}
